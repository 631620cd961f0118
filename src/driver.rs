//! Build driver
//!
//! Decides which backends run for this host and dispatches the canonical shader list to them:
//!
//! | backend | runs when                        | tool      | missing tool      |
//! |---------|----------------------------------|-----------|-------------------|
//! | SPIR-V  | always                           | glslang   | skipped           |
//! | Metal   | macOS                            | xcrun     | error             |
//! | DXIL    | Windows, or dxc found elsewhere  | dxc       | error on Windows  |
//! | DXBC    | Windows                          | fxc       | error             |
//!
//! Backends run one after another; the first error ends the build.

use crate::backend::{BackendKind, DxbcBackend, DxilBackend, MetalBackend, ShaderBackend, SpirvBackend};
use crate::config::BuildConfig;
use crate::error::{ShaderError, ShaderResult};
use crate::locate::ToolLocator;
use crate::output;
use crate::platform::Platform;
use crate::runner::{display_relative, CommandRunner};
use crate::task::{self, ShaderTask};
use std::path::{Path, PathBuf};

/// What a build did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub platform: Platform,
    /// Backends that ran, in order
    pub built: Vec<BackendKind>,
    /// Backends that did not run, with the reason
    pub skipped: Vec<(BackendKind, String)>,
    /// Every file the backends reported writing
    pub outputs: Vec<PathBuf>,
}

impl BuildSummary {
    fn new(platform: Platform) -> Self {
        Self {
            platform,
            built: Vec::new(),
            skipped: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn was_built(&self, kind: BackendKind) -> bool {
        self.built.contains(&kind)
    }

    pub fn was_skipped(&self, kind: BackendKind) -> bool {
        self.skipped.iter().any(|(k, _)| *k == kind)
    }
}

/// Runs every backend that applies to the host
pub struct Driver<'a> {
    root: PathBuf,
    config: BuildConfig,
    platform: Platform,
    locator: ToolLocator,
    runner: &'a dyn CommandRunner,
}

impl<'a> Driver<'a> {
    pub fn new(
        root: impl Into<PathBuf>,
        config: BuildConfig,
        platform: Platform,
        locator: ToolLocator,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            root: root.into(),
            config,
            platform,
            locator,
            runner,
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(&self.config.data_dir)
    }

    /// One vertex and one fragment task, without file extensions
    pub fn tasks(&self) -> Vec<ShaderTask> {
        task::canonical_tasks(&self.root, &self.config.data_dir, &self.config.shader_name)
    }

    pub fn run(&self) -> ShaderResult<BuildSummary> {
        let tasks = self.tasks();
        let mut summary = BuildSummary::new(self.platform);

        if self.runner.produces_files() {
            let data_dir = self.data_dir();
            std::fs::create_dir_all(&data_dir).map_err(|e| {
                ShaderError::Io(format!("failed to create {}: {}", data_dir.display(), e))
            })?;
        }

        let tools = &self.config.tools;
        let glslang = optional_tool(&self.locator, "glslang", tools.glslang.as_deref())?;
        let dxc_locator = self.locator.with_extra_dirs(tools.dxc_search_dirs.iter().cloned());
        let dxc = optional_tool(&dxc_locator, "dxc", tools.dxc.as_deref())?;

        match glslang {
            Some(glslang) => {
                let backend = SpirvBackend::new(glslang, self.config.spirv.flags.clone());
                self.run_backend(&backend, &tasks, &mut summary)?;
            },
            None => skip(&mut summary, BackendKind::Spirv, "glslang not found"),
        }

        if self.platform.is_apple() {
            let metal = &self.config.metal;
            let mut backend = MetalBackend::new(
                metal.sdk.clone(),
                metal.compile_flags(),
                self.data_dir().join(&metal.library),
                metal.debug,
            );
            if !metal.sources.is_empty() {
                backend = backend.with_sources(metal.sources.iter().map(|s| self.root.join(s)).collect());
            }
            self.run_backend(&backend, &tasks, &mut summary)?;
        } else {
            skip(&mut summary, BackendKind::Metal, "the Metal toolchain needs macOS");
        }

        match dxc {
            Some(dxc) => {
                let dxil = &self.config.dxil;
                let backend = DxilBackend::new(dxc, dxil.defines.clone(), dxil.flags.clone());
                self.run_backend(&backend, &tasks, &mut summary)?;
            },
            None if self.platform.is_windows() => {
                return Err(ShaderError::tool_not_found(
                    "dxc",
                    "required to build DXIL shaders on Windows",
                ));
            },
            None => skip(&mut summary, BackendKind::Dxil, "dxc not found"),
        }

        if self.platform.is_windows() {
            let fxc = self.locator.resolve("fxc", tools.fxc.as_deref())?;
            output::found(&format!("fxc at {}", fxc.display()));
            let backend = DxbcBackend::new(fxc, self.config.dxbc.flags.clone());
            self.run_backend(&backend, &tasks, &mut summary)?;
        } else {
            skip(&mut summary, BackendKind::Dxbc, "fxc only ships with the Windows SDK");
        }

        Ok(summary)
    }

    fn run_backend(
        &self,
        backend: &dyn ShaderBackend,
        tasks: &[ShaderTask],
        summary: &mut BuildSummary,
    ) -> ShaderResult<()> {
        let kind = backend.kind();
        let staged = task::with_suffixes(tasks, Some(kind.input_suffix()), kind.output_suffix());
        let outputs = backend.build(&staged, self.runner)?;

        let written: Vec<String> = outputs.iter().map(|p| display_relative(p, &self.root)).collect();
        output::built(&format!("{}: {}", kind, written.join(", ")));

        summary.built.push(kind);
        summary.outputs.extend(outputs);
        Ok(())
    }
}

/// A configured path must be valid; an unconfigured tool may be absent
fn optional_tool(locator: &ToolLocator, name: &str, configured: Option<&Path>) -> ShaderResult<Option<PathBuf>> {
    let found = match configured {
        Some(path) => Some(locator.resolve(name, Some(path))?),
        None => locator.find_optional(name),
    };
    if let Some(path) = &found {
        output::found(&format!("{} at {}", name, path.display()));
    }
    Ok(found)
}

fn skip(summary: &mut BuildSummary, kind: BackendKind, reason: &str) {
    output::skipping(&format!("{} ({})", kind, reason));
    summary.skipped.push((kind, reason.to_string()));
}
