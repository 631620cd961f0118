//! Metal backend
//!
//! ```text
//! Shader.vertex.metal ──metal -c──▶ Shader.vertex.air ─┐
//!                                                      ├─metallib──▶ Data/Shader.metallib
//! Shader.fragment.metal ─metal -c─▶ Shader.fragment.air┘
//! ```
//!
//! In debug builds the link step is `metal -frecord-sources` instead, followed by
//! `metal-dsymutil -flat -remove-source`, which moves the embedded sources into a
//! companion `Data/Shader.metallib.dSYM`.
//!
//! AIR files are removed once the library is linked, and also when any step fails.

use super::{BackendKind, ShaderBackend};
use crate::error::ShaderResult;
use crate::locate::xcrun_find;
use crate::output;
use crate::runner::{CommandRunner, Invocation};
use crate::task::ShaderTask;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const RECORD_SOURCES: &str = "-frecord-sources";

/// Metal backend driving the xcrun toolchain of one SDK
#[derive(Debug, Clone)]
pub struct MetalBackend {
    sdk: String,
    cflags: Vec<String>,
    library: PathBuf,
    debug: bool,
    sources: Option<Vec<PathBuf>>,
}

impl MetalBackend {
    pub fn new(sdk: impl Into<String>, cflags: Vec<String>, library: impl Into<PathBuf>, debug: bool) -> Self {
        Self {
            sdk: sdk.into(),
            cflags,
            library: library.into(),
            debug,
            sources: None,
        }
    }

    /// Compile these sources instead of one file per task (e.g. a single `Shader.metal`)
    pub fn with_sources(mut self, sources: Vec<PathBuf>) -> Self {
        self.sources = Some(sources);
        self
    }

    pub fn library(&self) -> &Path {
        &self.library
    }

    /// Companion symbol file written by metal-dsymutil in debug builds
    pub fn dsym_path(&self) -> PathBuf {
        let mut raw = OsString::from(self.library.as_os_str());
        raw.push(".dSYM");
        PathBuf::from(raw)
    }

    /// Compile every source and link them into one library
    pub fn compile(&self, sources: &[PathBuf], runner: &dyn CommandRunner) -> ShaderResult<Vec<PathBuf>> {
        let metal = xcrun_find(runner, &self.sdk, "metal")?;
        let linker = if self.debug {
            xcrun_find(runner, &self.sdk, "metal-dsymutil")?
        } else {
            xcrun_find(runner, &self.sdk, "metallib")?
        };

        let mut cflags = self.cflags.clone();
        cflags.push(RECORD_SOURCES.to_string());

        // Registered before each compile so a half-written object is removed too
        let mut air_objects = IntermediateFiles::new(runner.produces_files());
        for source in sources {
            let air = air_path(source);
            air_objects.push(air.clone());

            output::compiling(&format!("{} (metal)", source.display()));
            let compile = Invocation::new(&metal)
                .args(&cflags)
                .arg("-c")
                .arg(source)
                .arg("-o")
                .arg(&air);
            runner.run(&compile)?;
        }

        let mut outputs = vec![self.library.clone()];
        output::linking(&self.library.display().to_string());
        if self.debug {
            let link = Invocation::new(&metal)
                .arg(RECORD_SOURCES)
                .arg("-o")
                .arg(&self.library)
                .args(air_objects.paths());
            runner.run(&link)?;

            output::stripping(&format!("sources from {}", self.library.display()));
            let strip = Invocation::new(&linker)
                .args(["-flat", "-remove-source"])
                .arg(&self.library);
            runner.run(&strip)?;
            outputs.push(self.dsym_path());
        } else {
            let link = Invocation::new(&linker)
                .arg("-o")
                .arg(&self.library)
                .args(air_objects.paths());
            runner.run(&link)?;
        }

        let removed = air_objects.remove_all();
        if removed > 0 {
            output::removed(&format!("{} intermediate AIR file(s)", removed));
        }

        Ok(outputs)
    }
}

impl ShaderBackend for MetalBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Metal
    }

    fn build(&self, tasks: &[ShaderTask], runner: &dyn CommandRunner) -> ShaderResult<Vec<PathBuf>> {
        match &self.sources {
            Some(sources) => self.compile(sources, runner),
            None => {
                let sources: Vec<PathBuf> = tasks.iter().map(|t| t.source.clone()).collect();
                self.compile(&sources, runner)
            },
        }
    }
}

/// AIR object path for a Metal source: `X.metal` → `X.air`, anything else gets `.air` appended
pub fn air_path(source: &Path) -> PathBuf {
    if source.extension().is_some_and(|ext| ext == "metal") {
        source.with_extension("air")
    } else {
        let mut raw = OsString::from(source.as_os_str());
        raw.push(".air");
        PathBuf::from(raw)
    }
}

/// Intermediate files deleted when dropped.
///
/// Inert when the runner does not write files, so a dry run never touches existing objects.
#[derive(Debug)]
struct IntermediateFiles {
    paths: Vec<PathBuf>,
    owned: bool,
}

impl IntermediateFiles {
    fn new(owned: bool) -> Self {
        Self {
            paths: Vec::new(),
            owned,
        }
    }

    fn push(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Delete every tracked file, returning how many existed
    fn remove_all(&mut self) -> usize {
        if !self.owned {
            self.paths.clear();
            return 0;
        }

        let mut removed = 0;
        for path in self.paths.drain(..) {
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
                Err(e) => output::warning(&format!("could not remove {}: {}", path.display(), e)),
            }
        }
        removed
    }
}

impl Drop for IntermediateFiles {
    fn drop(&mut self) {
        self.remove_all();
    }
}
