//! Compiler executable discovery
//!
//! Two ways to find a tool:
//! - [`ToolLocator::find`] walks a search path (normally `PATH`) like `which` does
//! - [`xcrun_find`] asks `xcrun` for a tool inside an Apple SDK

use crate::error::{ShaderError, ShaderResult};
use crate::runner::{CommandRunner, Invocation};
use std::path::{Path, PathBuf};

/// Searches a list of directories for executables
#[derive(Debug, Clone, Default)]
pub struct ToolLocator {
    search_dirs: Vec<PathBuf>,
}

impl ToolLocator {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Locator over the current `PATH`
    pub fn from_env() -> Self {
        let search_dirs = std::env::var_os("PATH")
            .map(|path| std::env::split_paths(&path).collect())
            .unwrap_or_default();
        Self { search_dirs }
    }

    /// Same locator with `extra` appended to the end of the search path
    pub fn with_extra_dirs<I>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut search_dirs = self.search_dirs.clone();
        search_dirs.extend(extra);
        Self { search_dirs }
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Find `name` in the search path
    pub fn find(&self, name: &str) -> ShaderResult<PathBuf> {
        for dir in &self.search_dirs {
            for candidate in candidates(dir, name) {
                if is_executable(&candidate) {
                    return Ok(candidate);
                }
            }
        }

        Err(ShaderError::tool_not_found(
            name,
            format!("not in any of {} search directories", self.search_dirs.len()),
        ))
    }

    /// Find `name`, treating absence as `None`
    pub fn find_optional(&self, name: &str) -> Option<PathBuf> {
        self.find(name).ok()
    }

    /// Use `configured` when set, otherwise search for `name`
    pub fn resolve(&self, name: &str, configured: Option<&Path>) -> ShaderResult<PathBuf> {
        match configured {
            Some(path) if is_executable(path) => Ok(path.to_path_buf()),
            Some(path) => Err(ShaderError::tool_not_found(
                name,
                format!("configured path {} is not an executable file", path.display()),
            )),
            None => self.find(name),
        }
    }
}

/// Resolve `tool` inside an Apple SDK with `xcrun -sdk <sdk> -f <tool>`
pub fn xcrun_find(runner: &dyn CommandRunner, sdk: &str, tool: &str) -> ShaderResult<PathBuf> {
    let invocation = Invocation::new("xcrun").args(["-sdk", sdk, "-f", tool]);
    let stdout = runner.capture(&invocation).map_err(|e| match e {
        ShaderError::CompilerFailure { .. } | ShaderError::Spawn { .. } => {
            ShaderError::tool_not_found(tool, format!("xcrun -sdk {} -f {}: {}", sdk, tool, e))
        },
        other => other,
    })?;

    match stdout.lines().next().map(str::trim) {
        Some(line) if !line.is_empty() => Ok(PathBuf::from(line)),
        _ => Err(ShaderError::tool_not_found(
            tool,
            format!("xcrun returned nothing for sdk {}", sdk),
        )),
    }
}

fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let suffix = std::env::consts::EXE_SUFFIX;
    if suffix.is_empty() || name.ends_with(suffix) {
        vec![dir.join(name)]
    } else {
        vec![dir.join(format!("{}{}", name, suffix)), dir.join(name)]
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
