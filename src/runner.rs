//! External process execution
//!
//! Backends never touch `std::process` directly; they describe each compiler call as an
//! [`Invocation`] and hand it to a [`CommandRunner`]. [`SystemRunner`] runs it for real,
//! [`DryRunner`] only prints it.

use crate::error::{ShaderError, ShaderResult};
use crate::output;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A single compiler call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Short tool name for messages (`dxc` rather than `/opt/dxc/bin/dxc`)
    pub fn tool_name(&self) -> String {
        self.program
            .file_stem()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// Arguments as lossy strings, mostly for tests and logging
    pub fn args_lossy(&self) -> Vec<String> {
        self.args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    /// Value following `flag` in the argument list (`-o <path>`)
    pub fn value_of(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(|a| a.as_os_str())
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Runs compiler invocations
pub trait CommandRunner {
    /// Run to completion with inherited stdio; non-zero exit is `CompilerFailure`
    fn run(&self, invocation: &Invocation) -> ShaderResult<()>;

    /// Run and return trimmed stdout; non-zero exit is `CompilerFailure`
    fn capture(&self, invocation: &Invocation) -> ShaderResult<String>;

    /// Whether files produced by invocations actually exist afterwards
    fn produces_files(&self) -> bool {
        true
    }
}

/// Runs invocations as child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    /// Echo each command before running it
    pub verbose: bool,
}

impl SystemRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> ShaderResult<()> {
        if self.verbose {
            output::running(&invocation.to_string());
        }

        let status = invocation.command().status().map_err(|e| ShaderError::Spawn {
            tool: invocation.tool_name(),
            message: e.to_string(),
        })?;

        if !status.success() {
            return Err(ShaderError::CompilerFailure {
                tool: invocation.tool_name(),
                code: status.code(),
            });
        }

        Ok(())
    }

    fn capture(&self, invocation: &Invocation) -> ShaderResult<String> {
        if self.verbose {
            output::running(&invocation.to_string());
        }

        let out = invocation.command().output().map_err(|e| ShaderError::Spawn {
            tool: invocation.tool_name(),
            message: e.to_string(),
        })?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            if !stderr.trim().is_empty() {
                output::warning(stderr.trim());
            }
            return Err(ShaderError::CompilerFailure {
                tool: invocation.tool_name(),
                code: out.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
    }
}

/// Prints invocations instead of running them
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunner;

impl CommandRunner for DryRunner {
    fn run(&self, invocation: &Invocation) -> ShaderResult<()> {
        println!("{}", invocation);
        Ok(())
    }

    /// Tool lookups resolve to the bare tool name (`xcrun -sdk macosx -f metal` → `metal`)
    fn capture(&self, invocation: &Invocation) -> ShaderResult<String> {
        println!("{}", invocation);
        Ok(invocation
            .args
            .last()
            .map(|a| a.to_string_lossy().into_owned())
            .unwrap_or_default())
    }

    fn produces_files(&self) -> bool {
        false
    }
}

/// Display helper for paths relative to the project root
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
