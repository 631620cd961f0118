use compile_shaders::{BuildConfig, CommandRunner, Invocation, ShaderError, ShaderResult};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Flags whose value is a file the real compiler would write
const OUTPUT_FLAGS: [&str; 3] = ["-o", "-Fo", "/Fo"];

/// A call seen by [`RecordingRunner`], with the argument paths that existed at the time
#[derive(Debug, Clone)]
pub struct Call {
    pub invocation: Invocation,
    pub existing_files: Vec<PathBuf>,
}

impl Call {
    pub fn tool(&self) -> String {
        self.invocation.tool_name()
    }

    pub fn args(&self) -> Vec<String> {
        self.invocation.args_lossy()
    }
}

/// Records every invocation and writes an empty file wherever the compiler would
/// write its output
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: RefCell<Vec<Call>>,
    pub lookups: RefCell<Vec<Invocation>>,
    fail: Option<(String, usize, i32)>,
    missing_xcrun_tools: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `nth` (1-based) run of `tool` with `code`
    pub fn failing(tool: &str, nth: usize, code: i32) -> Self {
        Self {
            fail: Some((tool.to_string(), nth, code)),
            ..Self::default()
        }
    }

    /// Make `xcrun -f <tool>` fail
    #[allow(dead_code)]
    pub fn without_xcrun_tool(mut self, tool: &str) -> Self {
        self.missing_xcrun_tools.push(tool.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, tool: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.tool() == tool).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> ShaderResult<()> {
        let existing_files = invocation
            .args
            .iter()
            .map(PathBuf::from)
            .filter(|p| p.is_file())
            .collect();
        self.calls.borrow_mut().push(Call {
            invocation: invocation.clone(),
            existing_files,
        });

        let tool = invocation.tool_name();
        if let Some((fail_tool, nth, code)) = &self.fail {
            let seen = self.calls.borrow().iter().filter(|c| c.tool() == tool).count();
            if *fail_tool == tool && seen == *nth {
                // a crashing compiler may leave a partial output behind
                write_outputs(invocation);
                return Err(ShaderError::CompilerFailure {
                    tool,
                    code: Some(*code),
                });
            }
        }

        write_outputs(invocation);
        Ok(())
    }

    fn capture(&self, invocation: &Invocation) -> ShaderResult<String> {
        self.lookups.borrow_mut().push(invocation.clone());
        let tool = invocation.args_lossy().last().cloned().unwrap_or_default();
        if self.missing_xcrun_tools.contains(&tool) {
            return Err(ShaderError::CompilerFailure {
                tool: invocation.tool_name(),
                code: Some(72),
            });
        }
        Ok(format!("/Toolchains/usr/bin/{}\n", tool))
    }
}

fn write_outputs(invocation: &Invocation) {
    for flag in OUTPUT_FLAGS {
        if let Some(path) = invocation.value_of(flag) {
            let path = Path::new(path);
            if path.parent().map_or(true, |p| p.as_os_str().is_empty() || p.is_dir()) {
                std::fs::write(path, b"").unwrap();
            }
        }
    }
}

/// Temporary project directory, removed on drop
pub struct Scratch {
    pub root: PathBuf,
}

impl Scratch {
    pub fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!("compile_shaders_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Create an empty executable named `name` under `dir`
    #[allow(dead_code)]
    pub fn tool(&self, dir: &str, name: &str) -> PathBuf {
        let dir = self.root.join(dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}{}", name, std::env::consts::EXE_SUFFIX));
        std::fs::write(&path, b"").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    /// Files directly under `dir` with the given extension
    pub fn files_with_extension(&self, dir: &Path, ext: &str) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| e.path())
                    .filter(|p| p.extension().is_some_and(|e| e == ext))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// Default config without the machine-specific dxc search directory
#[allow(dead_code)]
pub fn isolated_config() -> BuildConfig {
    let mut config = BuildConfig::default();
    config.tools.dxc_search_dirs.clear();
    config
}
