use super::{BackendKind, ShaderBackend};
use crate::error::ShaderResult;
use crate::output;
use crate::runner::{CommandRunner, Invocation};
use crate::task::ShaderTask;
use std::path::PathBuf;

/// DXBC (Shader Model 5.1) backend driving the legacy fxc compiler.
///
/// fxc only ships with the Windows SDK and takes `/`-style switches.
#[derive(Debug, Clone)]
pub struct DxbcBackend {
    fxc: PathBuf,
    flags: Vec<String>,
}

impl DxbcBackend {
    pub fn new(fxc: impl Into<PathBuf>, flags: Vec<String>) -> Self {
        Self { fxc: fxc.into(), flags }
    }

    /// `fxc <flags…> /E <entry> /T <profile> /Fo <out> <in>`
    pub fn invocation(&self, task: &ShaderTask) -> Invocation {
        Invocation::new(&self.fxc)
            .args(&self.flags)
            .args(["/E", task.stage.hlsl_entry_point()])
            .args(["/T", task.stage.dxbc_profile()])
            .arg("/Fo")
            .arg(&task.output)
            .arg(&task.source)
    }
}

impl ShaderBackend for DxbcBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Dxbc
    }

    fn build(&self, tasks: &[ShaderTask], runner: &dyn CommandRunner) -> ShaderResult<Vec<PathBuf>> {
        let mut outputs = Vec::with_capacity(tasks.len());
        for task in tasks {
            output::compiling(&format!(
                "{} (dxbc, {})",
                task.source.display(),
                task.stage.dxbc_profile()
            ));
            runner.run(&self.invocation(task))?;
            outputs.push(task.output.clone());
        }
        Ok(outputs)
    }
}
