use super::{BackendKind, ShaderBackend};
use crate::error::ShaderResult;
use crate::output;
use crate::runner::{CommandRunner, Invocation};
use crate::task::ShaderTask;
use std::path::PathBuf;

/// DXIL (Shader Model 6) backend driving dxc
#[derive(Debug, Clone)]
pub struct DxilBackend {
    dxc: PathBuf,
    defines: Vec<String>,
    flags: Vec<String>,
}

impl DxilBackend {
    pub fn new(dxc: impl Into<PathBuf>, defines: Vec<String>, flags: Vec<String>) -> Self {
        Self {
            dxc: dxc.into(),
            defines,
            flags,
        }
    }

    /// `dxc -D<define>… <flags…> -E <entry> -T <profile> -Fo <out> <in>`
    pub fn invocation(&self, task: &ShaderTask) -> Invocation {
        Invocation::new(&self.dxc)
            .args(self.defines.iter().map(|d| format!("-D{}", d)))
            .args(&self.flags)
            .args(["-E", task.stage.hlsl_entry_point()])
            .args(["-T", task.stage.dxil_profile()])
            .arg("-Fo")
            .arg(&task.output)
            .arg(&task.source)
    }
}

impl ShaderBackend for DxilBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Dxil
    }

    fn build(&self, tasks: &[ShaderTask], runner: &dyn CommandRunner) -> ShaderResult<Vec<PathBuf>> {
        let mut outputs = Vec::with_capacity(tasks.len());
        for task in tasks {
            output::compiling(&format!(
                "{} (dxil, {})",
                task.source.display(),
                task.stage.dxil_profile()
            ));
            runner.run(&self.invocation(task))?;
            outputs.push(task.output.clone());
        }
        Ok(outputs)
    }
}
