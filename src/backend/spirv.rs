use super::{BackendKind, ShaderBackend};
use crate::error::ShaderResult;
use crate::output;
use crate::runner::{CommandRunner, Invocation};
use crate::task::ShaderTask;
use std::path::PathBuf;

/// SPIR-V backend driving glslang
#[derive(Debug, Clone)]
pub struct SpirvBackend {
    glslang: PathBuf,
    flags: Vec<String>,
}

impl SpirvBackend {
    pub fn new(glslang: impl Into<PathBuf>, flags: Vec<String>) -> Self {
        Self {
            glslang: glslang.into(),
            flags,
        }
    }

    /// `glslang -V -S <stage> <flags…> -o <out> <in>`
    pub fn invocation(&self, task: &ShaderTask) -> Invocation {
        Invocation::new(&self.glslang)
            .args(["-V", "-S", task.stage.glslang_stage()])
            .args(&self.flags)
            .arg("-o")
            .arg(&task.output)
            .arg(&task.source)
    }
}

impl ShaderBackend for SpirvBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Spirv
    }

    fn build(&self, tasks: &[ShaderTask], runner: &dyn CommandRunner) -> ShaderResult<Vec<PathBuf>> {
        let mut outputs = Vec::with_capacity(tasks.len());
        for task in tasks {
            output::compiling(&format!("{} (spirv, {})", task.source.display(), task.stage));
            runner.run(&self.invocation(task))?;
            outputs.push(task.output.clone());
        }
        Ok(outputs)
    }
}
