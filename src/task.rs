//! Shader stages and per-shader build tasks

use crate::error::{ShaderError, ShaderResult};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Shader pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    pub const ALL: [Stage; 2] = [Stage::Vertex, Stage::Fragment];

    /// Name used in file names (`Shader.vertex.hlsl`)
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        }
    }

    /// Stage argument for `glslang -S`
    pub fn glslang_stage(&self) -> &'static str {
        match self {
            Stage::Vertex => "vert",
            Stage::Fragment => "frag",
        }
    }

    /// HLSL entry point function
    pub fn hlsl_entry_point(&self) -> &'static str {
        match self {
            Stage::Vertex => "VertexMain",
            Stage::Fragment => "FragmentMain",
        }
    }

    /// Shader Model 6 target profile (DXC)
    pub fn dxil_profile(&self) -> &'static str {
        match self {
            Stage::Vertex => "vs_6_0",
            Stage::Fragment => "ps_6_0",
        }
    }

    /// Shader Model 5.1 target profile (FXC)
    pub fn dxbc_profile(&self) -> &'static str {
        match self {
            Stage::Vertex => "vs_5_1",
            Stage::Fragment => "ps_5_1",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = ShaderError;

    fn from_str(s: &str) -> ShaderResult<Self> {
        match s.to_lowercase().as_str() {
            "vertex" | "vert" => Ok(Stage::Vertex),
            "fragment" | "frag" | "pixel" => Ok(Stage::Fragment),
            _ => Err(ShaderError::UnknownStage(s.to_string())),
        }
    }
}

/// One shader to build: where it comes from, what stage it is, where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderTask {
    pub source: PathBuf,
    pub stage: Stage,
    pub output: PathBuf,
}

impl ShaderTask {
    pub fn new(source: impl Into<PathBuf>, stage: Stage, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            stage,
            output: output.into(),
        }
    }

    /// Copy of this task with `.{suffix}` appended to the source and/or output path
    pub fn with_suffixes(&self, in_suffix: Option<&str>, out_suffix: Option<&str>) -> Self {
        Self {
            source: append_suffix(&self.source, in_suffix),
            stage: self.stage,
            output: append_suffix(&self.output, out_suffix),
        }
    }
}

/// Apply [`ShaderTask::with_suffixes`] to every task
pub fn with_suffixes(tasks: &[ShaderTask], in_suffix: Option<&str>, out_suffix: Option<&str>) -> Vec<ShaderTask> {
    tasks
        .iter()
        .map(|task| task.with_suffixes(in_suffix, out_suffix))
        .collect()
}

/// The vertex + fragment pair every build starts from.
///
/// Sources are `<root>/<name>.<stage>`, outputs `<root>/<data_dir>/<name>.<stage>`;
/// backends add their own extensions.
pub fn canonical_tasks(root: &Path, data_dir: &Path, shader_name: &str) -> Vec<ShaderTask> {
    let out_dir = root.join(data_dir);
    Stage::ALL
        .iter()
        .map(|stage| {
            let file = format!("{}.{}", shader_name, stage.name());
            ShaderTask::new(root.join(&file), *stage, out_dir.join(&file))
        })
        .collect()
}

fn append_suffix(path: &Path, suffix: Option<&str>) -> PathBuf {
    match suffix {
        Some(suffix) => {
            let mut raw = OsString::from(path.as_os_str());
            raw.push(".");
            raw.push(suffix);
            PathBuf::from(raw)
        },
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks() -> Vec<ShaderTask> {
        vec![
            ShaderTask::new("Shader.vertex", Stage::Vertex, "Data/Shader.vertex"),
            ShaderTask::new("Shader.fragment", Stage::Fragment, "Data/Shader.fragment"),
        ]
    }

    #[test]
    fn test_no_suffix_is_identity() {
        let tasks = tasks();
        assert_eq!(with_suffixes(&tasks, None, None), tasks);
    }

    #[test]
    fn test_input_suffix_only() {
        let task = ShaderTask::new("Shader.vertex", Stage::Vertex, "Data/Shader.vertex");
        let hlsl = task.with_suffixes(Some("hlsl"), None);
        assert_eq!(hlsl.source, PathBuf::from("Shader.vertex.hlsl"));
        assert_eq!(hlsl.output, PathBuf::from("Data/Shader.vertex"));
        assert_eq!(hlsl.stage, Stage::Vertex);
    }

    #[test]
    fn test_both_suffixes() {
        let task = ShaderTask::new("Shader.fragment", Stage::Fragment, "Data/Shader.fragment");
        let spirv = task.with_suffixes(Some("glsl"), Some("spv"));
        assert_eq!(spirv.source, PathBuf::from("Shader.fragment.glsl"));
        assert_eq!(spirv.output, PathBuf::from("Data/Shader.fragment.spv"));
        // original is untouched
        assert_eq!(task.source, PathBuf::from("Shader.fragment"));
    }

    #[test]
    fn test_parse_stage() {
        assert_eq!("vert".parse::<Stage>().unwrap(), Stage::Vertex);
        assert_eq!("Vertex".parse::<Stage>().unwrap(), Stage::Vertex);
        assert_eq!("frag".parse::<Stage>().unwrap(), Stage::Fragment);
        assert_eq!("pixel".parse::<Stage>().unwrap(), Stage::Fragment);
        assert_eq!(
            "geometry".parse::<Stage>(),
            Err(ShaderError::UnknownStage("geometry".to_string()))
        );
    }

    #[test]
    fn test_stage_profiles() {
        assert_eq!(Stage::Vertex.hlsl_entry_point(), "VertexMain");
        assert_eq!(Stage::Fragment.hlsl_entry_point(), "FragmentMain");
        assert_eq!(Stage::Vertex.dxil_profile(), "vs_6_0");
        assert_eq!(Stage::Fragment.dxil_profile(), "ps_6_0");
        assert_eq!(Stage::Vertex.dxbc_profile(), "vs_5_1");
        assert_eq!(Stage::Fragment.dxbc_profile(), "ps_5_1");
        assert_eq!(Stage::Vertex.glslang_stage(), "vert");
        assert_eq!(Stage::Fragment.glslang_stage(), "frag");
    }

    #[test]
    fn test_canonical_tasks() {
        let tasks = canonical_tasks(Path::new("proj"), Path::new("Data"), "Shader");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].stage, Stage::Vertex);
        assert_eq!(tasks[0].source, Path::new("proj").join("Shader.vertex"));
        assert_eq!(tasks[0].output, Path::new("proj").join("Data").join("Shader.vertex"));
        assert_eq!(tasks[1].stage, Stage::Fragment);
        assert_eq!(tasks[1].source, Path::new("proj").join("Shader.fragment"));
    }
}
