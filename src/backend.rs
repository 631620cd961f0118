//! Shader compiler backends
//!
//! Each backend turns a list of [`ShaderTask`]s into compiled binaries for one graphics API
//! by driving that API's command-line compiler.

mod dxbc;
mod dxil;
mod metal;
mod spirv;

pub use dxbc::DxbcBackend;
pub use dxil::DxilBackend;
pub use metal::{air_path, MetalBackend};
pub use spirv::SpirvBackend;

use crate::error::ShaderResult;
use crate::runner::CommandRunner;
use crate::task::ShaderTask;
use std::fmt;
use std::path::PathBuf;

/// Which compiled form a backend produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Metal library via xcrun metal/metallib
    Metal,
    /// SPIR-V via glslang
    Spirv,
    /// DXIL via dxc
    Dxil,
    /// DXBC via fxc
    Dxbc,
}

impl BackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Metal => "metal",
            BackendKind::Spirv => "spirv",
            BackendKind::Dxil => "dxil",
            BackendKind::Dxbc => "dxbc",
        }
    }

    /// Extension appended to task sources before they reach this backend
    pub fn input_suffix(&self) -> &'static str {
        match self {
            BackendKind::Metal => "metal",
            BackendKind::Spirv => "glsl",
            BackendKind::Dxil | BackendKind::Dxbc => "hlsl",
        }
    }

    /// Extension appended to task outputs (`None` for Metal, which links one library instead)
    pub fn output_suffix(&self) -> Option<&'static str> {
        match self {
            BackendKind::Metal => None,
            BackendKind::Spirv => Some("spv"),
            BackendKind::Dxil => Some("dxb"),
            BackendKind::Dxbc => Some("fxb"),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A shader compiler backend
pub trait ShaderBackend {
    fn kind(&self) -> BackendKind;

    /// Compile every task, returning the files written.
    ///
    /// Tasks arrive with final source and output paths; the first failing compiler call
    /// aborts the build.
    fn build(&self, tasks: &[ShaderTask], runner: &dyn CommandRunner) -> ShaderResult<Vec<PathBuf>>;
}
