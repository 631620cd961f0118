//! Shader build orchestration
//!
//! Compiles the project's vertex and fragment shaders with whichever platform toolchains
//! are available:
//!
//! - Metal library (`xcrun metal` + `metallib`) on macOS
//! - SPIR-V (`glslang`) wherever glslang is installed
//! - DXIL (`dxc`) on Windows, or anywhere dxc is installed
//! - DXBC (`fxc`) on Windows
//!
//! Nothing here parses shaders; the crate only builds command lines, runs them in order
//! and cleans up intermediate files.

pub mod backend;
pub mod config;
pub mod driver;
pub mod error;
pub mod locate;
pub mod output;
pub mod platform;
pub mod runner;
pub mod task;

pub use backend::{BackendKind, DxbcBackend, DxilBackend, MetalBackend, ShaderBackend, SpirvBackend};
pub use config::BuildConfig;
pub use driver::{BuildSummary, Driver};
pub use error::{ShaderError, ShaderResult};
pub use locate::ToolLocator;
pub use platform::Platform;
pub use runner::{CommandRunner, DryRunner, Invocation, SystemRunner};
pub use task::{ShaderTask, Stage};
