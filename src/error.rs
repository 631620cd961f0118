//! Shader build error types

use std::fmt;

/// Shader build error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// A compiler executable could not be located
    ToolNotFound { tool: String, detail: String },
    /// A compiler ran and exited unsuccessfully (`code` is `None` when killed by a signal)
    CompilerFailure { tool: String, code: Option<i32> },
    /// Stage name outside the known set
    UnknownStage(String),
    /// A compiler was found but could not be started
    Spawn { tool: String, message: String },
    /// I/O error
    Io(String),
    /// Unreadable or malformed configuration
    Config(String),
}

impl ShaderError {
    pub fn tool_not_found(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ToolNotFound {
            tool: tool.into(),
            detail: detail.into(),
        }
    }

    /// Process exit code for this error.
    ///
    /// A failing compiler's own exit code is passed through; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CompilerFailure { code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToolNotFound { tool, detail } => write!(f, "could not find `{}`: {}", tool, detail),
            Self::CompilerFailure { tool, code: Some(code) } => {
                write!(f, "`{}` failed with exit code {}", tool, code)
            },
            Self::CompilerFailure { tool, code: None } => write!(f, "`{}` was terminated by a signal", tool),
            Self::UnknownStage(stage) => write!(
                f,
                "unknown shader stage '{}'. Supported: vertex (vert), fragment (frag, pixel)",
                stage
            ),
            Self::Spawn { tool, message } => write!(f, "failed to run `{}`: {}", tool, message),
            Self::Io(msg) => write!(f, "io error: {}", msg),
            Self::Config(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for ShaderError {}

impl From<std::io::Error> for ShaderError {
    fn from(e: std::io::Error) -> Self {
        ShaderError::Io(e.to_string())
    }
}

/// Result type for shader build operations
pub type ShaderResult<T> = Result<T, ShaderError>;
