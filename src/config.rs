//! Build configuration
//!
//! Every field has a default matching the stock project layout, so a missing
//! `shaders.json` (or any missing key inside it) means "build like always".
//!
//! ```json
//! {
//!     "shader_name": "Shader",
//!     "data_dir": "Data",
//!     "metal": { "sdk": "macosx", "min_version": "10.11", "debug": false },
//!     "dxil": { "defines": ["D3D12"] },
//!     "tools": { "dxc_search_dirs": ["/opt/dxc/bin"] }
//! }
//! ```

use crate::error::{ShaderError, ShaderResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the project root
pub const CONFIG_FILE_NAME: &str = "shaders.json";

/// Top-level build configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Base name of every shader file (`Shader.vertex.hlsl`)
    pub shader_name: String,
    /// Output directory, relative to the project root
    pub data_dir: PathBuf,
    pub metal: MetalConfig,
    pub spirv: SpirvConfig,
    pub dxil: DxilConfig,
    pub dxbc: DxbcConfig,
    pub tools: ToolPaths,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            shader_name: "Shader".to_string(),
            data_dir: PathBuf::from("Data"),
            metal: MetalConfig::default(),
            spirv: SpirvConfig::default(),
            dxil: DxilConfig::default(),
            dxbc: DxbcConfig::default(),
            tools: ToolPaths::default(),
        }
    }
}

/// Metal toolchain settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetalConfig {
    /// SDK passed to `xcrun -sdk`
    pub sdk: String,
    /// Platform part of `-std=<platform>-<language>`
    pub platform: String,
    /// Language part of `-std=<platform>-<language>`
    pub language: String,
    /// Deployment target for `-m<sdk>-version-min=`
    pub min_version: String,
    /// Library file name inside the data directory
    pub library: String,
    /// Extra compiler flags appended after the defaults
    pub cflags: Vec<String>,
    /// Link with embedded sources and split them off into a dSYM
    pub debug: bool,
    /// Sources relative to the project root, replacing the per-stage files (e.g. `["Shader.metal"]`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<PathBuf>,
}

impl Default for MetalConfig {
    fn default() -> Self {
        Self {
            sdk: "macosx".to_string(),
            platform: "macos".to_string(),
            language: "metal1.1".to_string(),
            min_version: "10.11".to_string(),
            library: "Shader.metallib".to_string(),
            cflags: Vec::new(),
            debug: false,
            sources: Vec::new(),
        }
    }
}

impl MetalConfig {
    /// Full compiler flag list: warnings, optimization, language standard, deployment target
    pub fn compile_flags(&self) -> Vec<String> {
        let mut flags = vec![
            "-Wall".to_string(),
            "-O3".to_string(),
            format!("-std={}-{}", self.platform, self.language),
            format!("-m{}-version-min={}", self.sdk, self.min_version),
        ];
        flags.extend(self.cflags.iter().cloned());
        flags
    }
}

/// glslang settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpirvConfig {
    /// Passed through to glslang before the output flag
    pub flags: Vec<String>,
}

/// DXC settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DxilConfig {
    /// Preprocessor defines, each passed as `-D<define>`
    pub defines: Vec<String>,
    pub flags: Vec<String>,
}

impl Default for DxilConfig {
    fn default() -> Self {
        Self {
            defines: vec!["D3D12".to_string()],
            flags: Vec::new(),
        }
    }
}

/// FXC settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DxbcConfig {
    pub flags: Vec<String>,
}

/// Explicit tool locations and extra search directories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glslang: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dxc: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fxc: Option<PathBuf>,
    /// Searched after `PATH` when looking for dxc
    pub dxc_search_dirs: Vec<PathBuf>,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            glslang: None,
            dxc: None,
            fxc: None,
            dxc_search_dirs: vec![PathBuf::from("/opt/dxc/bin")],
        }
    }
}

impl BuildConfig {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> ShaderResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ShaderError::Config(format!("failed to read {}: {}", path.display(), e)))?;

        Self::from_json(&content).map_err(|e| match e {
            ShaderError::Config(msg) => ShaderError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_json(content: &str) -> ShaderResult<Self> {
        serde_json::from_str(content).map_err(|e| ShaderError::Config(e.to_string()))
    }

    /// `<root>/shaders.json` if it exists, defaults otherwise
    pub fn discover(root: &Path) -> ShaderResult<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}
