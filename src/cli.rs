use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "compile-shaders")]
#[command(version, about = "Compile shaders with the platform shader toolchains", long_about = None)]
#[command(after_help = "With no arguments, builds ./Shader.* into ./Data using ./shaders.json if present.")]
pub struct Cli {
    /// Project root containing the shader sources
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// JSON config file (default: <root>/shaders.json when it exists)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Metal debug build: keep sources in a separate dSYM
    #[arg(long)]
    pub debug: bool,

    /// Print compiler commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Print each compiler command before running it
    #[arg(short, long)]
    pub verbose: bool,
}
