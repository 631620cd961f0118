mod cli;

use clap::Parser;
use cli::Cli;
use compile_shaders::{
    output, BuildConfig, BuildSummary, CommandRunner, Driver, DryRunner, Platform, ShaderResult, SystemRunner,
    ToolLocator,
};
use std::time::Instant;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}

fn execute(cli: Cli) -> ShaderResult<()> {
    let start = Instant::now();

    let mut config = match &cli.config {
        Some(path) => BuildConfig::load(path)?,
        None => BuildConfig::discover(&cli.root)?,
    };
    if cli.debug {
        config.metal.debug = true;
    }

    let system = SystemRunner::new(cli.verbose);
    let runner: &dyn CommandRunner = if cli.dry_run { &DryRunner } else { &system };

    let driver = Driver::new(&cli.root, config, Platform::host(), ToolLocator::from_env(), runner);
    let summary = driver.run()?;

    report(&summary, start.elapsed().as_secs_f64());
    Ok(())
}

fn report(summary: &BuildSummary, secs: f64) {
    if summary.built.is_empty() {
        output::warning(&format!("no shader toolchain available on {}", summary.platform));
    }

    let built: Vec<&str> = summary.built.iter().map(|k| k.name()).collect();
    output::finished(&format!(
        "{} shader target(s) [{}] in {}",
        built.len(),
        built.join(", "),
        output::format_duration(secs)
    ));
}
