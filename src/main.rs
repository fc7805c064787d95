//! picseek - Entry Point

use clap::Parser;
use picseek::config::ResolvedConfig;
use picseek::model::AppError;
use picseek::view::ColorConfig;
use std::path::PathBuf;
use tracing::info;

/// picseek - search images from the terminal
#[derive(Parser, Debug)]
#[command(name = "picseek")]
#[command(version)]
#[command(about = "TUI for paged image search with load-more pagination and a detail view")]
pub struct Args {
    /// Initial search term (defaults to the configured default query)
    pub query: Option<String>,

    /// API key for the search endpoint
    #[arg(long)]
    pub api_key: Option<String>,

    /// Results requested per page
    #[arg(long, value_parser = clap::value_parser!(u32).range(3..=200))]
    pub per_page: Option<u32>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = setup(&args)?;

    let color = ColorConfig::from_env_and_args(args.no_color);
    picseek::view::run(&config, color)?;

    Ok(())
}

/// Resolve configuration and start logging before the terminal is taken over.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args
fn setup(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = picseek::config::load_config_with_precedence(args.config.clone())?;
    let merged = picseek::config::merge_config(config_file);
    let with_env = picseek::config::apply_env_overrides(merged);
    let config = picseek::config::apply_cli_overrides(
        with_env,
        args.query.clone(),
        args.api_key.clone(),
        args.per_page,
    );
    config.validate()?;

    picseek::logging::init(&config.log_file_path)?;

    info!(
        default_query = %config.default_query,
        base_url = %config.base_url,
        per_page = config.per_page,
        has_api_key = config.api_key.is_some(),
        "Configuration loaded and resolved"
    );

    Ok(config)
}
