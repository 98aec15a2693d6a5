//! resource-ids CLI
//!
//! Scans metadata directories and regenerates the resource header/source
//! pair when anything changed.
//!
//! Exit status: `0` regenerated, `1` already up to date, `2` failure.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use resource_ids_build::{EXIT_FAILURE, GeneratorConfig, generate_with_config, logging};

/// Generate hierarchical resource ID tables from `*.meta` files
#[derive(Parser, Debug)]
#[command(name = "resource-ids", version)]
#[command(about = "Generate hierarchical resource ID tables from *.meta files")]
struct Cli {
    /// Directories scanned for metadata files (not recursive)
    #[arg(required = true)]
    dirs: Vec<PathBuf>,

    /// Generator configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving the generated header and source
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Cache store path (default: <OUT_DIR>/resources.cache.toml)
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Regenerate even when every input is up to date
    #[arg(long, default_value = "false")]
    force: bool,

    /// Log filter (trace, debug, info, warn, error, off)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<GeneratorConfig, String> {
        let mut config = GeneratorConfig::new(self.dirs, self.out_dir);
        if let Some(path) = &self.config {
            config = config.with_file(path).map_err(|e| e.to_string())?;
        }
        if self.cache.is_some() {
            config.cache = self.cache;
        }
        config.force = self.force;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.log_level.as_deref()) {
        eprintln!("Error: {}", e);
        process::exit(EXIT_FAILURE);
    }

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_FAILURE);
        }
    };

    match generate_with_config(&config) {
        Ok(status) => process::exit(status.exit_code()),
        Err(e) => {
            tracing::error!(error = %e, "generation failed");
            eprintln!("Error: {}", e);
            process::exit(EXIT_FAILURE);
        }
    }
}
