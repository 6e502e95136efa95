use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use iv_core::{Config, ConfigFile};

#[derive(Debug, Parser)]
#[command(name = "iv", version, about = "Run iv scripts or read them from stdin")]
pub(crate) struct CliArgs {
    /// TOML file with startup settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Number format, as set by `)format`
    #[arg(long, value_name = "F")]
    pub format: Option<String>,
    /// Index origin, 0 or 1
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub origin: Option<i64>,
    /// Prompt shown before each interactive line
    #[arg(long, value_name = "P")]
    pub prompt: Option<String>,
    /// Random seed
    #[arg(long, value_name = "S", allow_negative_numbers = true)]
    pub seed: Option<i64>,
    /// Debug flags to enable, comma separated
    #[arg(long, value_name = "FLAGS", value_delimiter = ',')]
    pub debug: Vec<String>,
    /// Execute the arguments as input lines instead of reading files
    #[arg(short = 'e')]
    pub execute: bool,
    /// Show codes and help under error reports
    #[arg(short, long)]
    pub verbose: bool,
    /// Script files, or input lines with -e
    #[arg(value_name = "FILES")]
    pub positional: Vec<String>,
}

impl CliArgs {
    /// Settings from `--config`, then the individual flags on top.
    pub(crate) fn build_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::new();
        if let Some(path) = &self.config {
            let file = ConfigFile::load(path)?;
            config
                .apply(&file)
                .with_context(|| format!("in {}", path.display()))?;
        }
        let overrides = ConfigFile {
            format: self.format.clone(),
            origin: self.origin,
            prompt: self.prompt.clone(),
            seed: self.seed,
            debug: self.debug.clone(),
        };
        config.apply(&overrides).context("bad command-line setting")?;
        Ok(config)
    }
}
