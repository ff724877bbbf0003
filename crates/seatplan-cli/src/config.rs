use crate::cli::LayoutArgs;
use crate::error::{CliError, Result};
use seatplan::engine::config::{LayoutConfig, LayoutConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialLayoutConfig {
    #[serde(rename = "max-passes")]
    max_passes: Option<usize>,
    seed: Option<u64>,
}

/// Settings read from the optional TOML file, before CLI overrides are applied.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    layout: Option<PartialLayoutConfig>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` when given; otherwise every setting falls back to its default.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final layout settings. Precedence: command-line flags, then `-S`
    /// values, then the file, then built-in defaults.
    pub fn merge_with_cli(mut self, args: &LayoutArgs) -> Result<LayoutConfig> {
        self.apply_set_values(&args.set_values)?;
        let file = self.layout.take().unwrap_or_default();

        let mut builder = LayoutConfigBuilder::new()
            .maybe_seed(args.seed.or(file.seed));
        if let Some(passes) = args.max_passes.or(file.max_passes) {
            builder = builder.max_passes(passes);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let layout = self.layout.get_or_insert_with(Default::default);

            match key.trim() {
                "layout.max-passes" => {
                    layout.max_passes = Some(value_str.trim().parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "layout.seed" => {
                    layout.seed = Some(value_str.trim().parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
