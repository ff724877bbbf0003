use thiserror::Error;

pub const DEFAULT_MAX_PASSES: usize = 100;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for {parameter}: {reason}")]
    Invalid {
        parameter: &'static str,
        reason: &'static str,
    },
}

/// Tuning knobs for layout generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Upper bound on improvement passes; each pass commits at most one swap.
    pub max_passes: usize,
    /// Fixes the shuffle for reproducible layouts. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            seed: None,
        }
    }
}

#[derive(Default)]
pub struct LayoutConfigBuilder {
    max_passes: Option<usize>,
    seed: Option<u64>,
}

impl LayoutConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_passes(mut self, passes: usize) -> Self {
        self.max_passes = Some(passes);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<LayoutConfig, ConfigError> {
        let max_passes = self.max_passes.unwrap_or(DEFAULT_MAX_PASSES);
        if max_passes == 0 {
            return Err(ConfigError::Invalid {
                parameter: "max_passes",
                reason: "must be at least 1",
            });
        }
        Ok(LayoutConfig {
            max_passes,
            seed: self.seed,
        })
    }
}
