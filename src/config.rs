use crate::reveal::DEFAULT_STEP_DELAY;
use crate::{Error, Result};
use std::time::Duration;

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 10;
/// Percentage of cells blocked by a random fill.
pub const DEFAULT_DENSITY: u8 = 30;

/// Settings of the interactive visualizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualizerConfig {
    pub rows: usize,
    pub cols: usize,
    pub density: u8,
    pub step_delay: Duration,
    /// Seed for random fills; [None] draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for VisualizerConfig {
    fn default() -> VisualizerConfig {
        VisualizerConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            density: DEFAULT_DENSITY,
            step_delay: DEFAULT_STEP_DELAY,
            seed: None,
        }
    }
}

impl VisualizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid size {}x{} has no cells",
                self.rows, self.cols
            )));
        }
        if self.density > 100 {
            return Err(Error::InvalidConfig(format!(
                "density {} is not a percentage",
                self.density
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = VisualizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.step_delay, Duration::from_millis(150));
    }

    #[test]
    fn rejects_empty_grid_and_bad_density() {
        let config = VisualizerConfig {
            rows: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        let config = VisualizerConfig {
            density: 101,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
