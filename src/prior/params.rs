//! Prior-box configuration and validation.

use serde::{Deserialize, Serialize};

use super::stride::StridePolicy;

/// Variance applied to every coordinate when none is configured.
pub const DEFAULT_VARIANCE: f32 = 0.1;

/// Priors per grid cell for three-scale configurations. The detection
/// head this scheme was built for lays out its output channels for 21
/// priors per cell when fed three scales, and a single prior otherwise.
const THREE_SCALE_PRIORS: usize = 21;

/// Raw prior-box configuration as read from the host configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriorBoxConfig {
    /// Box scales in image pixels; one tiling pass per entry, in order.
    pub scales: Vec<u32>,
    /// Either one value broadcast to all four coordinates or four
    /// per-coordinate values (x_min, y_min, x_max, y_max). Empty
    /// selects the default of 0.1.
    #[serde(default)]
    pub variance: Vec<f32>,
    /// Sub-cell center offset. Retained for compatibility with the
    /// external configuration surface; the tiling math fixes the
    /// half-cell offset.
    #[serde(default = "default_offset")]
    pub offset: f32,
    #[serde(default)]
    pub stride_policy: StridePolicy,
}

fn default_offset() -> f32 {
    0.5
}

impl Default for PriorBoxConfig {
    fn default() -> Self {
        Self {
            scales: Vec::new(),
            variance: Vec::new(),
            offset: default_offset(),
            stride_policy: StridePolicy::default(),
        }
    }
}

/// Reasons why prior-box configuration is rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    EmptyScales,
    ZeroScale {
        index: usize,
    },
    /// The variance list must hold zero, one, or four entries.
    InvalidVarianceCount {
        found: usize,
    },
    NonPositiveVariance {
        index: usize,
        value: f32,
    },
    /// `None` refers to the fallback divisor.
    ZeroStrideDivisor {
        scale: Option<u32>,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptyScales => write!(f, "at least one box scale is required"),
            ConfigError::ZeroScale { index } => {
                write!(f, "box scale at index {index} must be positive")
            }
            ConfigError::InvalidVarianceCount { found } => write!(
                f,
                "variance must hold 1 or 4 values (or none for the default), got {found}"
            ),
            ConfigError::NonPositiveVariance { index, value } => {
                write!(f, "variance at index {index} must be positive, got {value}")
            }
            ConfigError::ZeroStrideDivisor { scale: Some(scale) } => {
                write!(f, "stride divisor for scale {scale} must be positive")
            }
            ConfigError::ZeroStrideDivisor { scale: None } => {
                write!(f, "fallback stride divisor must be positive")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validated, immutable parameters derived from [`PriorBoxConfig`].
#[derive(Clone, Debug)]
pub struct PriorBoxParams {
    scales: Vec<u32>,
    variance: Vec<f32>,
    priors_per_cell: usize,
    offset: f32,
    stride_policy: StridePolicy,
}

impl PriorBoxParams {
    /// Validates the raw configuration and derives the per-cell prior
    /// count. Pure; no side effects.
    pub fn from_config(config: PriorBoxConfig) -> Result<Self, ConfigError> {
        if config.scales.is_empty() {
            return Err(ConfigError::EmptyScales);
        }
        if let Some(index) = config.scales.iter().position(|&s| s == 0) {
            return Err(ConfigError::ZeroScale { index });
        }

        let variance = match config.variance.len() {
            0 => vec![DEFAULT_VARIANCE],
            1 | 4 => config.variance,
            found => return Err(ConfigError::InvalidVarianceCount { found }),
        };
        for (index, &value) in variance.iter().enumerate() {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveVariance { index, value });
            }
        }

        config.stride_policy.validate()?;

        let priors_per_cell = if config.scales.len() == 3 {
            THREE_SCALE_PRIORS
        } else {
            1
        };

        Ok(Self {
            scales: config.scales,
            variance,
            priors_per_cell,
            offset: config.offset,
            stride_policy: config.stride_policy,
        })
    }

    /// Configured box scales, in tiling order.
    pub fn scales(&self) -> &[u32] {
        &self.scales
    }

    /// Validated variance values; length is always 1 or 4.
    pub fn variance(&self) -> &[f32] {
        &self.variance
    }

    /// Priors allocated per grid cell.
    pub fn priors_per_cell(&self) -> usize {
        self.priors_per_cell
    }

    /// Configured sub-cell offset. Unused by the tiling math; exposed
    /// for hosts that mirror the configuration elsewhere.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn stride_policy(&self) -> &StridePolicy {
        &self.stride_policy
    }
}
