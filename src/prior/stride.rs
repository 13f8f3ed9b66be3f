//! Per-scale stride selection.
//!
//! The stride used when tiling a scale across the image is `scale /
//! divisor`, with the divisor looked up in an explicit table. The table
//! replaces the hard-coded `if scale == 32 … if scale == 64 … else`
//! chain of the original generator, so a new feature-map geometry is a
//! configuration change rather than a code change.

use serde::{Deserialize, Serialize};

use super::params::ConfigError;

/// Maps one box scale to the stride divisor used when tiling it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrideRule {
    /// Box scale in image pixels.
    pub scale: u32,
    /// The tiling stride for this scale is `scale / divisor`.
    pub divisor: u32,
}

/// Closed stride policy: every scale resolves to exactly one stride.
///
/// Scales listed in `duplicate_fallback_scales` additionally tile a
/// second time at the fallback stride. This reproduces the historical
/// generator, where the quarter-stride rule for scale 32 and the
/// fallback were independent branches and the 32 scale was emitted
/// twice. The duplicate pass is almost certainly a defect in that
/// generator; it is off by default and warned about when it fires, but
/// available for bit-parity with models trained against its output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StridePolicy {
    /// Scale-specific divisors; first match wins.
    #[serde(default = "default_rules")]
    pub rules: Vec<StrideRule>,
    /// Divisor applied to scales without a dedicated rule.
    #[serde(default = "default_fallback_divisor")]
    pub fallback_divisor: u32,
    /// Scales that tile a second time at the fallback stride.
    #[serde(default)]
    pub duplicate_fallback_scales: Vec<u32>,
}

fn default_rules() -> Vec<StrideRule> {
    vec![
        StrideRule {
            scale: 32,
            divisor: 4,
        },
        StrideRule {
            scale: 64,
            divisor: 2,
        },
    ]
}

fn default_fallback_divisor() -> u32 {
    1
}

impl Default for StridePolicy {
    /// Policy matching the original detection head: quarter stride for
    /// the 32 scale, half stride for the 64 scale, full stride
    /// otherwise. No duplicate passes.
    fn default() -> Self {
        Self {
            rules: default_rules(),
            fallback_divisor: default_fallback_divisor(),
            duplicate_fallback_scales: Vec::new(),
        }
    }
}

impl StridePolicy {
    /// Default policy with the historical duplicate pass enabled for
    /// the given scales (the original generator duplicated scale 32).
    pub fn with_duplicate_fallback(scales: &[u32]) -> Self {
        Self {
            duplicate_fallback_scales: scales.to_vec(),
            ..Self::default()
        }
    }

    /// Rejects zero divisors, which would make the stride undefined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for rule in &self.rules {
            if rule.divisor == 0 {
                return Err(ConfigError::ZeroStrideDivisor {
                    scale: Some(rule.scale),
                });
            }
        }
        if self.fallback_divisor == 0 {
            return Err(ConfigError::ZeroStrideDivisor { scale: None });
        }
        Ok(())
    }

    /// Resolves the tiling stride for `scale`: the primary stride, plus
    /// the stride of the duplicate fallback pass when one is configured
    /// for this scale.
    ///
    /// `scale / divisor` truncates; a divisor larger than the scale
    /// would yield stride 0, so the stride is floored at 1.
    pub fn strides_for(&self, scale: u32) -> (u32, Option<u32>) {
        let fallback = (scale / self.fallback_divisor).max(1);
        let rule = self.rules.iter().find(|r| r.scale == scale);
        let primary = rule.map_or(fallback, |r| (scale / r.divisor).max(1));
        // The historical double fire only affected scales that also had
        // a dedicated rule; unmatched scales tile once at the fallback.
        let duplicate = (rule.is_some() && self.duplicate_fallback_scales.contains(&scale))
            .then_some(fallback);
        (primary, duplicate)
    }
}
