use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;
use rand::{SeedableRng, rngs::StdRng};

use crate::foundation::{
    core::{CompareKind, Direction, SortOrder},
    error::{SortError, SortResult},
};

/// Presentation-only toggles used to inspect what the engine is doing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugFlags {
    /// Paint every sorted span a single random color.
    pub span_colors: bool,
    /// Force the whole mask active, bleed every span to the row end and write gray levels.
    pub mask: bool,
    /// Replace the source with random noise before processing.
    pub source_noise: bool,
}

/// Immutable effect configuration passed explicitly into every stage.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectConfig {
    /// Pixel comparison policy.
    pub compare: CompareKind,
    /// Ascending or descending span order.
    pub order: SortOrder,
    /// Red-channel threshold; pixels below it are active.
    pub threshold: u8,
    /// Multiplier applied to the combined span length.
    pub scalar: f64,
    /// Positive: one-sided length jitter in `[0, n)`. Negative: symmetric jitter that may pull
    /// the span start to the left.
    pub noise_factor: i32,
    /// Screen direction spans are sorted toward.
    pub direction: Direction,
    /// Disable bleed: the written span is exactly the mask run.
    pub clean: bool,
    /// Swap mask polarity.
    pub invert: bool,
    /// Lossy merge write-back.
    pub crush: bool,
    /// Debug toggles.
    pub debug: DebugFlags,
    /// RNG seed. `None` draws one seed from entropy per run.
    pub seed: Option<u64>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            compare: CompareKind::Mean,
            order: SortOrder::Ascending,
            threshold: 110,
            scalar: 1.0,
            noise_factor: 0,
            direction: Direction::Right,
            clean: false,
            invert: false,
            crush: false,
            debug: DebugFlags::default(),
            seed: None,
        }
    }
}

impl EffectConfig {
    /// Reject values no pass can work with.
    pub fn validate(&self) -> SortResult<()> {
        if !self.scalar.is_finite() {
            return Err(SortError::validation("scalar must be a finite number"));
        }
        Ok(())
    }

    /// Seed for this run: the configured one, or a fresh entropy draw.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// RNG for a single still-image pass.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.resolve_seed())
    }

    /// Load and validate a JSON config file.
    pub fn from_json_path(path: &Path) -> SortResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/effect.rs"]
mod tests;
