//! Configuration for the separation engine.

use serde::{Deserialize, Serialize};

/// Settings consumed by the path separator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeparatorSettings {
    /// Feasibility tolerance below which a slack or distance counts as zero.
    /// Also bounds aggregation weights to `[feastol, 1/feastol]` and widens
    /// score comparisons during tie-breaking.
    pub feastol: f64,

    /// Base random seed. Each separation call derives its generator from
    /// this seed plus the relaxation's cumulative LP iteration count, so a
    /// fixed iteration trajectory reproduces exactly while different nodes
    /// diversify.
    pub random_seed: u64,

    /// Maximum number of rows folded into one aggregation path,
    /// substitutions excluded.
    pub max_path_length: usize,

    /// Minimum violation of the current relaxation solution for a generated
    /// cut to be accepted.
    pub min_cut_violation: f64,
}

impl Default for SeparatorSettings {
    fn default() -> Self {
        Self {
            feastol: 1e-6,
            random_seed: 0,
            max_path_length: 6,
            min_cut_violation: 1e-7,
        }
    }
}

impl SeparatorSettings {
    /// Set the base random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Set the feasibility tolerance.
    pub fn with_feastol(mut self, feastol: f64) -> Self {
        self.feastol = feastol;
        self
    }

    /// Set the maximum path length.
    pub fn with_max_path_length(mut self, len: usize) -> Self {
        self.max_path_length = len;
        self
    }
}
