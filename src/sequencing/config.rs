use crate::DEFAULT_NOISE_SEED;

/// Seed for the scatter generator (crackle chances, flicker, jitter).
pub const DEFAULT_SCATTER_SEED: u64 = 0x5EED_F00D;

/// Show settings, assembled with a builder.
///
/// ```
/// use piezo_fx::ShowConfig;
/// let config = ShowConfig::new().noise_seed(7).pauses(false);
/// assert_eq!(config.noise_seed, 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowConfig {
    /// Initial seed of the synthesizer's Brownian noise.
    pub noise_seed: u32,
    /// Seed of the independent scatter generator.
    pub scatter_seed: u64,
    /// Sleep between phases of the full show.
    pub pauses: bool,
}

impl ShowConfig {
    pub fn new() -> Self {
        Self {
            noise_seed: DEFAULT_NOISE_SEED,
            scatter_seed: DEFAULT_SCATTER_SEED,
            pauses: true,
        }
    }

    pub fn noise_seed(mut self, seed: u32) -> Self {
        self.noise_seed = seed;
        self
    }

    pub fn scatter_seed(mut self, seed: u64) -> Self {
        self.scatter_seed = seed;
        self
    }

    pub fn pauses(mut self, enabled: bool) -> Self {
        self.pauses = enabled;
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}
