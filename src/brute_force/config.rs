//! Brute-force configuration.

/// Largest city count accepted: 11! ≈ 40M tours.
pub const BRUTE_FORCE_HARD_MAX: usize = 12;

/// Configuration for exhaustive search.
///
/// # Examples
///
/// ```
/// use u_tsp::brute_force::BruteForceConfig;
///
/// let config = BruteForceConfig::default().with_max_cities(9);
/// assert_eq!(config.max_cities, 9);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BruteForceConfig {
    /// Matrices with more cities are rejected up front.
    pub max_cities: usize,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self { max_cities: 10 }
    }
}

impl BruteForceConfig {
    /// Sets the largest city count accepted.
    pub fn with_max_cities(mut self, n: usize) -> Self {
        self.max_cities = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_cities == 0 || self.max_cities > BRUTE_FORCE_HARD_MAX {
            return Err(format!(
                "max_cities must be in 1..={BRUTE_FORCE_HARD_MAX}, got {}",
                self.max_cities
            ));
        }
        Ok(())
    }
}
