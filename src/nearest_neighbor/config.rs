//! Nearest-Neighbor configuration.

/// Configuration for the Nearest-Neighbor heuristic.
///
/// # Examples
///
/// ```
/// use u_tsp::nearest_neighbor::NnConfig;
///
/// let config = NnConfig::default().with_multi_start(true);
/// assert!(config.multi_start);
/// assert_eq!(config.start_city, 0);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NnConfig {
    /// City the tour starts from in single-start mode.
    pub start_city: usize,

    /// Try every city as the start and keep the cheapest tour.
    /// `start_city` is ignored when set.
    pub multi_start: bool,
}

impl NnConfig {
    /// Sets the start city for single-start mode.
    pub fn with_start_city(mut self, city: usize) -> Self {
        self.start_city = city;
        self
    }

    /// Enables or disables trying every city as the start.
    pub fn with_multi_start(mut self, multi_start: bool) -> Self {
        self.multi_start = multi_start;
        self
    }

    /// Validates the configuration against an instance of `n` cities.
    pub fn validate(&self, n: usize) -> Result<(), String> {
        if !self.multi_start && self.start_city >= n {
            return Err(format!(
                "start city {} out of range for {n} cities",
                self.start_city
            ));
        }
        Ok(())
    }
}
