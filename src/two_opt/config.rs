//! 2-opt configuration.

/// How the starting tour of each descent is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialTour {
    /// Start city first, remaining cities in random order.
    #[default]
    Shuffled,

    /// Greedy Nearest-Neighbor tour from the start city.
    NearestNeighbor,
}

/// Configuration for 2-opt local search.
///
/// # Examples
///
/// ```
/// use u_tsp::two_opt::{InitialTour, TwoOptConfig};
///
/// let config = TwoOptConfig::default()
///     .with_initial_tour(InitialTour::NearestNeighbor)
///     .with_multi_start(true)
///     .with_seed(7);
/// assert!(config.validate(5).is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptConfig {
    /// City the tour starts from in single-start mode.
    pub start_city: usize,

    /// Run one descent from every city and keep the cheapest tour.
    /// `start_city` is ignored when set.
    pub multi_start: bool,

    /// Starting tour construction.
    pub initial_tour: InitialTour,

    /// Maximum improvement passes per descent. 0 = until no improvement.
    pub max_passes: usize,

    /// Random seed for shuffled starting tours.
    pub seed: Option<u64>,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            start_city: 0,
            multi_start: false,
            initial_tour: InitialTour::default(),
            max_passes: 0,
            seed: None,
        }
    }
}

impl TwoOptConfig {
    /// Sets the start city for single-start mode.
    pub fn with_start_city(mut self, city: usize) -> Self {
        self.start_city = city;
        self
    }

    /// Enables or disables one descent per start city.
    pub fn with_multi_start(mut self, multi_start: bool) -> Self {
        self.multi_start = multi_start;
        self
    }

    /// Sets how starting tours are built.
    pub fn with_initial_tour(mut self, initial_tour: InitialTour) -> Self {
        self.initial_tour = initial_tour;
        self
    }

    /// Sets the pass limit per descent (0 for no limit).
    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
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
