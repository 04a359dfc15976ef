//! Held-Karp configuration.

/// Largest city count the solver accepts under any configuration.
///
/// Predecessors are stored as `u8` and the table holds `n · 2ⁿ` entries;
/// at 24 cities that is already ~400M cells.
pub const HARD_MAX_CITIES: usize = 24;

/// Default city limit: a 20-city table is `20 · 2²⁰` costs (~160 MiB).
pub const DEFAULT_MAX_CITIES: usize = 20;

/// What the dynamic program minimizes over Hamiltonian cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    /// Sum of edge costs (classic TSP).
    #[default]
    TotalCost,

    /// Largest single edge cost on the cycle (bottleneck TSP).
    Bottleneck,
}

impl Objective {
    /// Extends a partial path value by one edge.
    #[inline]
    pub(crate) fn extend(self, path: f64, edge: f64) -> f64 {
        match self {
            Objective::TotalCost => path + edge,
            Objective::Bottleneck => path.max(edge),
        }
    }
}

/// Configuration for the Held-Karp solver.
///
/// # Examples
///
/// ```
/// use u_tsp::held_karp::{HeldKarpConfig, Objective};
///
/// let config = HeldKarpConfig::default()
///     .with_max_cities(16)
///     .with_objective(Objective::Bottleneck)
///     .with_reconstruct_tour(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeldKarpConfig {
    /// Matrices with more cities are rejected before the table is allocated.
    pub max_cities: usize,

    /// Objective to minimize.
    pub objective: Objective,

    /// Whether to record predecessors and return the optimal tour.
    ///
    /// Disabling this skips the `u8` predecessor table.
    pub reconstruct_tour: bool,

    /// Whether to fill each subset-size layer in parallel using rayon.
    ///
    /// Only honored when the crate is built with the `parallel` feature.
    /// Results are identical to the sequential fill.
    pub parallel: bool,
}

impl Default for HeldKarpConfig {
    fn default() -> Self {
        Self {
            max_cities: DEFAULT_MAX_CITIES,
            objective: Objective::default(),
            reconstruct_tour: true,
            parallel: false,
        }
    }
}

impl HeldKarpConfig {
    /// Sets the largest city count accepted.
    pub fn with_max_cities(mut self, n: usize) -> Self {
        self.max_cities = n;
        self
    }

    /// Sets the objective to minimize.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Enables or disables optimal tour reconstruction.
    pub fn with_reconstruct_tour(mut self, reconstruct: bool) -> Self {
        self.reconstruct_tour = reconstruct;
        self
    }

    /// Enables or disables parallel layer filling.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_cities == 0 {
            return Err("max_cities must be at least 1".into());
        }
        if self.max_cities > HARD_MAX_CITIES {
            return Err(format!(
                "max_cities must be at most {HARD_MAX_CITIES}, got {}",
                self.max_cities
            ));
        }
        Ok(())
    }
}
