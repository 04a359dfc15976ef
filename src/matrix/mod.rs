//! Distance matrices.
//!
//! [`DistanceMatrix`] is the validated, immutable input consumed by every
//! solver in this crate. Missing edges are represented by
//! [`f64::INFINITY`]; solvers never route through them.
//!
//! Two producers are included:
//!
//! - [`CityMatrix`]: loads a `City1,City2,Distance(km)` city-pair list.
//! - [`random`]: seeded random instances for experiments and tests.

mod city_pairs;
pub mod random;
mod types;

pub use city_pairs::CityMatrix;
pub use types::DistanceMatrix;
