//! Seeded random instances.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::DistanceMatrix;
use crate::error::{Result, TspError};

/// Side length of the square that [`euclidean`] samples cities from.
pub const PLANE_SIZE: f64 = 100.0;

/// Random cities in the `[0, PLANE_SIZE)²` plane with Euclidean distances.
///
/// The same `seed` always yields the same matrix.
pub fn euclidean(n: usize, seed: u64) -> Result<DistanceMatrix> {
    Ok(euclidean_with_points(n, seed)?.1)
}

/// Like [`euclidean`], also returning the sampled coordinates.
pub fn euclidean_with_points(
    n: usize,
    seed: u64,
) -> Result<(Vec<(f64, f64)>, DistanceMatrix)> {
    if n == 0 {
        return Err(TspError::invalid("instance needs at least one city"));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| {
            (
                rng.random_range(0.0..PLANE_SIZE),
                rng.random_range(0.0..PLANE_SIZE),
            )
        })
        .collect();

    let mut data = Vec::with_capacity(n * n);
    for &(xa, ya) in &points {
        for &(xb, yb) in &points {
            data.push((xa - xb).hypot(ya - yb));
        }
    }
    let matrix = DistanceMatrix::from_flat(n, data)?;
    Ok((points, matrix))
}

/// Symmetric matrix of integer-valued costs in `1..=max_cost`, zero diagonal.
pub fn symmetric(n: usize, max_cost: u32, seed: u64) -> Result<DistanceMatrix> {
    if n == 0 {
        return Err(TspError::invalid("instance needs at least one city"));
    }
    if max_cost == 0 {
        return Err(TspError::invalid("max_cost must be positive"));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0.0; n * n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = f64::from(rng.random_range(1..=max_cost));
            data[i * n + j] = d;
            data[j * n + i] = d;
        }
    }
    DistanceMatrix::from_flat(n, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_deterministic() {
        let a = euclidean(6, 7).unwrap();
        let b = euclidean(6, 7).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, euclidean(6, 8).unwrap());
    }

    #[test]
    fn test_euclidean_properties() {
        let (points, m) = euclidean_with_points(8, 42).unwrap();
        assert_eq!(points.len(), 8);
        assert!(m.is_symmetric());
        for i in 0..8 {
            assert_eq!(m.get(i, i), 0.0);
            for j in 0..8 {
                assert!(m.get(i, j) < PLANE_SIZE * 2.0_f64.sqrt());
            }
        }
    }

    #[test]
    fn test_symmetric_range() {
        let m = symmetric(7, 20, 3).unwrap();
        assert!(m.is_symmetric());
        for i in 0..7 {
            for j in 0..7 {
                let d = m.get(i, j);
                if i == j {
                    assert_eq!(d, 0.0);
                } else {
                    assert!((1.0..=20.0).contains(&d));
                    assert_eq!(d.fract(), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_zero_cities_rejected() {
        assert!(euclidean(0, 1).is_err());
        assert!(symmetric(0, 10, 1).is_err());
        assert!(symmetric(3, 0, 1).is_err());
    }
}
