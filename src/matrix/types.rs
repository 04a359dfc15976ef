//! The validated distance matrix.

use crate::error::{Result, TspError};

/// A square matrix of non-negative travel costs between `n` cities.
///
/// Stored row-major: the cost of travelling from `from` to `to` is
/// `data[from * n + to]`. Entries may be [`f64::INFINITY`] to mark a
/// missing edge. The diagonal is expected to be zero but is not checked.
///
/// Construction validates the shape and every entry once, so solvers can
/// index without further checks.
///
/// # Examples
///
/// ```
/// use u_tsp::matrix::DistanceMatrix;
///
/// let m = DistanceMatrix::new(vec![
///     vec![0.0, 2.0],
///     vec![2.0, 0.0],
/// ]).unwrap();
/// assert_eq!(m.len(), 2);
/// assert_eq!(m.get(0, 1), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from nested rows.
    ///
    /// Fails with [`TspError::InvalidInput`] if there are no rows, any row
    /// length differs from the row count, or any entry is NaN or negative.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(TspError::invalid("distance matrix has no cities"));
        }
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(TspError::invalid(format!(
                    "row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Self::from_flat(n, data)
    }

    /// Builds a matrix from a row-major buffer of `n * n` entries.
    pub fn from_flat(n: usize, data: Vec<f64>) -> Result<Self> {
        if n == 0 {
            return Err(TspError::invalid("distance matrix has no cities"));
        }
        let cells = n
            .checked_mul(n)
            .ok_or_else(|| TspError::invalid(format!("{n} cities overflow the matrix size")))?;
        if data.len() != cells {
            return Err(TspError::invalid(format!(
                "expected {cells} entries for {n} cities, got {}",
                data.len()
            )));
        }
        for (idx, &d) in data.iter().enumerate() {
            if d.is_nan() {
                return Err(TspError::invalid(format!(
                    "entry ({}, {}) is NaN",
                    idx / n,
                    idx % n
                )));
            }
            if d < 0.0 {
                return Err(TspError::invalid(format!(
                    "entry ({}, {}) is negative: {d}",
                    idx / n,
                    idx % n
                )));
            }
        }
        Ok(Self { n, data })
    }

    /// Number of cities.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always false: a validated matrix has at least one city.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Cost of the edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    /// Row `from` as a slice of outgoing costs.
    #[inline]
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.n..(from + 1) * self.n]
    }

    /// Whether `from -> to` is a usable edge.
    #[inline]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_finite()
    }

    /// Returns `true` if `get(i, j) == get(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| ((i + 1)..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Cost of the closed tour visiting `tour` in order and returning to
    /// `tour[0]`.
    ///
    /// Returns [`f64::INFINITY`] when the tour uses a missing edge. The tour
    /// must be a permutation of `0..n`.
    pub fn tour_cost(&self, tour: &[usize]) -> Result<f64> {
        self.check_permutation(tour, "tour")?;
        let n = tour.len();
        let cost: f64 = (0..n)
            .map(|k| self.get(tour[k], tour[(k + 1) % n]))
            .sum();
        Ok(cost)
    }

    /// Renumbers cities: city `a` of the result is city `perm[a]` of `self`.
    ///
    /// The optimal cycle cost of a symmetric matrix is invariant under
    /// relabeling, which makes this handy for property tests.
    pub fn relabel(&self, perm: &[usize]) -> Result<Self> {
        self.check_permutation(perm, "relabeling")?;
        let n = self.n;
        let mut data = Vec::with_capacity(n * n);
        for &a in perm {
            for &b in perm {
                data.push(self.get(a, b));
            }
        }
        Ok(Self { n, data })
    }

    /// Reverses the city order (`i` becomes `n - 1 - i`).
    pub fn reversed(&self) -> Self {
        let n = self.n;
        let mut data = Vec::with_capacity(n * n);
        for a in (0..n).rev() {
            for b in (0..n).rev() {
                data.push(self.get(a, b));
            }
        }
        Self { n, data }
    }

    fn check_permutation(&self, perm: &[usize], what: &str) -> Result<()> {
        if perm.len() != self.n {
            return Err(TspError::invalid(format!(
                "{what} has {} cities, matrix has {}",
                perm.len(),
                self.n
            )));
        }
        let mut seen = vec![false; self.n];
        for &c in perm {
            if c >= self.n || seen[c] {
                return Err(TspError::invalid(format!(
                    "{what} is not a permutation of 0..{}",
                    self.n
                )));
            }
            seen[c] = true;
        }
        Ok(())
    }
}
