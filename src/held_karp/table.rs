//! The subset-by-city dynamic programming table.

/// Marker for a cell without a predecessor.
const NO_PARENT: u8 = u8::MAX;

/// Filled Held-Karp table.
///
/// Cell `(mask, city)` holds the best value of a path that starts at city 0,
/// visits exactly the cities whose bits are set in `mask`, and ends at
/// `city`. Undefined or unreachable cells are `f64::INFINITY`. The only
/// base cell is `(0b1, 0) = 0`.
///
/// Storage is one flat buffer indexed by `mask * n + city`.
#[derive(Debug, Clone)]
pub struct HeldKarpTable {
    n: usize,
    cost: Vec<f64>,
    parent: Vec<u8>,
}

impl HeldKarpTable {
    /// Allocates a table of `n · 2ⁿ` infinite cells with the base case set.
    pub(crate) fn new(n: usize, track_parents: bool) -> Self {
        let cells = n << n;
        let mut cost = vec![f64::INFINITY; cells];
        cost[Self::index_of(n, 1, 0)] = 0.0;
        let parent = if track_parents {
            vec![NO_PARENT; cells]
        } else {
            Vec::new()
        };
        Self { n, cost, parent }
    }

    #[inline]
    fn index_of(n: usize, mask: usize, city: usize) -> usize {
        mask * n + city
    }

    /// Number of cities.
    pub fn cities(&self) -> usize {
        self.n
    }

    /// Number of subsets, `2ⁿ`.
    pub fn subsets(&self) -> usize {
        1 << self.n
    }

    /// Mask with every city set.
    pub fn full_mask(&self) -> usize {
        self.subsets() - 1
    }

    /// Whether predecessors were recorded.
    pub fn tracks_parents(&self) -> bool {
        !self.parent.is_empty()
    }

    /// Best value of a path over `mask` ending at `city`.
    ///
    /// # Panics
    ///
    /// Panics if `mask >= 2ⁿ` or `city >= n`.
    #[inline]
    pub fn get(&self, mask: usize, city: usize) -> f64 {
        self.cost[Self::index_of(self.n, mask, city)]
    }

    /// City visited just before `city` on the best path for `(mask, city)`.
    ///
    /// `None` for the base cell, unreachable cells, or when predecessors
    /// were not recorded.
    pub fn predecessor(&self, mask: usize, city: usize) -> Option<usize> {
        self.parent
            .get(Self::index_of(self.n, mask, city))
            .filter(|&&p| p != NO_PARENT)
            .map(|&p| usize::from(p))
    }

    #[inline]
    pub(crate) fn set(&mut self, mask: usize, city: usize, value: f64, parent: Option<usize>) {
        let idx = Self::index_of(self.n, mask, city);
        self.cost[idx] = value;
        if let (Some(slot), Some(p)) = (self.parent.get_mut(idx), parent) {
            // n <= HARD_MAX_CITIES < u8::MAX
            *slot = p as u8;
        }
    }

    /// Walks predecessors back from `(full_mask, last)` to city 0.
    ///
    /// Returns the path in visiting order, starting at 0 and ending at
    /// `last`, or `None` if the chain is broken.
    pub(crate) fn trace_back(&self, last: usize) -> Option<Vec<usize>> {
        let mut path = Vec::with_capacity(self.n);
        let mut mask = self.full_mask();
        let mut city = last;
        while city != 0 {
            path.push(city);
            let prev = self.predecessor(mask, city)?;
            mask &= !(1 << city);
            city = prev;
        }
        if mask != 1 {
            return None;
        }
        path.push(0);
        path.reverse();
        Some(path)
    }
}
