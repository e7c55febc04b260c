//! A module for generating Watts-Strogatz small-world graphs.
//!
//! Generation runs in two steps. First a ring lattice: `n` vertices on a circle, each joined to
//! its `k / 2` nearest neighbours on either side. Then every lattice edge `(i, j)`, `i < j`, is
//! visited once and with probability `p` has its `j` end moved to a vertex `i` isn't joined to
//! yet. Low `p` keeps the lattice's high clustering while a few long-range shortcuts already
//! shrink the path lengths, which is the small-world regime.
//!
//! Randomness is only ever drawn from the generator passed in by the caller.
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_xorshift::XorShiftRng;
//! use smallworld::small_world::watts_strogatz;
//!
//! let mut rng = XorShiftRng::seed_from_u64(42);
//! let graph = watts_strogatz(20, 4, 0.3, &mut rng).unwrap();
//!
//! assert_eq!(graph.vertex_count(), 20);
//! assert_eq!(graph.edge_count(), 40);
//! ```

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use tracing::{debug, trace};

use crate::{
    edge::Edge,
    error::{Error, Result},
    graph::Graph,
};

/// Parameters of a Watts-Strogatz graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmallWorldConfig {
    /// Number of vertices, labelled `0..n`.
    pub n: usize,
    /// Lattice degree of every vertex. Must be even and smaller than `n`.
    pub k: usize,
    /// Probability of rewiring each lattice edge, in `[0, 1]`.
    pub p: f64,
}

impl Default for SmallWorldConfig {
    fn default() -> Self {
        Self {
            n: 20,
            k: 4,
            p: 0.3,
        }
    }
}

impl SmallWorldConfig {
    /// Creates a new configuration, without validating it.
    pub fn new(n: usize, k: usize, p: f64) -> Self {
        Self { n, k, p }
    }

    /// Checks the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `k` is odd, `k >= n` or `p` isn't in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        validate_lattice(self.n, self.k)?;

        if !(0.0..=1.0).contains(&self.p) {
            return Err(Error::InvalidParameter(format!(
                "p must be between 0 and 1, got {}",
                self.p
            )));
        }

        Ok(())
    }

    /// Generates a graph, drawing randomness from `rng`.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Graph<usize>> {
        watts_strogatz(self.n, self.k, self.p, rng)
    }

    /// Generates a graph from a fixed seed. The same seed always produces the same graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::small_world::SmallWorldConfig;
    ///
    /// let config = SmallWorldConfig::new(10, 4, 0.5);
    ///
    /// let a = config.build_seeded(7).unwrap();
    /// let b = config.build_seeded(7).unwrap();
    /// assert_eq!(a.edges(), b.edges());
    /// ```
    pub fn build_seeded(&self, seed: u64) -> Result<Graph<usize>> {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        self.build(&mut rng)
    }
}

/// Builds a ring lattice of `n` vertices in which every vertex is joined to its `k / 2` nearest
/// neighbours on each side.
///
/// Only forward offsets `(i, i + j mod n)` are inserted. Since edges are unordered they already
/// cover the backward neighbours, leaving every vertex with degree exactly `k` and the graph with
/// `n * k / 2` edges.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `k` is odd or `k >= n`.
///
/// # Examples
///
/// ```
/// use smallworld::small_world::ring_lattice;
///
/// let lattice = ring_lattice(10, 4).unwrap();
///
/// assert_eq!(lattice.edge_count(), 20);
/// assert!(lattice.vertices().all(|v| lattice.degree(v) == Some(4)));
/// ```
pub fn ring_lattice(n: usize, k: usize) -> Result<Graph<usize>> {
    validate_lattice(n, k)?;

    let mut graph = Graph::new();

    for i in 0..n {
        graph.add_vertex(i);
    }

    for i in 0..n {
        for j in 1..=k / 2 {
            graph.insert(Edge::new(i, (i + j) % n));
        }
    }

    Ok(graph)
}

/// Generates a Watts-Strogatz small-world graph.
///
/// Each lattice edge `(i, j)` with `i < j` is visited once, in ascending order. One `f64` is drawn
/// from `rng` per edge; when it falls below `p` the candidates are every vertex other than `i`
/// that `i` isn't already joined to. If there are any, one is picked uniformly (a second draw) and
/// the edge is moved to it, otherwise the edge is left as is.
///
/// Rewiring never creates a duplicate, so the result always has `n` vertices and `n * k / 2`
/// edges.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `k` is odd, `k >= n` or `p` isn't in `[0, 1]`. Nothing
/// is built in that case.
pub fn watts_strogatz<R: Rng + ?Sized>(
    n: usize,
    k: usize,
    p: f64,
    rng: &mut R,
) -> Result<Graph<usize>> {
    SmallWorldConfig::new(n, k, p).validate()?;

    let mut graph = ring_lattice(n, k)?;

    // Snapshot the lattice edges so rewired edges aren't visited again.
    let mut lattice_edges: Vec<(usize, usize)> =
        graph.edges().iter().map(Edge::canonical).collect();
    lattice_edges.sort_unstable();

    let mut rewired = 0;

    for (i, j) in lattice_edges {
        if rng.gen::<f64>() >= p {
            continue;
        }

        let candidates: Vec<usize> = (0..n)
            .filter(|&v| v != i && !graph.contains(&Edge::new(i, v)))
            .collect();

        match candidates.choose(rng) {
            Some(&target) => {
                graph.remove(&Edge::new(i, j));
                graph.insert(Edge::new(i, target));
                rewired += 1;

                trace!(i, from = j, to = target, "rewired edge");
            }
            None => trace!(i, j, "no rewiring candidates, keeping edge"),
        }
    }

    debug!(
        n,
        k,
        p,
        rewired,
        edges = graph.edge_count(),
        "generated small-world graph"
    );

    Ok(graph)
}

fn validate_lattice(n: usize, k: usize) -> Result<()> {
    if k % 2 != 0 {
        return Err(Error::InvalidParameter(format!("k must be even, got {k}")));
    }

    if k >= n {
        return Err(Error::InvalidParameter(format!(
            "k must be less than n, got k = {k}, n = {n}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::RngCore;

    use super::*;

    fn rng(seed: u64) -> XorShiftRng {
        XorShiftRng::seed_from_u64(seed)
    }

    /// Counts the values drawn from the wrapped generator.
    struct CountingRng {
        inner: XorShiftRng,
        draws: usize,
    }

    impl CountingRng {
        fn new(seed: u64) -> Self {
            Self {
                inner: rng(seed),
                draws: 0,
            }
        }
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.draws += 1;
            self.inner.fill_bytes(dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.draws += 1;
            self.inner.try_fill_bytes(dest)
        }
    }

    /// Replays a fixed queue of values, 32-bit draws take the low half of the next entry.
    ///
    /// A zero makes `gen::<f64>()` return 0.0 and `choose` pick the first candidate, `u64::MAX`
    /// makes `gen::<f64>()` return just under 1.0.
    struct ScriptedRng(VecDeque<u64>);

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0.pop_front().expect("drew more values than scripted")
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn rejects_odd_k() {
        let result = watts_strogatz(10, 3, 0.1, &mut rng(0));

        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn rejects_k_not_below_n() {
        assert!(matches!(
            watts_strogatz(4, 4, 0.1, &mut rng(0)),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            watts_strogatz(4, 6, 0.1, &mut rng(0)),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            watts_strogatz(0, 0, 0.1, &mut rng(0)),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn rejects_p_out_of_range() {
        for p in [-0.1, 1.1, f64::NAN] {
            assert!(matches!(
                watts_strogatz(10, 4, p, &mut rng(0)),
                Err(Error::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn accepts_bounds() {
        assert!(watts_strogatz(10, 4, 0.0, &mut rng(0)).is_ok());
        assert!(watts_strogatz(10, 4, 1.0, &mut rng(0)).is_ok());
        assert!(watts_strogatz(1, 0, 0.5, &mut rng(0)).is_ok());
    }

    #[test]
    fn lattice_degrees() {
        let lattice = ring_lattice(10, 4).unwrap();

        assert_eq!(lattice.vertex_count(), 10);
        assert_eq!(lattice.edge_count(), 20);

        for v in 0..10 {
            assert_eq!(lattice.degree(&v), Some(4));
        }

        // Both sides of the ring, reached through forward offsets only.
        let neighbours: Vec<usize> = lattice.neighbours(&0).unwrap().iter().copied().collect();
        assert_eq!(neighbours, vec![1, 2, 8, 9]);
    }

    #[test]
    fn zero_k_gives_isolated_vertices() {
        let graph = watts_strogatz(5, 0, 1.0, &mut rng(0)).unwrap();

        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn no_rewiring_at_zero_probability() {
        let graph = watts_strogatz(10, 4, 0.0, &mut rng(3)).unwrap();
        let lattice = ring_lattice(10, 4).unwrap();

        assert_eq!(graph.edges(), lattice.edges());
    }

    #[test]
    fn full_rewiring_keeps_edge_count() {
        let graph = watts_strogatz(100, 4, 1.0, &mut rng(11)).unwrap();
        let lattice = ring_lattice(100, 4).unwrap();

        assert_eq!(graph.edge_count(), 200);
        assert_ne!(graph.edges(), lattice.edges());

        let degree_sum: usize = graph.vertices().filter_map(|v| graph.degree(v)).sum();
        assert_eq!(degree_sum, 400);
    }

    #[test]
    fn saturated_lattice_is_left_alone() {
        // With k = n - 1 every vertex is already joined to every other, nothing can be rewired.
        let graph = watts_strogatz(5, 4, 1.0, &mut rng(5)).unwrap();
        let lattice = ring_lattice(5, 4).unwrap();

        assert_eq!(graph.edges(), lattice.edges());
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = watts_strogatz(10, 4, 0.5, &mut rng(42)).unwrap();
        let b = watts_strogatz(10, 4, 0.5, &mut rng(42)).unwrap();

        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn one_draw_per_edge_without_rewiring() {
        let mut rng = CountingRng::new(42);
        watts_strogatz(10, 4, 0.0, &mut rng).unwrap();

        assert_eq!(rng.draws, 20);
    }

    #[test]
    fn no_choice_drawn_without_candidates() {
        // Every check passes but the saturated lattice leaves nothing to choose from.
        let mut rng = CountingRng::new(42);
        watts_strogatz(5, 4, 1.0, &mut rng).unwrap();

        assert_eq!(rng.draws, 10);
    }

    #[test]
    fn choice_drawn_right_after_passing_check() {
        // Lattice edges in ascending order; the even-positioned ones pass the check and take the
        // first candidate, the odd ones fail it.
        let script = (0..20).flat_map(|position| {
            if position % 2 == 0 {
                vec![0, 0]
            } else {
                vec![u64::MAX]
            }
        });
        let mut rng = ScriptedRng(script.collect());

        let graph = watts_strogatz(10, 4, 0.5, &mut rng).unwrap();

        // The script is used up exactly.
        assert!(rng.0.is_empty());

        let mut edges: Vec<(usize, usize)> = graph.edges().iter().map(Edge::canonical).collect();
        edges.sort_unstable();

        assert_eq!(
            edges,
            vec![
                (0, 1),
                (0, 2),
                (0, 3),
                (0, 4),
                (0, 5),
                (0, 6),
                (0, 7),
                (0, 9),
                (1, 2),
                (1, 3),
                (1, 4),
                (2, 3),
                (2, 5),
                (3, 4),
                (3, 6),
                (4, 5),
                (5, 6),
                (6, 7),
                (7, 8),
                (8, 9),
            ]
        );
    }

    #[test]
    fn config() {
        let config = SmallWorldConfig::default();
        assert!(config.validate().is_ok());

        let graph = config.build(&mut rng(1)).unwrap();
        assert_eq!(graph.vertex_count(), 20);
        assert_eq!(graph.edge_count(), 40);

        assert!(SmallWorldConfig::new(10, 3, 0.5).build_seeded(1).is_err());
    }
}
