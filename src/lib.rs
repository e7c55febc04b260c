//! Smallworld generates Watts-Strogatz small-world graphs and computes node importance measures
//! over simple undirected graphs.
//!
//! # Basic usage
//!
//! The library is centered around the [`Graph`](graph::Graph) structure, built either by hand
//! from [`Edge`](edge::Edge) instances or by the [`small_world`] generator. Once constructed,
//! degree, betweenness and closeness centrality as well as clustering coefficients can be computed
//! on it. None of these computations modify the graph.
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_xorshift::XorShiftRng;
//!
//! use smallworld::edge::Edge;
//! use smallworld::graph::Graph;
//! use smallworld::small_world::watts_strogatz;
//!
//! // Generate a graph from a seeded source so the result is reproducible.
//! let mut rng = XorShiftRng::seed_from_u64(42);
//! let graph = watts_strogatz(10, 4, 0.0, &mut rng).unwrap();
//!
//! // Without rewiring this is the plain ring lattice.
//! assert_eq!(graph.average_clustering_coefficient(), 0.5);
//!
//! // Graphs can also be built by hand, the IDs can be any type that is
//! // `Copy + Eq + Hash + Ord + Debug`.
//! let mut graph = Graph::new();
//! graph.insert(Edge::new("a", "b"));
//! graph.insert(Edge::new("b", "c"));
//!
//! let degree = graph.degree_centrality(true).unwrap();
//! let betweenness = graph.betweenness_centrality(true);
//! let closeness = graph.closeness_centrality(true);
//!
//! assert_eq!(degree["b"], 1.0);
//! // (a, c) and (c, a) both pass through b, scaled by 1 / ((n - 1)(n - 2)).
//! assert_eq!(betweenness["b"], 1.0);
//! assert_eq!(closeness["b"], 1.0);
//! ```

mod betweenness;
mod closeness;
mod clustering;
pub mod edge;
pub mod error;
pub mod graph;
pub mod small_world;

pub use edge::Edge;
pub use error::{Error, Result};
pub use graph::Graph;
pub use small_world::{ring_lattice, watts_strogatz, SmallWorldConfig};
