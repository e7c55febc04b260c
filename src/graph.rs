//! A module for working with graphs.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    fmt::Debug,
    hash::Hash,
};

use nalgebra::DMatrix;
use tracing::trace;

use crate::{
    betweenness::compute_betweenness,
    closeness::compute_closeness,
    clustering::{average_clustering, compute_clustering},
    edge::Edge,
    error::{Error, Result},
};

/// Position of a vertex in the sorted vertex order, used by the compute modules.
pub(crate) type GraphIndex = usize;

/// A simple undirected, unweighted graph.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    /// The edges in the graph.
    edges: HashSet<Edge<T>>,
    /// Every vertex mapped to its neighbours.
    ///
    /// The use of `BTree` collections means we need the `Ord` bound on `T`. The sorted order is
    /// what fixes the vertex indices and the neighbour visiting order between computations, which
    /// keeps the results reproducible.
    adjacency: BTreeMap<T, BTreeSet<T>>,
}

impl<T> Default for Graph<T>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug,
{
    /// Creates an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::graph::Graph;
    ///
    /// let graph: Graph<usize> = Graph::new();
    /// assert_eq!(graph.vertex_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            edges: Default::default(),
            adjacency: Default::default(),
        }
    }

    /// Adds a vertex without any edges, returns whether it was new.
    pub fn add_vertex(&mut self, vertex: T) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }

        self.adjacency.insert(vertex, BTreeSet::new());
        true
    }

    /// Inserts an edge into the graph, adding its endpoints as vertices if needed.
    ///
    /// Returns `false` if the edge was already present or is a self-loop, neither of which
    /// change the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    ///
    /// assert!(graph.insert(Edge::new(0, 1)));
    /// assert!(!graph.insert(Edge::new(1, 0)));
    /// assert!(!graph.insert(Edge::new(2, 2)));
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn insert(&mut self, edge: Edge<T>) -> bool {
        if edge.is_loop() {
            return false;
        }

        let (a, b) = (*edge.source(), *edge.target());
        let is_inserted = self.edges.insert(edge);

        if is_inserted {
            self.adjacency.entry(a).or_default().insert(b);
            self.adjacency.entry(b).or_default().insert(a);
        }

        is_inserted
    }

    /// Inserts a subset of `(hub, leaf)` edges into the graph.
    pub fn insert_subset(&mut self, hub: T, leaves: &[T]) {
        for leaf in leaves {
            self.insert(Edge::new(hub, *leaf));
        }
    }

    /// Removes an edge from the set and returns whether it was present in the set. The endpoints
    /// stay in the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new(0, 1));
    ///
    /// assert!(graph.remove(&Edge::new(1, 0)));
    /// assert!(!graph.remove(&Edge::new(0, 2)));
    /// assert_eq!(graph.vertex_count(), 2);
    /// ```
    pub fn remove(&mut self, edge: &Edge<T>) -> bool {
        let is_removed = self.edges.remove(edge);

        if is_removed {
            let (a, b) = (edge.source(), edge.target());
            if let Some(neighbours) = self.adjacency.get_mut(a) {
                neighbours.remove(b);
            }
            if let Some(neighbours) = self.adjacency.get_mut(b) {
                neighbours.remove(a);
            }
        }

        is_removed
    }

    /// Checks if the graph contains an edge.
    pub fn contains(&self, edge: &Edge<T>) -> bool {
        self.edges.contains(edge)
    }

    /// Checks if the graph contains a vertex.
    pub fn contains_vertex(&self, vertex: &T) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Returns the edges in the graph.
    pub fn edges(&self) -> &HashSet<Edge<T>> {
        &self.edges
    }

    /// Returns the vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = &T> + '_ {
        self.adjacency.keys()
    }

    /// Returns the neighbours of a vertex in ascending order, `None` if it isn't in the graph.
    pub fn neighbours(&self, vertex: &T) -> Option<&BTreeSet<T>> {
        self.adjacency.get(vertex)
    }

    /// Returns the number of edges touching a vertex, `None` if it isn't in the graph.
    pub fn degree(&self, vertex: &T) -> Option<usize> {
        self.neighbours(vertex).map(BTreeSet::len)
    }

    /// Returns the vertex count of the graph, isolated vertices included.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Computes the density of the graph, the ratio of edges in the graph to the total possible
    /// edge count.
    ///
    /// The result is `NaN` for graphs with fewer than two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    ///
    /// graph.insert(Edge::new(0, 1));
    /// assert_eq!(graph.density(), 1.0);
    ///
    /// graph.insert(Edge::new(0, 2));
    /// assert_eq!(graph.density(), 2.0 / 3.0);
    /// ```
    pub fn density(&self) -> f64 {
        let vc = self.vertex_count() as f64;
        let ec = self.edge_count() as f64;

        // Calculate the total number of possible edges given a vertex count.
        let pec = vc * (vc - 1.0) / 2.0;
        // Actual edges divided by the possible edges gives the density.
        ec / pec
    }

    /// Constructs the adjacency matrix for this graph, rows and columns ordered by vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new(0, 1));
    /// assert_eq!(
    ///     graph.adjacency_matrix(),
    ///     dmatrix![0.0, 1.0;
    ///              1.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let indices = self.adjacency_indices();
        let n = indices.len();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        // Each neighbour list holds both directions of an edge, so the matrix comes out symmetric.
        for (i, neighbours) in indices.iter().enumerate() {
            for &j in neighbours {
                matrix[(i, j)] = 1.0;
            }
        }

        matrix
    }

    /// Constructs the degree matrix for this graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new(0, 1));
    /// assert_eq!(
    ///     graph.degree_matrix(),
    ///     dmatrix![1.0, 0.0;
    ///              0.0, 1.0]
    /// );
    /// ```
    pub fn degree_matrix(&self) -> DMatrix<f64> {
        let adjacency_matrix = self.adjacency_matrix();
        let n = adjacency_matrix.nrows();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        for (i, row) in adjacency_matrix.row_iter().enumerate() {
            // Set the diagonal to be the sum of edges in that row. The rows are visited in vertex
            // order, same as the index.
            matrix[(i, i)] = row.sum()
        }

        matrix
    }

    /// Returns a mapping of vertices to their degree centrality.
    ///
    /// The raw score is the vertex degree. With `normalized` it is divided by `n - 1`, the
    /// highest degree possible in a simple graph of `n` vertices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateInput`] when normalizing a graph with a single vertex, since
    /// there is no `n - 1` to divide by. An empty graph yields an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert_subset(0, &[1, 2]);
    ///
    /// let dc = graph.degree_centrality(true).unwrap();
    /// assert_eq!(dc[&0], 1.0);
    /// assert_eq!(dc[&1], 0.5);
    /// ```
    pub fn degree_centrality(&self, normalized: bool) -> Result<HashMap<T, f64>> {
        let n = self.vertex_count();

        let divisor = match (normalized, n) {
            (true, 1) => {
                return Err(Error::DegenerateInput(
                    "normalized degree centrality needs at least two vertices".to_string(),
                ))
            }
            (true, n) if n > 1 => (n - 1) as f64,
            _ => 1.0,
        };

        // Neighbour set sizes, the same values as the degree matrix diagonal.
        Ok(self
            .adjacency
            .iter()
            .map(|(vertex, neighbours)| (*vertex, neighbours.len() as f64 / divisor))
            .collect())
    }

    /// Returns a mapping of vertices to their betweenness centrality.
    ///
    /// For every ordered pair of distinct, connected vertices `(s, t)` a single shortest path is
    /// taken, the first one found by a breadth-first search from `s` that visits neighbours in
    /// ascending order, and each vertex strictly inside it scores one. This differs from the
    /// textbook definition, which spreads the credit over all shortest paths between `s` and `t`:
    /// where several shortest paths exist, only the canonical one counts.
    ///
    /// With `normalized` and more than two vertices, scores are multiplied by
    /// `1 / ((n - 1)(n - 2))`. Graphs with two vertices or fewer keep their raw counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new(0, 1));
    /// graph.insert(Edge::new(1, 2));
    ///
    /// let bc = graph.betweenness_centrality(false);
    /// // (0, 2) and (2, 0) both pass through 1.
    /// assert_eq!(bc[&1], 2.0);
    /// assert_eq!(bc[&0], 0.0);
    /// ```
    pub fn betweenness_centrality(&self, normalized: bool) -> HashMap<T, f64> {
        let indices = self.adjacency_indices();
        trace!(vertices = indices.len(), normalized, "computing betweenness");

        let scores = compute_betweenness(&indices, normalized);

        self.vertices().copied().zip(scores).collect()
    }

    /// Returns a mapping of vertices to their closeness centrality.
    ///
    /// The score is `1 / sum`, or `(n - 1) / sum` with `normalized`, where `sum` is the total hop
    /// distance from the vertex to every vertex it can reach and `n` is the vertex count of the
    /// whole graph. Unreachable vertices are left out of the sum, so in a disconnected graph each
    /// vertex is scored from its own component only.
    ///
    /// Vertices that can't reach any other vertex are **omitted** from the mapping rather than
    /// given a placeholder score; callers must not assume every vertex is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new(0, 1));
    /// graph.insert(Edge::new(1, 2));
    /// graph.add_vertex(3);
    ///
    /// let cc = graph.closeness_centrality(false);
    /// assert_eq!(cc[&1], 0.5);
    /// assert!(!cc.contains_key(&3));
    /// ```
    pub fn closeness_centrality(&self, normalized: bool) -> HashMap<T, f64> {
        let indices = self.adjacency_indices();
        trace!(vertices = indices.len(), normalized, "computing closeness");

        let numerator = if normalized {
            indices.len().saturating_sub(1) as f64
        } else {
            1.0
        };

        self.vertices()
            .zip(compute_closeness(&indices))
            .filter(|(_, total)| *total > 0)
            .map(|(vertex, total)| (*vertex, numerator / total as f64))
            .collect()
    }

    /// Returns a mapping of vertices to their local clustering coefficient.
    ///
    /// For a vertex of degree `k >= 2` this is the number of edges between its neighbours divided
    /// by `k(k - 1) / 2`. Vertices of degree 0 or 1 score 0.
    pub fn clustering_coefficients(&self) -> HashMap<T, f64> {
        let indices = self.adjacency_indices();

        self.vertices()
            .copied()
            .zip(compute_clustering(&indices))
            .collect()
    }

    /// Returns the mean of the local clustering coefficients over all vertices, `0.0` for an
    /// empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    /// use smallworld::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new(0, 1));
    /// graph.insert(Edge::new(1, 2));
    /// graph.insert(Edge::new(2, 0));
    ///
    /// assert_eq!(graph.average_clustering_coefficient(), 1.0);
    /// ```
    pub fn average_clustering_coefficient(&self) -> f64 {
        average_clustering(&self.adjacency_indices())
    }

    //
    // Private
    //

    /// Translates the adjacency map into neighbour lists of vertex indices.
    ///
    /// Indices follow `T`'s implementation of `Ord`. As the vertex to index mapping is monotonic,
    /// each neighbour list comes out sorted.
    fn adjacency_indices(&self) -> Vec<Vec<GraphIndex>> {
        let index: BTreeMap<T, GraphIndex> = self
            .adjacency
            .keys()
            .enumerate()
            .map(|(i, &vertex)| (vertex, i))
            .collect();

        // Safety: every neighbour is itself a key of the adjacency map, so it has an index.
        self.adjacency
            .values()
            .map(|neighbours| neighbours.iter().map(|n| index[n]).collect())
            .collect()
    }
}

impl<T> FromIterator<Edge<T>> for Graph<T>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug,
{
    fn from_iter<I: IntoIterator<Item = Edge<T>>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

impl<T> Extend<Edge<T>> for Graph<T>
where
    Edge<T>: Eq + Hash,
    T: Copy + Eq + Hash + Ord + Debug,
{
    fn extend<I: IntoIterator<Item = Edge<T>>>(&mut self, iter: I) {
        for edge in iter {
            self.insert(edge);
        }
    }
}
