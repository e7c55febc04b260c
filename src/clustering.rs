//! A module for computing clustering coefficients.

use itertools::Itertools;

use crate::graph::GraphIndex;

/// The fraction of possible links between the neighbours of a vertex that are present.
///
/// `neighbours` and every list in `indices` must be sorted, the lookups are binary searches.
fn clustering_for_node(neighbours: &[GraphIndex], indices: &[Vec<GraphIndex>]) -> f64 {
    let k = neighbours.len();

    // No triangle can pass through a vertex with fewer than two neighbours.
    if k < 2 {
        return 0.0;
    }

    let links = neighbours
        .iter()
        .tuple_combinations()
        .filter(|&(a, b)| indices[*a].binary_search(b).is_ok())
        .count();

    let possible = (k * (k - 1)) as f64 / 2.0;

    links as f64 / possible
}

/// Computes the local clustering coefficient of every vertex.
pub fn compute_clustering(indices: &[Vec<GraphIndex>]) -> Vec<f64> {
    indices
        .iter()
        .map(|neighbours| clustering_for_node(neighbours, indices))
        .collect()
}

/// The arithmetic mean of the local coefficients, `0.0` when there are no vertices.
pub fn average_clustering(indices: &[Vec<GraphIndex>]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }

    compute_clustering(indices).iter().sum::<f64>() / indices.len() as f64
}
