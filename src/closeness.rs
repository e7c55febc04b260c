//! A module for computing the shortest path sums behind closeness centrality.

use std::collections::VecDeque;

use crate::graph::GraphIndex;

/// Returns the sum of hop distances from `index` to every vertex it can reach.
fn closeness_for_node(index: usize, indices: &[Vec<GraphIndex>]) -> u64 {
    let num_nodes = indices.len();

    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut distance: Vec<Option<u64>> = vec![None; num_nodes];
    let mut total_path_length = 0;

    distance[index] = Some(0);
    queue.push_back(index);

    while let Some(current) = queue.pop_front() {
        let next = distance[current].map_or(0, |d| d + 1);

        for &w in &indices[current] {
            if distance[w].is_none() {
                distance[w] = Some(next);
                total_path_length += next;
                queue.push_back(w);
            }
        }
    }

    total_path_length
}

/// Computes the reachable path length sum for every vertex.
///
/// Unreachable vertices don't contribute, so each sum only covers the vertex's own component. A
/// sum of zero means the vertex can't reach anything.
pub fn compute_closeness(indices: &[Vec<GraphIndex>]) -> Vec<u64> {
    (0..indices.len())
        .map(|index| closeness_for_node(index, indices))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_sums() {
        // 0 - 1 - 2
        let indices = vec![vec![1], vec![0, 2], vec![1]];

        assert_eq!(compute_closeness(&indices), vec![3, 2, 3]);
    }

    #[test]
    fn components_are_independent() {
        // 0 - 1 and 2 - 3 - 4.
        let indices = vec![vec![1], vec![0], vec![3], vec![2, 4], vec![3]];

        assert_eq!(compute_closeness(&indices), vec![1, 1, 3, 2, 3]);
    }

    #[test]
    fn isolated_vertex() {
        assert_eq!(compute_closeness(&[vec![]]), vec![0]);
    }
}
