//! A module for computing single-shortest-path betweenness.

use std::collections::VecDeque;

use tracing::trace;

use crate::graph::GraphIndex;

/// Credits every vertex lying strictly inside the canonical shortest path from `index` to each
/// vertex reachable from it.
///
/// The canonical path to a target is the one traced back through the vertex that first
/// discovered it during a breadth-first search visiting neighbours in ascending index order. The
/// predecessors form a tree rooted at `index`, so a vertex sits inside exactly as many canonical
/// paths as it has descendants in that tree.
fn betweenness_for_node(index: usize, indices: &[Vec<GraphIndex>], betweenness_count: &mut [f64]) {
    let num_nodes = indices.len();

    let mut predecessor: Vec<Option<usize>> = vec![None; num_nodes];
    let mut visited: Vec<bool> = vec![false; num_nodes];
    let mut descendants: Vec<f64> = vec![0.0; num_nodes];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut stack: Vec<usize> = Vec::with_capacity(num_nodes);

    visited[index] = true;
    queue.push_back(index);

    while let Some(v) = queue.pop_front() {
        stack.push(v);

        for &w in &indices[v] {
            if !visited[w] {
                visited[w] = true;
                predecessor[w] = Some(v);
                queue.push_back(w);
            }
        }
    }

    // Vertices come off the stack in reverse discovery order, so every descendant of `w` has
    // already been folded into `descendants[w]` by the time `w` is popped.
    while let Some(w) = stack.pop() {
        if w == index {
            continue;
        }

        if let Some(v) = predecessor[w] {
            descendants[v] += 1.0 + descendants[w];
        }

        betweenness_count[w] += descendants[w];
    }
}

/// Sums the per-source counts over every source vertex.
///
/// Pairs are ordered, so `(s, t)` and `(t, s)` are both counted, possibly along different
/// paths. With `normalize` and more than two vertices the counts are scaled by
/// `1 / ((n - 1)(n - 2))`; smaller graphs keep their raw counts.
pub fn compute_betweenness(indices: &[Vec<GraphIndex>], normalize: bool) -> Vec<f64> {
    let num_nodes = indices.len();

    let mut betweenness_count: Vec<f64> = vec![0.0; num_nodes];

    for index in 0..num_nodes {
        betweenness_for_node(index, indices, &mut betweenness_count);
    }

    if normalize && num_nodes > 2 {
        let divisor = ((num_nodes - 1) * (num_nodes - 2)) as f64;
        for count in betweenness_count.iter_mut() {
            *count /= divisor;
        }
    } else if normalize {
        trace!(num_nodes, "too few vertices to normalize betweenness, keeping raw counts");
    }

    betweenness_count
}
