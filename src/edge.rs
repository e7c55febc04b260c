//! A module for working with undirected edges.

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

/// An unordered pair of vertices. `Edge::new(a, b)` and `Edge::new(b, a)` compare and hash the
/// same, so a set of edges can never hold both orientations.
#[derive(Clone, Copy, Debug, Eq)]
pub struct Edge<T> {
    source: T,
    target: T,
}

impl<T> Edge<T> {
    /// Creates a new edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    ///
    /// assert_eq!(Edge::new(1, 2), Edge::new(2, 1));
    /// ```
    pub fn new(source: T, target: T) -> Self {
        Edge { source, target }
    }

    /// Returns the first vertex the edge was created with.
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the second vertex the edge was created with.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns whether the edge contains the given vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    ///
    /// let edge = Edge::new(0, 3);
    ///
    /// assert!(edge.contains(&0));
    /// assert!(edge.contains(&3));
    /// assert!(!edge.contains(&1));
    /// ```
    pub fn contains(&self, vertex: &T) -> bool
    where
        T: PartialEq,
    {
        self.source() == vertex || self.target() == vertex
    }

    /// Returns whether both ends of the edge are the same vertex.
    pub fn is_loop(&self) -> bool
    where
        T: PartialEq,
    {
        self.source == self.target
    }

    /// Returns the endpoints with the smaller one first.
    ///
    /// # Examples
    ///
    /// ```
    /// use smallworld::edge::Edge;
    ///
    /// assert_eq!(Edge::new(9, 0).canonical(), (0, 9));
    /// ```
    pub fn canonical(&self) -> (T, T)
    where
        T: Copy + Ord,
    {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}

//
// Trait implementations
//

impl<T: PartialEq> PartialEq for Edge<T> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&self.source, &self.target);
        let (c, d) = (&other.source, &other.target);

        a == d && b == c || a == c && b == d
    }
}

impl<T: Hash + Ord> Hash for Edge<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (a, b) = (&self.source, &self.target);

        // Hash the smaller endpoint first so (a, b) and (b, a) agree.
        match a.cmp(b) {
            Ordering::Greater => {
                b.hash(state);
                a.hash(state);
            }
            _ => {
                a.hash(state);
                b.hash(state);
            }
        }
    }
}

impl<T> From<(T, T)> for Edge<T> {
    fn from((source, target): (T, T)) -> Self {
        Edge::new(source, target)
    }
}
