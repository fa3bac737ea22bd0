//! Directed graph with adjacency sets over arbitrary hashable vertices.
//!
//! # Examples
//!
//! ```
//! use toposcc::core::DirectedGraph;
//!
//! let mut graph = DirectedGraph::new();
//!
//! graph.add_edges("serde", ["serde_json", "toml"]);
//! graph.add_edges("serde_json", ["toml"]);
//! graph.add_vertex("rand");
//!
//! assert_eq!(graph.vertex_count(), 4);
//! assert_eq!(graph.edge_count(), 3);
//!
//! let adjacent = graph.adjacent_vertices_of("serde").unwrap();
//! assert_eq!(adjacent.collect::<Vec<_>>(), vec![&"serde_json", &"toml"]);
//! ```

use std::{
    borrow::Borrow,
    fmt,
    hash::Hash,
    iter::{Enumerate, FusedIterator},
    slice,
};

use rustc_hash::{FxHashMap, FxHashSet};

use super::{error::VertexNotFound, id::VertexIndex, Neighbors};

/// Directed graph storing, for every vertex, the set of its successors.
///
/// Both the vertices and the adjacency sets preserve insertion order, which
/// makes every traversal over the graph deterministic. Vertices are identified
/// by equality of their values. An edge from a vertex to itself is allowed, a
/// repeated edge is not stored twice.
///
/// There is no removal. A graph that needs to start over is replaced by a new
/// one.
#[derive(Clone)]
pub struct DirectedGraph<V> {
    vertices: Vec<V>,
    indices: FxHashMap<V, VertexIndex>,
    adjacency: Vec<Vec<VertexIndex>>,
    edges: FxHashSet<(VertexIndex, VertexIndex)>,
}

impl<V> DirectedGraph<V> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: FxHashMap::default(),
            adjacency: Vec::new(),
            edges: FxHashSet::default(),
        }
    }

    /// Creates an empty graph with space for at least `vertex_count` vertices.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            indices: FxHashMap::with_capacity_and_hasher(vertex_count, Default::default()),
            adjacency: Vec::with_capacity(vertex_count),
            edges: FxHashSet::default(),
        }
    }

    /// Returns the number of distinct vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of distinct edges, self-loops included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the vertex with given index, if it exists.
    pub fn vertex(&self, index: VertexIndex) -> Option<&V> {
        self.vertices.get(index.as_usize())
    }

    /// Returns an iterator over the vertices in insertion order.
    pub fn vertices(&self) -> slice::Iter<'_, V> {
        self.vertices.iter()
    }

    /// Returns an iterator over `(vertex, adjacent vertices)` pairs in
    /// insertion order of the vertices.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            vertices: &self.vertices,
            inner: self.adjacency.iter().enumerate(),
        }
    }

    // Indices obtained from this graph are always valid.
    pub(crate) fn vertex_at(&self, index: VertexIndex) -> &V {
        &self.vertices[index.as_usize()]
    }

    pub(crate) fn add_edge_by_index(&mut self, from: VertexIndex, to: VertexIndex) {
        if self.edges.insert((from, to)) {
            self.adjacency[from.as_usize()].push(to);
        }
    }
}

impl<V> DirectedGraph<V>
where
    V: Eq + Hash,
{
    /// Returns the index of given vertex, `None` if the vertex is not in the
    /// graph.
    pub fn index_of<Q>(&self, vertex: &Q) -> Option<VertexIndex>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.indices.get(vertex).copied()
    }

    /// Returns `true` if the graph contains given vertex.
    pub fn contains_vertex<Q>(&self, vertex: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.indices.contains_key(vertex)
    }

    /// Returns the successors of given vertex in the order they were added.
    ///
    /// Fails with [`VertexNotFound`] if the vertex was never added.
    pub fn adjacent_vertices_of<Q>(
        &self,
        vertex: &Q,
    ) -> Result<AdjacentVertices<'_, V>, VertexNotFound>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.index_of(vertex).ok_or(VertexNotFound)?;
        Ok(self.adjacent(index))
    }

    fn adjacent(&self, index: VertexIndex) -> AdjacentVertices<'_, V> {
        AdjacentVertices {
            vertices: &self.vertices,
            inner: self.adjacency[index.as_usize()].iter(),
        }
    }
}

impl<V> DirectedGraph<V>
where
    V: Eq + Hash + Clone,
{
    /// Adds the vertex to the graph unless it is already present.
    ///
    /// Returns the index of the vertex in both cases. An already present
    /// vertex keeps its adjacent vertices.
    pub fn add_vertex(&mut self, vertex: V) -> VertexIndex {
        if let Some(index) = self.indices.get(&vertex) {
            return *index;
        }

        let index = VertexIndex::from(self.vertices.len());
        self.indices.insert(vertex.clone(), index);
        self.vertices.push(vertex);
        self.adjacency.push(Vec::new());
        index
    }

    /// Adds edges from `vertex` to every vertex in `destinations`.
    ///
    /// The source and all destinations are added as vertices first if they
    /// are not present yet, in this order. Edges that already exist are
    /// skipped. Returns the index of the source vertex.
    pub fn add_edges<I>(&mut self, vertex: V, destinations: I) -> VertexIndex
    where
        I: IntoIterator<Item = V>,
    {
        let from = self.add_vertex(vertex);

        for destination in destinations {
            let to = self.add_vertex(destination);
            self.add_edge_by_index(from, to);
        }

        from
    }

    /// Returns a new graph with the same vertices and all edges reversed.
    ///
    /// The vertices keep their indices, so the insertion order of the
    /// transposed graph is the same as of this one.
    pub fn transpose(&self) -> Self {
        crate::adapt::Transpose::new(self).apply()
    }
}

impl<V> Neighbors for DirectedGraph<V> {
    fn vertex_bound(&self) -> usize {
        self.vertices.len()
    }

    fn neighbors(&self, from: VertexIndex) -> &[VertexIndex] {
        &self.adjacency[from.as_usize()]
    }
}

impl<V> Default for DirectedGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for DirectedGraph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Two graphs are equal if they have the same vertices with the same adjacency
// in the same order.
impl<V: PartialEq> PartialEq for DirectedGraph<V> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.adjacency == other.adjacency
    }
}

impl<V: Eq> Eq for DirectedGraph<V> {}

impl<V> Extend<(V, Vec<V>)> for DirectedGraph<V>
where
    V: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (V, Vec<V>)>>(&mut self, iter: T) {
        for (vertex, destinations) in iter {
            self.add_edges(vertex, destinations);
        }
    }
}

impl<V> FromIterator<(V, Vec<V>)> for DirectedGraph<V>
where
    V: Eq + Hash + Clone,
{
    fn from_iter<T: IntoIterator<Item = (V, Vec<V>)>>(iter: T) -> Self {
        let mut graph = Self::new();
        graph.extend(iter);
        graph
    }
}

impl<'a, V> IntoIterator for &'a DirectedGraph<V> {
    type Item = (&'a V, AdjacentVertices<'a, V>);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the successors of a vertex, returned from
/// [`DirectedGraph::adjacent_vertices_of`].
pub struct AdjacentVertices<'a, V> {
    vertices: &'a [V],
    inner: slice::Iter<'a, VertexIndex>,
}

// Not derived, the derive would require `V: Clone`.
impl<V> Clone for AdjacentVertices<'_, V> {
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices,
            inner: self.inner.clone(),
        }
    }
}

impl<'a, V> Iterator for AdjacentVertices<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|index| &self.vertices[index.as_usize()])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for AdjacentVertices<'_, V> {}

impl<V> FusedIterator for AdjacentVertices<'_, V> {}

impl<V: fmt::Debug> fmt::Debug for AdjacentVertices<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.clone()).finish()
    }
}

/// Iterator over `(vertex, adjacent vertices)` pairs, returned from
/// [`DirectedGraph::iter`].
pub struct Iter<'a, V> {
    vertices: &'a [V],
    inner: Enumerate<slice::Iter<'a, Vec<VertexIndex>>>,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices,
            inner: self.inner.clone(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a V, AdjacentVertices<'a, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, adjacency) = self.inner.next()?;
        let adjacent = AdjacentVertices {
            vertices: self.vertices,
            inner: adjacency.iter(),
        };
        Some((&self.vertices[index], adjacent))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}
