//! Depth-first traversal shared by the algorithms.
//!
//! The traversal is **iterative**, that is, it doesn't use recursion. Each
//! vertex on the stack remembers the position of the next neighbor to examine,
//! which makes the order of discovered and closed vertices, and the point at
//! which a back edge is found, exactly the same as in the textbook recursive
//! formulation, but the depth is not limited by the size of the program stack.
//!
//! Roots are taken in the order of vertex indices, which is the insertion
//! order of the graph.

use fixedbitset::FixedBitSet;

use crate::core::{Neighbors, VertexIndex};

/// Visitation state of a vertex during a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Not discovered yet.
    Unvisited,
    /// Discovered, but some of its descendants are still being explored. The
    /// vertex is on the traversal stack.
    InProgress,
    /// The vertex and all its descendants are explored.
    Done,
}

/// Colors of all vertices of a graph, indexed by [`VertexIndex`].
#[derive(Debug, Clone)]
pub struct ColorMap {
    discovered: FixedBitSet,
    closed: FixedBitSet,
}

impl ColorMap {
    /// Creates a map with all `vertex_count` vertices unvisited.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            discovered: FixedBitSet::with_capacity(vertex_count),
            closed: FixedBitSet::with_capacity(vertex_count),
        }
    }

    /// Returns the color of the vertex.
    pub fn color(&self, vertex: VertexIndex) -> Color {
        let index = vertex.as_usize();
        if self.closed.contains(index) {
            Color::Done
        } else if self.discovered.contains(index) {
            Color::InProgress
        } else {
            Color::Unvisited
        }
    }

    /// Returns `true` if the vertex is not discovered yet.
    pub fn is_unvisited(&self, vertex: VertexIndex) -> bool {
        !self.discovered.contains(vertex.as_usize())
    }

    fn discover(&mut self, vertex: VertexIndex) {
        self.discovered.insert(vertex.as_usize());
    }

    fn close(&mut self, vertex: VertexIndex) {
        self.closed.insert(vertex.as_usize());
    }

    /// Makes all vertices unvisited again.
    pub fn reset(&mut self) {
        self.discovered.clear();
        self.closed.clear();
    }
}

/// An event of the depth-first traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsEvent {
    /// The vertex was discovered, either as a root or via a tree edge.
    Open(VertexIndex),
    /// An edge leading to a vertex which is in progress was examined. In a
    /// directed graph this means a cycle. Self-loops are reported too.
    BackEdge { from: VertexIndex, to: VertexIndex },
    /// All successors of the vertex were explored.
    Close(VertexIndex),
}

/// Trait for a traversal that is advanced one step at a time over a graph it
/// does not hold a reference to.
pub trait Visitor<G> {
    /// The type of the elements being visited.
    type Item;

    /// Advances the visitor and returns the next visited element in given
    /// graph.
    fn visit_next(&mut self, graph: &G) -> Option<Self::Item>;

    /// Returns an [iterator](Iterator) that uses the visitor to iterate over
    /// the elements in given graph.
    fn iter<'a>(&'a mut self, graph: &'a G) -> Iter<'a, Self, G>
    where
        Self: Sized,
    {
        Iter {
            visitor: self,
            graph,
        }
    }
}

/// Visitor iterator returned from [`Visitor::iter`].
pub struct Iter<'a, V, G> {
    visitor: &'a mut V,
    graph: &'a G,
}

impl<V, G> Iterator for Iter<'_, V, G>
where
    V: Visitor<G>,
{
    type Item = V::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.visitor.visit_next(self.graph)
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: VertexIndex,
    // Position of the next neighbor to examine.
    next: usize,
}

/// Depth-first traversal producing [`DfsEvent`]s.
///
/// The state (colors and stack) is kept between [`start`](DfsEvents::start)
/// calls, so consecutive traversals from different roots never enter vertices
/// visited before, until [`reset`](DfsEvents::reset) is called.
#[derive(Debug, Clone)]
pub struct DfsEvents {
    colors: ColorMap,
    stack: Vec<Frame>,
    opened: Option<VertexIndex>,
}

impl DfsEvents {
    pub fn new<G: Neighbors>(graph: &G) -> Self {
        Self {
            colors: ColorMap::new(graph.vertex_bound()),
            stack: Vec::new(),
            opened: None,
        }
    }

    /// Starts a traversal from the root.
    ///
    /// If the root was already visited, the traversal is empty.
    pub fn start(&mut self, root: VertexIndex) -> DfsEventsRooted<'_> {
        self.stack.clear();
        self.opened = None;

        if self.colors.is_unvisited(root) {
            self.open(root);
        }

        DfsEventsRooted { raw: self }
    }

    /// Starts a traversal that covers all vertices of the graph. A new root is
    /// the first unvisited vertex in the order of indices whenever the
    /// previous traversal tree is finished.
    pub fn start_all(&mut self) -> DfsEventsAll<'_> {
        self.stack.clear();
        self.opened = None;
        DfsEventsAll {
            raw: self,
            next_root: 0,
        }
    }

    /// Makes all vertices unvisited again.
    pub fn reset(&mut self) {
        self.colors.reset();
        self.stack.clear();
        self.opened = None;
    }

    /// Returns the current colors of the vertices.
    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    fn open(&mut self, vertex: VertexIndex) {
        self.colors.discover(vertex);
        self.stack.push(Frame { vertex, next: 0 });
        self.opened = Some(vertex);
    }

    fn next<G: Neighbors>(&mut self, graph: &G) -> Option<DfsEvent> {
        if let Some(vertex) = self.opened.take() {
            return Some(DfsEvent::Open(vertex));
        }

        let frame = self.stack.last_mut()?;
        let from = frame.vertex;
        let neighbors = graph.neighbors(from);

        while let Some(&to) = neighbors.get(frame.next) {
            frame.next += 1;

            match self.colors.color(to) {
                Color::Unvisited => {
                    self.colors.discover(to);
                    self.stack.push(Frame { vertex: to, next: 0 });
                    return Some(DfsEvent::Open(to));
                }
                Color::InProgress => return Some(DfsEvent::BackEdge { from, to }),
                Color::Done => {}
            }
        }

        // All neighbors exhausted.
        self.stack.pop();
        self.colors.close(from);
        Some(DfsEvent::Close(from))
    }
}

/// Traversal from a single root, returned from [`DfsEvents::start`].
pub struct DfsEventsRooted<'a> {
    raw: &'a mut DfsEvents,
}

impl<G: Neighbors> Visitor<G> for DfsEventsRooted<'_> {
    type Item = DfsEvent;

    fn visit_next(&mut self, graph: &G) -> Option<Self::Item> {
        self.raw.next(graph)
    }
}

/// Traversal over all vertices, returned from [`DfsEvents::start_all`].
pub struct DfsEventsAll<'a> {
    raw: &'a mut DfsEvents,
    next_root: usize,
}

impl<G: Neighbors> Visitor<G> for DfsEventsAll<'_> {
    type Item = DfsEvent;

    fn visit_next(&mut self, graph: &G) -> Option<Self::Item> {
        if let Some(event) = self.raw.next(graph) {
            return Some(event);
        }

        // Vertices never become unvisited during a traversal, so the search
        // for the next root can continue where the previous one ended.
        let bound = graph.vertex_bound();
        while self.next_root < bound {
            let root = VertexIndex::from(self.next_root);
            self.next_root += 1;

            if self.raw.colors.is_unvisited(root) {
                self.raw.open(root);
                return self.raw.next(graph);
            }
        }

        None
    }
}

/// Vertices in the order they are closed (post-order) by a traversal over all
/// vertices.
pub fn finish_order<G: Neighbors>(graph: &G) -> Vec<VertexIndex> {
    let mut dfs = DfsEvents::new(graph);
    let mut finished = Vec::with_capacity(graph.vertex_bound());

    for event in dfs.start_all().iter(graph) {
        if let DfsEvent::Close(vertex) = event {
            finished.push(vertex);
        }
    }

    finished
}

#[cfg(test)]
mod tests {
    use crate::core::DirectedGraph;

    use super::*;

    fn graph(edges: &[(u32, &[u32])]) -> DirectedGraph<u32> {
        edges
            .iter()
            .map(|(v, adj)| (*v, adj.to_vec()))
            .collect()
    }

    fn ix(index: usize) -> VertexIndex {
        VertexIndex::from(index)
    }

    #[test]
    fn events_follow_recursive_order() {
        // 0 -> 1 -> 2, 0 -> 2, 2 -> 0
        let graph = graph(&[(0, &[1, 2]), (1, &[2]), (2, &[0])]);

        let mut dfs = DfsEvents::new(&graph);
        let events = dfs.start_all().iter(&graph).collect::<Vec<_>>();

        assert_eq!(
            events,
            vec![
                DfsEvent::Open(ix(0)),
                DfsEvent::Open(ix(1)),
                DfsEvent::Open(ix(2)),
                DfsEvent::BackEdge {
                    from: ix(2),
                    to: ix(0)
                },
                DfsEvent::Close(ix(2)),
                DfsEvent::Close(ix(1)),
                DfsEvent::Close(ix(0)),
            ]
        );
    }

    #[test]
    fn roots_in_insertion_order() {
        let graph = graph(&[(5, &[]), (3, &[5]), (4, &[])]);

        assert_eq!(finish_order(&graph), vec![ix(0), ix(1), ix(2)]);
    }

    #[test]
    fn self_loop_is_back_edge() {
        let graph = graph(&[(1, &[1])]);

        let mut dfs = DfsEvents::new(&graph);
        let back_edges = dfs
            .start_all()
            .iter(&graph)
            .filter(|event| matches!(event, DfsEvent::BackEdge { .. }))
            .count();

        assert_eq!(back_edges, 1);
    }

    #[test]
    fn start_visited_root_is_empty() {
        let graph = graph(&[(0, &[1]), (1, &[])]);

        let mut dfs = DfsEvents::new(&graph);
        assert_eq!(dfs.start(ix(0)).iter(&graph).count(), 4);
        assert_eq!(dfs.start(ix(1)).iter(&graph).count(), 0);

        dfs.reset();
        assert_eq!(dfs.colors().color(ix(1)), Color::Unvisited);
        assert_eq!(dfs.start(ix(1)).iter(&graph).count(), 2);
    }

    #[test]
    fn colors_during_traversal() {
        let graph = graph(&[(0, &[1]), (1, &[])]);

        let mut dfs = DfsEvents::new(&graph);
        let mut visitor = dfs.start(ix(0));

        assert_eq!(visitor.visit_next(&graph), Some(DfsEvent::Open(ix(0))));
        assert_eq!(visitor.visit_next(&graph), Some(DfsEvent::Open(ix(1))));
        assert_eq!(visitor.visit_next(&graph), Some(DfsEvent::Close(ix(1))));

        assert_eq!(dfs.colors().color(ix(0)), Color::InProgress);
        assert_eq!(dfs.colors().color(ix(1)), Color::Done);
    }

    #[test]
    fn deep_path_does_not_overflow() {
        let n = 200_000u32;
        let graph = (0..n)
            .map(|v| (v, if v + 1 < n { vec![v + 1] } else { vec![] }))
            .collect::<DirectedGraph<_>>();

        let finished = finish_order(&graph);

        assert_eq!(finished.len(), n as usize);
        assert_eq!(finished.first(), Some(&ix(n as usize - 1)));
    }
}
