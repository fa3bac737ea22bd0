use std::{fmt, slice};

/// Element of a [`Solution`](crate::algo::Solution).
///
/// A vertex either stands on its own, or it belongs to a non-trivial strongly
/// connected component together with at least one other vertex. Vertices in a
/// topological order are always singletons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Either<V> {
    /// A vertex without any cyclic partner.
    Singleton(V),
    /// A strongly connected component of two or more vertices.
    Component(Vec<V>),
}

impl<V> Either<V> {
    /// Wraps the vertices of a strongly connected component, choosing the
    /// variant by its size.
    ///
    /// # Panics
    ///
    /// Panics if `vertices` is empty.
    pub fn from_component(mut vertices: Vec<V>) -> Self {
        match vertices.len() {
            0 => panic!("strongly connected component is never empty"),
            1 => Either::Singleton(vertices.swap_remove(0)),
            _ => Either::Component(vertices),
        }
    }

    /// Returns `true` for [`Either::Singleton`].
    pub fn is_singleton(&self) -> bool {
        matches!(self, Either::Singleton(_))
    }

    /// Returns `true` for [`Either::Component`].
    pub fn is_component(&self) -> bool {
        matches!(self, Either::Component(_))
    }

    /// Returns the number of vertices.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns the vertices as a slice, a singleton being a slice of length
    /// one.
    pub fn as_slice(&self) -> &[V] {
        match self {
            Either::Singleton(vertex) => slice::from_ref(vertex),
            Either::Component(vertices) => vertices,
        }
    }

    /// Returns an iterator over the vertices.
    pub fn iter(&self) -> slice::Iter<'_, V> {
        self.as_slice().iter()
    }

    /// Returns `true` if the element contains the vertex.
    pub fn contains(&self, vertex: &V) -> bool
    where
        V: PartialEq,
    {
        self.as_slice().contains(vertex)
    }

    /// Maps every vertex with `f`, keeping the variant.
    pub fn map<U, F>(self, mut f: F) -> Either<U>
    where
        F: FnMut(V) -> U,
    {
        match self {
            Either::Singleton(vertex) => Either::Singleton(f(vertex)),
            Either::Component(vertices) => Either::Component(vertices.into_iter().map(f).collect()),
        }
    }

    /// Converts from `&Either<V>` to `Either<&V>`.
    pub fn as_ref(&self) -> Either<&V> {
        match self {
            Either::Singleton(vertex) => Either::Singleton(vertex),
            Either::Component(vertices) => Either::Component(vertices.iter().collect()),
        }
    }

    /// Consumes the element, returning its vertices.
    pub fn into_vec(self) -> Vec<V> {
        match self {
            Either::Singleton(vertex) => vec![vertex],
            Either::Component(vertices) => vertices,
        }
    }
}

impl<V: Clone> Either<&V> {
    /// Maps an `Either<&V>` to an `Either<V>` by cloning the vertices.
    pub fn cloned(self) -> Either<V> {
        self.map(Clone::clone)
    }
}

/// A singleton is rendered as the bare vertex, a component as its vertices in
/// square brackets separated by `", "`.
impl<V: fmt::Display> fmt::Display for Either<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Either::Singleton(vertex) => fmt::Display::fmt(vertex, f),
            Either::Component(vertices) => {
                f.write_str("[")?;
                for (i, vertex) in vertices.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(vertex, f)?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_component_size() {
        assert_eq!(Either::from_component(vec![3]), Either::Singleton(3));
        assert_eq!(
            Either::from_component(vec![3, 1]),
            Either::Component(vec![3, 1])
        );
    }

    #[test]
    #[should_panic]
    fn from_component_empty() {
        Either::<u32>::from_component(Vec::new());
    }

    #[test]
    fn display() {
        assert_eq!(Either::Singleton(42).to_string(), "42");
        assert_eq!(Either::Component(vec![1, 3, 2]).to_string(), "[1, 3, 2]");
    }

    #[test]
    fn slice_view() {
        let singleton = Either::Singleton(5);
        let component = Either::Component(vec![1, 2]);

        assert_eq!(singleton.as_slice(), &[5]);
        assert_eq!(singleton.len(), 1);
        assert_eq!(component.len(), 2);
        assert!(component.contains(&2));
        assert!(!singleton.contains(&2));
        assert_eq!(component.as_ref().cloned(), component);
    }
}
