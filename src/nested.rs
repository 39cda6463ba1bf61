//! The traversed input: an arbitrarily nested sequence of leaves

use alloc::vec::Vec;
use core::fmt;

use crate::flatten::Flattener;

/// Builds a [`NestedValue`] from bracket literals
///
/// Each item is a single token tree: bracketed groups become sequences,
/// anything else (a literal, an identifier, a parenthesized expression such as
/// `(-1)`) becomes a leaf.
///
/// ```
/// use unnest::{nested, NestedValue};
///
/// let value: NestedValue = nested![1, [[2, 3], [4, 5]], [6, 7, 8]];
/// assert_eq!(value.leaf_count(), 8);
/// assert_eq!(value.to_string(), "[1, [[2, 3], [4, 5]], [6, 7, 8]]");
/// ```
#[macro_export]
macro_rules! nested {
    (@item [$($inner:tt)*]) => {
        $crate::nested![$($inner)*]
    };
    (@item $leaf:expr) => {
        $crate::NestedValue::Leaf($leaf)
    };
    ($($item:tt),* $(,)?) => {
        $crate::NestedValue::Sequence($crate::__private::vec![$($crate::nested!(@item $item)),*])
    };
}

/// A leaf value, or an ordered sequence of further nested values
///
/// Children are owned by their parent, so a value is always a finite tree:
/// cycles cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NestedValue<T = i64> {
    Leaf(T),
    Sequence(Vec<NestedValue<T>>),
}

impl<T> NestedValue<T> {
    /// Returns an empty sequence
    pub fn empty() -> Self {
        Self::Sequence(Vec::new())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&T> {
        if let Self::Leaf(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Returns the children of a sequence, `None` for a leaf
    pub fn children(&self) -> Option<&[NestedValue<T>]> {
        if let Self::Sequence(children) = self {
            Some(children.as_slice())
        } else {
            None
        }
    }

    /// Number of leaves in the whole tree
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.for_each_leaf(|_| count += 1);
        count
    }

    /// Nesting depth
    ///
    /// A leaf has depth 0, a sequence is one deeper than its deepest child
    /// (an empty sequence has depth 1).
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Sequence(children) => {
                1 + children.iter().map(NestedValue::depth).max().unwrap_or(0)
            }
        }
    }

    /// Internal iteration: calls `visitor` once per leaf, left to right, depth first
    ///
    /// Control never returns to the caller mid-traversal, so this is a plain
    /// recursive walk. Use [`flatten`](Self::flatten) to pull leaves one at a
    /// time instead.
    pub fn for_each_leaf<'a, F>(&'a self, mut visitor: F)
    where
        F: FnMut(&'a T),
    {
        fn walk<'a, T, F: FnMut(&'a T)>(value: &'a NestedValue<T>, visitor: &mut F) {
            match value {
                NestedValue::Leaf(leaf) => visitor(leaf),
                NestedValue::Sequence(children) => {
                    for child in children {
                        walk(child, visitor);
                    }
                }
            }
        }

        walk(self, &mut visitor);
    }

    /// Returns a lazy, pull-based iterator over the leaves
    pub fn flatten(&self) -> Flattener<'_, T> {
        Flattener::new(self)
    }
}

impl<T> Default for NestedValue<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<T> for NestedValue<T> {
    fn from(value: T) -> Self {
        Self::Leaf(value)
    }
}

impl<T> FromIterator<NestedValue<T>> for NestedValue<T> {
    fn from_iter<I: IntoIterator<Item = NestedValue<T>>>(iter: I) -> Self {
        Self::Sequence(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a NestedValue<T> {
    type Item = &'a T;

    type IntoIter = Flattener<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.flatten()
    }
}

impl<T: fmt::Display> fmt::Display for NestedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(value) => write!(f, "{value}"),
            Self::Sequence(children) => {
                f.write_str("[")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str("]")
            }
        }
    }
}
