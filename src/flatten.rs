//! Pull-based flattening driven by an explicit frame stack
//!
//! A recursive generator over a tree keeps its pending ancestors on the call
//! stack. [`Flattener`] keeps them in a `Vec<Frame>` instead, so a traversal
//! can stop at any depth, hand a leaf out, and pick up exactly where it left
//! off on the next call, without any coroutine support from the runtime.
//!
//! ```
//! use unnest::{nested, NestedValue};
//!
//! let value: NestedValue = nested![1, [[2, 3], [4, 5]], [6, 7, 8]];
//! let mut leaves = value.flatten();
//!
//! assert_eq!(leaves.next(), Some(&1));
//! assert_eq!(leaves.next(), Some(&2));
//! // suspended two levels deep, inside `[2, 3]`
//! assert_eq!(leaves.depth(), 3);
//!
//! assert_eq!(leaves.copied().collect::<Vec<_>>(), [3, 4, 5, 6, 7, 8]);
//! ```

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::nested::NestedValue;

/// One suspended level of the traversal
///
/// `index` is the offset of the next child to visit, so `index == len` means
/// the level is exhausted and will be popped.
pub struct Frame<'a, T> {
    sequence: &'a [NestedValue<T>],
    index: usize,
}

impl<'a, T> Frame<'a, T> {
    fn new(sequence: &'a [NestedValue<T>]) -> Self {
        Self { sequence, index: 0 }
    }

    /// The sequence walked at this level
    pub fn sequence(&self) -> &'a [NestedValue<T>] {
        self.sequence
    }

    /// Offset of the next child to visit
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of children not visited yet
    pub fn remaining(&self) -> usize {
        self.sequence.len() - self.index
    }

    fn advance(&mut self) -> Option<&'a NestedValue<T>> {
        let child = self.sequence.get(self.index)?;
        self.index += 1;
        Some(child)
    }
}

impl<T> Clone for Frame<'_, T> {
    fn clone(&self) -> Self {
        Self {
            sequence: self.sequence,
            index: self.index,
        }
    }
}

impl<T> fmt::Debug for Frame<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("len", &self.sequence.len())
            .field("index", &self.index)
            .finish()
    }
}

/// Lazy, depth-first, left-to-right iterator over the leaves of a [`NestedValue`]
///
/// Each call to [`next`](Iterator::next) runs the traversal until the next
/// leaf is found and returns it, leaving the frame stack as it is. Once
/// `None` has been returned the flattener stays exhausted; it is not
/// restartable, build a new one to traverse again.
///
/// `next` takes `&mut self`: a flattener has a single consumer at a time.
#[must_use = "flatteners do nothing unless iterated"]
pub struct Flattener<'a, T> {
    stack: Vec<Frame<'a, T>>,
    // a `Leaf` root, yielded as-is on the first call
    queued: Option<&'a T>,
    finished: bool,
}

impl<'a, T> Flattener<'a, T> {
    pub fn new(root: &'a NestedValue<T>) -> Self {
        match root {
            NestedValue::Leaf(value) => Self {
                stack: Vec::new(),
                queued: Some(value),
                finished: false,
            },
            NestedValue::Sequence(children) => Self {
                stack: alloc::vec![Frame::new(children)],
                queued: None,
                finished: false,
            },
        }
    }

    /// Returns whether the end of the sequence was reached
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of live frames, i.e. how many sequences enclose the resumption point
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The frame stack, from the root down to the resumption point
    pub fn frames(&self) -> &[Frame<'a, T>] {
        &self.stack
    }

    fn finish(&mut self) -> Option<&'a T> {
        log::debug!("flattener exhausted");
        self.finished = true;
        None
    }
}

impl<'a, T> From<&'a NestedValue<T>> for Flattener<'a, T> {
    fn from(root: &'a NestedValue<T>) -> Self {
        Self::new(root)
    }
}

impl<'a, T> Iterator for Flattener<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(value) = self.queued.take() {
            return Some(value);
        }

        while !self.finished {
            let Some(top) = self.stack.last_mut() else {
                return self.finish();
            };

            match top.advance() {
                // ascend
                None => {
                    self.stack.pop();
                }
                Some(NestedValue::Leaf(value)) => return Some(value),
                // descend
                Some(NestedValue::Sequence(children)) => {
                    self.stack.push(Frame::new(children));
                }
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            (usize::from(self.queued.is_some()), None)
        }
    }
}

impl<T> FusedIterator for Flattener<'_, T> {}

impl<T> fmt::Debug for Flattener<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flattener")
            .field("stack", &self.stack)
            .field("queued", &self.queued.is_some())
            .field("finished", &self.finished)
            .finish()
    }
}
