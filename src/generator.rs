//! Generators on stable Rust, by polling `async` bodies by hand
//!
//! An `async` block already compiles to a resumable state machine. Polling it
//! with a waker that does nothing, and making every `await` on
//! [`Co::suspend`] return `Pending` exactly once, turns it into a generator:
//! each `Pending` is a yield, each subsequent poll a resume.
//!
//! This is the native-generator rendition of leaf flattening, kept next to the
//! explicit [`Flattener`](crate::flatten::Flattener) as an independent
//! reference. Unlike the flattener it still needs one boxed future per level
//! of nesting, see [`leaves`].

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;
use core::future::Future;
use core::iter::FusedIterator;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

use crate::nested::NestedValue;

type Slot<Y> = Rc<Cell<Option<Y>>>;

/// Handle given to a generator body to hand values out
///
/// Shares the yield slot with the [`Gn`] driving the body.
pub struct Co<Y> {
    slot: Slot<Y>,
}

impl<Y> Co<Y> {
    /// Suspends the execution of the generator, yielding `value`
    pub fn suspend(&self, value: Y) -> Interrupt<Y> {
        Interrupt {
            yielded_value: Some(value),
            slot: Rc::clone(&self.slot),
        }
    }
}

/// Future resolving once the generator is resumed after a [`Co::suspend`]
///
/// This is the only future that may be pending inside a generator body.
#[must_use = "values are only yielded when the interrupt is `.await`ed"]
pub struct Interrupt<Y> {
    yielded_value: Option<Y>,
    slot: Slot<Y>,
}

impl<Y> Unpin for Interrupt<Y> {}

impl<Y> Future for Interrupt<Y> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let Some(yielded_value) = this.yielded_value.take() {
            this.slot.set(Some(yielded_value));
            Poll::Pending
        } else {
            Poll::Ready(())
        }
    }
}

/// The result of resuming a generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GnState<Y> {
    Suspended(Y),
    Completed,
}

/// A generator yielding values of type `Y`
#[must_use = "generators do nothing unless you `.resume()` or iterate them"]
pub struct Gn<'a, Y> {
    slot: Slot<Y>,
    body: Pin<Box<dyn Future<Output = ()> + 'a>>,
    completed: bool,
}

impl<'a, Y: 'a> Gn<'a, Y> {
    /// Builds a generator from a function producing its body
    ///
    /// The body does not run until the first [`resume`](Self::resume).
    pub fn new<Producer, Body>(producer: Producer) -> Self
    where
        Producer: FnOnce(Co<Y>) -> Body,
        Body: Future<Output = ()> + 'a,
    {
        let slot = Rc::new(Cell::new(None));
        let co = Co {
            slot: Rc::clone(&slot),
        };

        Self {
            slot,
            body: Box::pin(producer(co)),
            completed: false,
        }
    }
}

impl<Y> Gn<'_, Y> {
    /// Returns whether the body ran to completion
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Runs the body until its next yield or its end
    ///
    /// Resuming a completed generator returns [`GnState::Completed`] again.
    pub fn resume(&mut self) -> GnState<Y> {
        if self.completed {
            return GnState::Completed;
        }

        let mut context = Context::from_waker(Waker::noop());

        match self.body.as_mut().poll(&mut context) {
            Poll::Pending => {
                let value = self
                    .slot
                    .take()
                    .expect("generator bodies may only await `Co::suspend`");
                GnState::Suspended(value)
            }
            Poll::Ready(()) => {
                log::debug!("generator completed");
                self.completed = true;
                GnState::Completed
            }
        }
    }
}

impl<Y> Iterator for Gn<'_, Y> {
    type Item = Y;

    fn next(&mut self) -> Option<Self::Item> {
        match self.resume() {
            GnState::Suspended(value) => Some(value),
            GnState::Completed => None,
        }
    }
}

impl<Y> FusedIterator for Gn<'_, Y> {}

impl<Y> fmt::Debug for Gn<'_, Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gn")
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

/// Leaves of `root`, in depth-first order, produced by a recursive generator
///
/// Each nesting level is its own boxed future awaiting the next one, so a
/// yield travels back up through every enclosing level on each resume.
///
/// ```
/// use unnest::{generator, nested, NestedValue};
///
/// let value: NestedValue = nested![1, [[2, 3], [4, 5]], [6, 7, 8]];
/// let leaves: Vec<i64> = generator::leaves(&value).copied().collect();
/// assert_eq!(leaves, [1, 2, 3, 4, 5, 6, 7, 8]);
/// ```
pub fn leaves<T>(root: &NestedValue<T>) -> Gn<'_, &T> {
    Gn::new(move |co| async move { walk(&co, root).await })
}

fn walk<'c, 'a: 'c, T>(
    co: &'c Co<&'a T>,
    value: &'a NestedValue<T>,
) -> Pin<Box<dyn Future<Output = ()> + 'c>> {
    Box::pin(async move {
        match value {
            NestedValue::Leaf(leaf) => co.suspend(leaf).await,
            NestedValue::Sequence(children) => {
                for child in children {
                    walk(co, child).await;
                }
            }
        }
    })
}
