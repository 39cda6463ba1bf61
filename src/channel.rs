//! Zero-capacity rendezvous between one producer task and one consumer task
//!
//! Whichever side arrives first suspends; the second one completes the
//! handoff immediately and wakes the first. There is no buffer: a send only
//! resolves once its value has been taken by a receive.
//!
//! The channel has no closed state. End of stream is a value like any other,
//! usually `None` in a `Rendezvous<Option<T>>`.
//!
//! ```
//! use embassy_futures::{block_on, join::join};
//! use unnest::channel::Rendezvous;
//!
//! let channel = Rendezvous::new();
//!
//! let producer = async {
//!     for value in 1..=3 {
//!         channel.send(Some(value)).await?;
//!     }
//!     channel.send(None).await
//! };
//!
//! let consumer = async {
//!     let mut received = Vec::new();
//!     while let Some(value) = channel.receive().await? {
//!         received.push(value);
//!     }
//!     Ok::<_, unnest::Error>(received)
//! };
//!
//! let (sent, received) = block_on(join(producer, consumer));
//! assert!(sent.is_ok());
//! assert_eq!(received.unwrap(), [1, 2, 3]);
//! ```

use core::cell::{Cell, RefCell};
use core::fmt;
use core::future::Future;
use core::mem;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

use crate::error::{Error, Result, Role};

enum Slot<T> {
    Idle,
    /// Stored by a producer that is suspended until the value is taken
    ValueHeld { value: T, producer: Waker },
    ConsumerWaiting(Waker),
}

struct Inner<T> {
    slot: Slot<T>,
    /// Given to a consumer that was already waiting, not picked up yet
    ///
    /// Only set on the `ConsumerWaiting -> Idle` transition, and drained by
    /// the next receive before it looks at the slot.
    handed: Option<T>,
}

/// Observable state of a [`Rendezvous`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelState {
    Idle,
    ValueHeld,
    ConsumerWaiting,
}

/// Single-slot synchronous handoff point
///
/// Meant to be shared by reference between exactly two tasks running on the
/// same executor. A second `send` (or `receive`) issued while one is still in
/// flight resolves with [`Error::ConcurrentAccessViolation`].
///
/// Dropping one side while the other is suspended leaves the other suspended
/// forever.
pub struct Rendezvous<T> {
    inner: RefCell<Inner<T>>,
    sending: Cell<bool>,
    receiving: Cell<bool>,
}

impl<T> Rendezvous<T> {
    pub const fn new() -> Self {
        Self {
            inner: RefCell::new(Inner {
                slot: Slot::Idle,
                handed: None,
            }),
            sending: Cell::new(false),
            receiving: Cell::new(false),
        }
    }

    pub fn state(&self) -> ChannelState {
        match &self.inner.borrow().slot {
            Slot::Idle => ChannelState::Idle,
            Slot::ValueHeld { .. } => ChannelState::ValueHeld,
            Slot::ConsumerWaiting(_) => ChannelState::ConsumerWaiting,
        }
    }

    /// Hands `value` over to the consumer
    ///
    /// Resolves on the first poll if a consumer is already waiting, otherwise
    /// once a consumer has taken the value.
    pub fn send(&self, value: T) -> Sending<'_, T> {
        Sending {
            channel: self,
            stage: SendStage::Start(value),
        }
    }

    /// Takes the next value from the producer
    ///
    /// Resolves on the first poll if a value is already there, otherwise once
    /// a producer sends one.
    pub fn receive(&self) -> Receiving<'_, T> {
        Receiving {
            channel: self,
            stage: ReceiveStage::Start,
        }
    }
}

impl<T> Default for Rendezvous<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Rendezvous<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rendezvous")
            .field("state", &self.state())
            .field("handed", &self.inner.borrow().handed.is_some())
            .field("sending", &self.sending.get())
            .field("receiving", &self.receiving.get())
            .finish()
    }
}

enum SendStage<T> {
    Start(T),
    /// Stored in the slot, waiting to be drained
    Stored,
    Done,
}

/// Future returned by [`Rendezvous::send`]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Sending<'a, T> {
    channel: &'a Rendezvous<T>,
    stage: SendStage<T>,
}

// The value is moved around but never pinned.
impl<T> Unpin for Sending<'_, T> {}

impl<T> Sending<'_, T> {
    fn offer(&mut self, value: T, cx: &mut Context<'_>) -> Poll<Result<()>> {
        let mut inner = self.channel.inner.borrow_mut();

        match mem::replace(&mut inner.slot, Slot::Idle) {
            Slot::Idle => {
                log::trace!("rendezvous: idle -> value held, producer suspends");
                inner.slot = Slot::ValueHeld {
                    value,
                    producer: cx.waker().clone(),
                };
                self.stage = SendStage::Stored;
                Poll::Pending
            }
            Slot::ConsumerWaiting(consumer) => {
                log::trace!("rendezvous: consumer waiting -> idle, value handed off");
                inner.handed = Some(value);
                drop(inner);
                self.complete();
                consumer.wake();
                Poll::Ready(Ok(()))
            }
            // only an in-flight send stores a value
            held @ Slot::ValueHeld { .. } => {
                inner.slot = held;
                drop(inner);
                self.complete();
                Poll::Ready(Err(Error::ConcurrentAccessViolation {
                    role: Role::Producer,
                }))
            }
        }
    }

    fn await_drain(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        let mut inner = self.channel.inner.borrow_mut();

        if let Slot::ValueHeld { producer, .. } = &mut inner.slot {
            producer.clone_from(cx.waker());
            self.stage = SendStage::Stored;
            Poll::Pending
        } else {
            drop(inner);
            self.complete();
            Poll::Ready(Ok(()))
        }
    }

    fn complete(&mut self) {
        self.channel.sending.set(false);
        self.stage = SendStage::Done;
    }
}

impl<T> Future for Sending<'_, T> {
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        match mem::replace(&mut this.stage, SendStage::Done) {
            SendStage::Start(value) => {
                if this.channel.sending.replace(true) {
                    log::trace!("rendezvous: rejected concurrent send");
                    return Poll::Ready(Err(Error::ConcurrentAccessViolation {
                        role: Role::Producer,
                    }));
                }
                this.offer(value, cx)
            }
            SendStage::Stored => this.await_drain(cx),
            SendStage::Done => panic!("`Sending` polled after completion"),
        }
    }
}

impl<T> Drop for Sending<'_, T> {
    fn drop(&mut self) {
        if let SendStage::Stored = self.stage {
            let mut inner = self.channel.inner.borrow_mut();
            // retract the value that nobody took
            if let Slot::ValueHeld { .. } = inner.slot {
                log::trace!("rendezvous: pending send dropped, value retracted");
                inner.slot = Slot::Idle;
            }
            self.channel.sending.set(false);
        }
    }
}

enum ReceiveStage {
    Start,
    Waiting,
    Done,
}

/// Future returned by [`Rendezvous::receive`]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Receiving<'a, T> {
    channel: &'a Rendezvous<T>,
    stage: ReceiveStage,
}

impl<T> Receiving<'_, T> {
    fn take(&mut self, cx: &mut Context<'_>) -> Poll<Result<T>> {
        let mut inner = self.channel.inner.borrow_mut();

        if let Some(value) = inner.handed.take() {
            drop(inner);
            self.complete();
            return Poll::Ready(Ok(value));
        }

        match mem::replace(&mut inner.slot, Slot::Idle) {
            Slot::ValueHeld { value, producer } => {
                log::trace!("rendezvous: value held -> idle");
                drop(inner);
                self.complete();
                producer.wake();
                Poll::Ready(Ok(value))
            }
            Slot::Idle | Slot::ConsumerWaiting(_) => {
                log::trace!("rendezvous: idle -> consumer waiting");
                inner.slot = Slot::ConsumerWaiting(cx.waker().clone());
                self.stage = ReceiveStage::Waiting;
                Poll::Pending
            }
        }
    }

    fn complete(&mut self) {
        self.channel.receiving.set(false);
        self.stage = ReceiveStage::Done;
    }
}

impl<T> Future for Receiving<'_, T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        match mem::replace(&mut this.stage, ReceiveStage::Done) {
            ReceiveStage::Start => {
                if this.channel.receiving.replace(true) {
                    log::trace!("rendezvous: rejected concurrent receive");
                    return Poll::Ready(Err(Error::ConcurrentAccessViolation {
                        role: Role::Consumer,
                    }));
                }
                this.take(cx)
            }
            ReceiveStage::Waiting => this.take(cx),
            ReceiveStage::Done => panic!("`Receiving` polled after completion"),
        }
    }
}

impl<T> Drop for Receiving<'_, T> {
    fn drop(&mut self) {
        if let ReceiveStage::Waiting = self.stage {
            let mut inner = self.channel.inner.borrow_mut();
            if let Slot::ConsumerWaiting(_) = inner.slot {
                inner.slot = Slot::Idle;
            }
            self.channel.receiving.set(false);
        }
    }
}
