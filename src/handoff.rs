//! Producer and consumer tasks coordinated through a [`Rendezvous`]
//!
//! The producer sends `Some(leaf)` for every leaf, then `None` as the end
//! marker. The consumer receives until it sees `None`. Neither side buffers
//! anything: each leaf is handed over before the producer moves on.
//!
//! Running the two tasks is left to the caller's executor, except for
//! [`flatten_via_channel`] which joins them on the current thread.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::future::Future;
use core::pin::Pin;

use embassy_futures::block_on;
use embassy_futures::join::join;

use crate::channel::Rendezvous;
use crate::error::Result;
use crate::nested::NestedValue;

/// Walks `root` recursively and sends each leaf as it is discovered
///
/// Returns the number of leaves sent, end marker excluded.
pub async fn produce<'a, T>(
    root: &'a NestedValue<T>,
    channel: &Rendezvous<Option<&'a T>>,
) -> Result<usize> {
    let sent = visit(root, channel).await?;
    channel.send(None).await?;
    log::debug!("producer sent {sent} leaves and the end marker");
    Ok(sent)
}

fn visit<'c, 'a: 'c, T>(
    value: &'a NestedValue<T>,
    channel: &'c Rendezvous<Option<&'a T>>,
) -> Pin<Box<dyn Future<Output = Result<usize>> + 'c>> {
    Box::pin(async move {
        match value {
            NestedValue::Leaf(leaf) => {
                channel.send(Some(leaf)).await?;
                Ok(1)
            }
            NestedValue::Sequence(children) => {
                let mut sent = 0;
                for child in children {
                    sent += visit(child, channel).await?;
                }
                Ok(sent)
            }
        }
    })
}

/// Forwards every item of an iterator, typically a [`Flattener`](crate::flatten::Flattener),
/// then the end marker
pub async fn pump<I>(items: I, channel: &Rendezvous<Option<I::Item>>) -> Result<usize>
where
    I: IntoIterator,
{
    let mut sent = 0;
    for item in items {
        channel.send(Some(item)).await?;
        sent += 1;
    }
    channel.send(None).await?;
    Ok(sent)
}

/// Receives values until the end marker, calling `f` on each
///
/// Returns the number of values received.
pub async fn consume<V, F>(channel: &Rendezvous<Option<V>>, mut f: F) -> Result<usize>
where
    F: FnMut(V),
{
    let mut received = 0;
    while let Some(value) = channel.receive().await? {
        f(value);
        received += 1;
    }
    log::debug!("consumer saw the end marker after {received} values");
    Ok(received)
}

/// Flattens `root` by running [`produce`] and a collecting [`consume`] side by side
///
/// ```
/// use unnest::{handoff, nested, NestedValue};
///
/// let value: NestedValue = nested![1, [[2, 3], [4, 5]], [6, 7, 8]];
/// let leaves = handoff::flatten_via_channel(&value).unwrap();
/// assert_eq!(leaves, [&1, &2, &3, &4, &5, &6, &7, &8]);
/// ```
pub fn flatten_via_channel<T>(root: &NestedValue<T>) -> Result<Vec<&T>> {
    let channel = Rendezvous::new();
    let mut leaves = Vec::new();

    let (produced, consumed) = block_on(join(
        produce(root, &channel),
        consume(&channel, |leaf| leaves.push(leaf)),
    ));
    produced?;
    consumed?;

    Ok(leaves)
}
