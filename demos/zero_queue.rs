use embassy_futures::join::join;
use embassy_futures::{block_on, yield_now};
use unnest::{handoff, nested, NestedValue, Rendezvous};

fn main() {
    let value: NestedValue = nested![1, [[2, 3], [4, 5]], [6, 7, 8]];
    let channel = Rendezvous::new();

    // The producer walks the tree recursively and blocks on every leaf until
    // the consumer takes it.
    let producer = handoff::produce(&value, &channel);

    let consumer = async {
        let mut received = Vec::new();
        while let Some(leaf) = channel.receive().await? {
            println!("{leaf}");
            received.push(*leaf);
            // let the producer run ahead and wait on the next leaf
            yield_now().await;
        }
        Ok::<_, unnest::Error>(received)
    };

    let (sent, received) = block_on(join(producer, consumer));
    let sent = sent.expect("single producer");
    let received = received.expect("single consumer");

    assert_eq!(sent, 8);
    assert_eq!(received, [1, 2, 3, 4, 5, 6, 7, 8]);
}
