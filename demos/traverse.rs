use unnest::{generator, nested, NestedValue};

fn main() {
    let value: NestedValue = nested![1, [[2, 3], [4, 5]], [6, 7, 8]];
    println!("input: {value}");

    // Callback-based, the traversal keeps control until the end
    let mut visited = Vec::new();
    value.for_each_leaf(|leaf| visited.push(*leaf));
    println!("visitor:   {visited:?}");

    // Pull-based, suspended on an explicit frame stack between calls
    let mut flattener = value.flatten();
    let mut pulled = Vec::new();
    while let Some(leaf) = flattener.next() {
        println!(
            "pulled {leaf} with {} frame(s) pending: {:?}",
            flattener.depth(),
            flattener.frames()
        );
        pulled.push(*leaf);
    }
    assert!(flattener.is_finished());
    assert_eq!(flattener.next(), None);

    // Pull-based, suspended inside nested async bodies
    let generated: Vec<i64> = generator::leaves(&value).copied().collect();
    println!("generator: {generated:?}");

    assert_eq!(visited, pulled);
    assert_eq!(visited, generated);
}
