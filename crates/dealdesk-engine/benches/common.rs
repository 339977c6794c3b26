// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use dealdesk_engine::{Document, Node, NodeType};

/// A long deal description: headings, paragraphs and nested lists, repeated
#[allow(dead_code)]
pub fn generate_deal_document(sections: usize) -> Document {
    let mut blocks = Vec::new();
    for section in 0..sections {
        blocks.push(Node::heading(2, &format!("Section {section}")));
        blocks.push(Node::paragraph(
            "Some paragraph content with multiple sentences. This helps create realistic document structure.",
        ));
        blocks.push(Node::element(
            NodeType::BulletList,
            (0..3)
                .map(|i| {
                    Node::list_item(
                        &format!("Item {i}"),
                        vec![Node::element(
                            NodeType::OrderedList,
                            vec![Node::list_item("Nested item", vec![])],
                        )],
                    )
                })
                .collect(),
        ));
    }
    // Generated blocks always satisfy the schema
    Document::from_blocks(blocks).unwrap()
}
