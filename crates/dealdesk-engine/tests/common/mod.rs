// Shared by several integration test binaries; not every binary uses every helper
#![allow(dead_code)]

use dealdesk_engine::{Document, Node, NodeType};

pub fn paragraphs(texts: &[&str]) -> Document {
    Document::from_blocks(texts.iter().map(|t| Node::paragraph(t)).collect()).unwrap()
}

pub fn list(kind: NodeType, items: &[&str]) -> Node {
    Node::element(
        kind,
        items.iter().map(|t| Node::list_item(t, vec![])).collect(),
    )
}

pub fn bullet(items: &[&str]) -> Node {
    list(NodeType::BulletList, items)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.json",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

/// Documents covering top-level blocks, lists, single-item lists, nesting and atoms
pub fn sample_documents() -> Vec<Document> {
    vec![
        Document::from_blocks(vec![
            Node::paragraph("a"),
            Node::heading(2, "bb"),
            Node::paragraph("ccc"),
        ])
        .unwrap(),
        Document::from_blocks(vec![
            Node::paragraph("p"),
            bullet(&["x", "y", "z"]),
            Node::paragraph("q"),
        ])
        .unwrap(),
        Document::from_blocks(vec![
            bullet(&["x"]),
            Node::paragraph("p"),
            list(NodeType::OrderedList, &["y", "z"]),
        ])
        .unwrap(),
        Document::from_blocks(vec![
            Node::element(
                NodeType::Blockquote,
                vec![Node::paragraph("a"), Node::paragraph("b")],
            ),
            Node::paragraph("c"),
            Node::element(NodeType::HorizontalRule, vec![]),
        ])
        .unwrap(),
        Document::from_blocks(vec![
            Node::element(
                NodeType::BulletList,
                vec![
                    Node::list_item("x", vec![list(NodeType::TaskList, &["z"])]),
                    Node::list_item("y", vec![]),
                ],
            ),
            Node::paragraph("p"),
        ])
        .unwrap(),
    ]
}

/// No list is left without items anywhere in the tree
pub fn has_empty_list(node: &Node) -> bool {
    (node.kind().is_list() && node.child_count() == 0) || node.children().iter().any(has_empty_list)
}
