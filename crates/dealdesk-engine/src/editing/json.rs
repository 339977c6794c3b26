use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::editing::{DocumentError, Node, NodeType};

/// Wire shape of one node in the editor's JSON document
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct JsonNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    content: Vec<JsonNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    marks: Vec<Value>,
}

fn node_type(raw: &JsonNode) -> Result<NodeType, DocumentError> {
    let kind = match raw.kind.as_str() {
        "doc" => NodeType::Doc,
        "paragraph" => NodeType::Paragraph,
        "heading" => {
            let level = raw
                .attrs
                .as_ref()
                .and_then(|attrs| attrs.get("level"))
                .and_then(Value::as_u64)
                .and_then(|level| u8::try_from(level).ok())
                .unwrap_or(1);
            NodeType::Heading { level }
        }
        "listItem" => NodeType::ListItem,
        "bulletList" => NodeType::BulletList,
        "orderedList" => NodeType::OrderedList,
        "taskList" => NodeType::TaskList,
        "blockquote" => NodeType::Blockquote,
        "codeBlock" => NodeType::CodeBlock,
        "horizontalRule" => NodeType::HorizontalRule,
        "hardBreak" => NodeType::HardBreak,
        "text" => NodeType::Text,
        // Leaves owned by other extensions are carried through untouched
        other if raw.content.is_empty() && raw.text.is_none() => {
            NodeType::Atom(other.to_string())
        }
        other => return Err(DocumentError::UnknownNodeType(other.to_string())),
    };
    Ok(kind)
}

impl TryFrom<JsonNode> for Node {
    type Error = DocumentError;

    fn try_from(raw: JsonNode) -> Result<Self, Self::Error> {
        let kind = node_type(&raw)?;
        let JsonNode {
            attrs,
            content,
            text,
            marks,
            ..
        } = raw;

        let node = if kind == NodeType::Text {
            Node::text(text.unwrap_or_default())
        } else {
            let children = content
                .into_iter()
                .map(Node::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            Node::element(kind, children)
        };

        let node = match attrs {
            Some(attrs) => node.with_attrs(attrs),
            None => node,
        };
        Ok(node.with_marks(marks))
    }
}

impl From<&Node> for JsonNode {
    fn from(node: &Node) -> Self {
        let mut attrs = node.attrs().cloned();
        if let NodeType::Heading { level } = node.kind() {
            attrs
                .get_or_insert_with(Map::new)
                .insert("level".to_string(), Value::from(*level));
        }

        Self {
            kind: node.kind().name().to_string(),
            attrs,
            content: node.children().iter().map(JsonNode::from).collect(),
            text: node.is_text().then(|| node.text_str().to_string()),
            marks: node.marks().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Document;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: Value) -> Result<Document, DocumentError> {
        Document::from_json(&value.to_string())
    }

    #[test]
    fn test_parse_tiptap_document() {
        let doc = parse(json!({
            "type": "doc",
            "content": [
                {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Terms"}]},
                {"type": "bulletList", "content": [
                    {"type": "listItem", "content": [
                        {"type": "paragraph", "content": [{"type": "text", "text": "x"}]}
                    ]}
                ]}
            ]
        }))
        .unwrap();

        assert_eq!(
            doc.outline(),
            r#"[heading2("Terms"), bulletList[listItem[paragraph("x")]]]"#
        );
        assert_eq!(doc.size(), 7 + 7);
    }

    #[test]
    fn test_unknown_leaf_becomes_atom() {
        let doc = parse(json!({
            "type": "doc",
            "content": [
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "Price: "},
                    {"type": "variable", "attrs": {"key": "price"}}
                ]}
            ]
        }))
        .unwrap();

        let paragraph = &doc.blocks()[0];
        assert_eq!(paragraph.content_size(), 8);
        assert_eq!(
            paragraph.child(1).map(Node::kind),
            Some(&NodeType::Atom("variable".to_string()))
        );
    }

    #[test]
    fn test_unknown_container_is_rejected() {
        let result = parse(json!({
            "type": "doc",
            "content": [{"type": "callout", "content": [{"type": "paragraph"}]}]
        }));

        assert!(matches!(result, Err(DocumentError::UnknownNodeType(name)) if name == "callout"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Document::from_json("{\"type\": "),
            Err(DocumentError::Json(_))
        ));
    }

    #[test]
    fn test_round_trip_preserves_attrs_and_marks() {
        let value = json!({
            "type": "doc",
            "content": [
                {"type": "paragraph", "attrs": {"textAlign": "left"}, "content": [
                    {"type": "text", "text": "bold", "marks": [{"type": "bold"}]},
                    {"type": "hardBreak"},
                    {"type": "mention", "attrs": {"id": "u1"}}
                ]},
                {"type": "horizontalRule"},
                {"type": "heading", "attrs": {"level": 3}, "content": [{"type": "text", "text": "h"}]}
            ]
        });

        let doc = parse(value.clone()).unwrap();
        let back: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(back, value);
    }
}
