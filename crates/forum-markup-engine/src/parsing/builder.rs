use crate::model::{ContentNode, StyledText, TextStyle};

/// Collects the output forest of one container body.
///
/// Inline text accumulates into a pending [`StyledText`]; pushing a block
/// node flushes it first, so text and blocks keep their source order and
/// consecutive text never splits into separate nodes.
#[derive(Debug, Default)]
pub struct NodeSink {
    out: Vec<ContentNode>,
    pending: StyledText,
}

impl NodeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, text: &str, style: &TextStyle) {
        self.pending.push(text, style);
    }

    pub fn push_node(&mut self, node: ContentNode) {
        self.flush_text();
        self.out.push(node);
    }

    pub fn finish(mut self) -> Vec<ContentNode> {
        // EOF flush
        self.flush_text();
        self.out
    }

    fn flush_text(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending);
        self.out.push(ContentNode::Text { text });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageRef;

    #[test]
    fn text_and_nodes_keep_order() {
        let mut sink = NodeSink::new();
        sink.push_text("a", &TextStyle::default());
        sink.push_text("b", &TextStyle::default());
        sink.push_node(ContentNode::image(ImageRef::new("x")));
        sink.push_text("c", &TextStyle::default());

        assert_eq!(
            sink.finish(),
            vec![
                ContentNode::text("ab"),
                ContentNode::image(ImageRef::new("x")),
                ContentNode::text("c"),
            ]
        );
    }

    #[test]
    fn empty_sink_yields_no_nodes() {
        let mut sink = NodeSink::new();
        sink.push_text("", &TextStyle::default());
        assert!(sink.finish().is_empty());
    }
}
