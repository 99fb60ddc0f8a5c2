//! Plain-text extraction for rich-text listing descriptions.
//!
//! Editor content arrives as a tree of `text` leaves nested inside `container` nodes. Each
//! top-level block renders as one line of plain text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RichTextNode {
    Text {
        text: String,
    },
    Container {
        #[serde(default)]
        children: Vec<RichTextNode>,
    },
}

impl RichTextNode {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text { text: value.into() }
    }

    pub fn container(children: Vec<RichTextNode>) -> Self {
        Self::Container { children }
    }

    /// Text leaves under this node, depth-first and left to right.
    pub fn texts(&self) -> TextLeaves<'_> {
        TextLeaves {
            stack: vec![std::slice::from_ref(self).iter()],
        }
    }
}

/// Ordered sequence of top-level blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichTextDocument {
    pub blocks: Vec<RichTextNode>,
}

impl RichTextDocument {
    pub fn new(blocks: Vec<RichTextNode>) -> Self {
        Self { blocks }
    }

    /// Every text leaf of the document. Each call starts a fresh traversal.
    pub fn texts(&self) -> TextLeaves<'_> {
        TextLeaves {
            stack: vec![self.blocks.iter()],
        }
    }

    /// Blocks joined with newlines; blocks without visible text are dropped.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.texts().collect::<String>())
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Plain text cut to at most `max_chars` characters, marked with an ellipsis when cut.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let text = self.plain_text();
        if text.chars().count() <= max_chars {
            return text;
        }

        let mut cut: String = text.chars().take(max_chars).collect();
        cut.truncate(cut.trim_end().len());
        cut.push('…');
        cut
    }
}

/// Lazy depth-first walk over text leaves using an explicit stack.
pub struct TextLeaves<'a> {
    stack: Vec<std::slice::Iter<'a, RichTextNode>>,
}

impl<'a> Iterator for TextLeaves<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(level) = self.stack.last_mut() {
            match level.next() {
                Some(RichTextNode::Text { text }) => return Some(text.as_str()),
                Some(RichTextNode::Container { children }) => self.stack.push(children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
