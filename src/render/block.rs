//! Block buffer stack.
//!
//! Block elements (document, paragraphs, quotes, headings, list items,
//! code blocks) render into stacked buffers. Entering a block pushes a
//! frame carrying its cascaded style rule and layout settings; leaving
//! one pops the frame, word-wraps its content to the remaining width,
//! applies indent tokens and margins, and appends the result to the
//! frame below. The bottom frame is the document and is only consumed
//! by [`BlockStack::finish`].

use crate::cells::{cell_len, wrap_words};
use crate::color::ColorSystem;
use crate::emit;
use crate::styles::{StyleBlock, StylePrimitive};

/// Indent token used when a block sets `indent` without a custom token.
const INDENT_UNIT: &str = "  ";

#[derive(Debug)]
struct BlockFrame {
    buf: String,
    rule: StylePrimitive,
    indent: usize,
    indent_token: Option<String>,
    margin: usize,
    wrap: bool,
}

impl BlockFrame {
    /// Columns this frame consumes from the render width. Margins are
    /// reserved on both sides; indent tokens on the left only.
    fn overhead(&self) -> usize {
        let token_width = self
            .indent_token
            .as_deref()
            .map_or(cell_len(INDENT_UNIT), cell_len);
        self.margin * 2 + self.indent * token_width
    }
}

#[derive(Debug)]
pub struct BlockStack {
    frames: Vec<BlockFrame>,
    width: usize,
    color_system: Option<ColorSystem>,
}

impl BlockStack {
    /// Create a stack with the document frame at the bottom.
    ///
    /// The document frame never rewraps: content arriving from inner
    /// frames is already wrapped, and unwrapped content (code lines,
    /// table grids) must pass through verbatim. It only applies the
    /// document margin.
    pub fn new(width: usize, color_system: Option<ColorSystem>, document: &StyleBlock) -> Self {
        let mut stack = Self {
            frames: Vec::new(),
            width,
            color_system,
        };
        stack.push(document.style.clone(), document, false);
        stack
    }

    /// Push a block frame. `rule` must already be cascaded over the
    /// current ambient rule.
    pub fn push(&mut self, rule: StylePrimitive, block: &StyleBlock, wrap: bool) {
        self.frames.push(BlockFrame {
            buf: String::new(),
            rule,
            indent: block.indent.unwrap_or(0),
            indent_token: block.indent_token.clone(),
            margin: block.margin.unwrap_or(0),
            wrap,
        });
    }

    fn current(&self) -> &BlockFrame {
        self.frames.last().expect("block stack holds the document")
    }

    /// Buffer of the innermost open block.
    pub fn buf(&mut self) -> &mut String {
        &mut self
            .frames
            .last_mut()
            .expect("block stack holds the document")
            .buf
    }

    /// Ambient style rule of the innermost open block.
    #[must_use]
    pub fn rule(&self) -> &StylePrimitive {
        &self.current().rule
    }

    fn total_overhead(&self) -> usize {
        self.frames.iter().map(BlockFrame::overhead).sum()
    }

    /// Columns left for content inside the innermost block.
    #[must_use]
    pub fn available_width(&self) -> usize {
        self.width.saturating_sub(self.total_overhead()).max(1)
    }

    /// Pop the innermost block and append its laid-out content to the
    /// frame below. The document frame is never popped here.
    pub fn finish_block(&mut self) {
        if self.frames.len() < 2 {
            return;
        }
        let frame = self.frames.pop().expect("checked depth above");
        let rendered = self.render_frame(&frame, Some(self.rule().clone()));
        self.buf().push_str(&rendered);
    }

    /// Consume the stack, laying out the document frame itself.
    #[must_use]
    pub fn finish(mut self) -> String {
        while self.frames.len() > 1 {
            self.finish_block();
        }
        let frame = self.frames.pop().expect("block stack holds the document");
        self.render_frame(&frame, None)
    }

    /// Ensure the innermost buffer ends with a blank line, for
    /// separating sibling blocks.
    pub fn ensure_blank_line(&mut self) {
        let buf = self.buf();
        if buf.is_empty() || buf.ends_with("\n\n") {
            return;
        }
        if !buf.ends_with('\n') {
            buf.push('\n');
        }
        buf.push('\n');
    }

    fn render_frame(&self, frame: &BlockFrame, parent_rule: Option<StylePrimitive>) -> String {
        let content = frame.buf.trim_end_matches('\n');
        if content.is_empty() {
            return String::new();
        }

        let available = self
            .width
            .saturating_sub(self.total_overhead() + frame.overhead())
            .max(1);
        let lines: Vec<String> = if frame.wrap {
            wrap_words(content, available)
        } else {
            content.split('\n').map(String::from).collect()
        };

        let margin = " ".repeat(frame.margin);
        let token = frame
            .indent_token
            .as_deref()
            .unwrap_or(INDENT_UNIT)
            .repeat(frame.indent);
        let parent_rule = parent_rule.unwrap_or_default();

        let mut out = String::new();
        for line in &lines {
            if line.is_empty() {
                // Keep custom tokens (quote bars) on blank lines, but
                // never leave trailing spaces behind.
                let bare = token.trim_end();
                if !bare.is_empty() {
                    out.push_str(&margin);
                    emit::styled_text(&mut out, self.color_system, &parent_rule, bare);
                }
            } else {
                out.push_str(&margin);
                emit::styled_text(&mut out, self.color_system, &parent_rule, &token);
                out.push_str(line);
            }
            out.push('\n');
        }
        out
    }
}
