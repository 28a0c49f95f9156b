//! Shared state for one render pass.
//!
//! The context owns the block stack, the table slot, and the inline
//! style stack. All text funnels through [`RenderContext::emit_text`] so
//! capture modes (image alt text, link destinations) and table cell
//! redirection stay in one place.

use crate::color::ColorSystem;
use crate::emit;
use crate::render::block::BlockStack;
use crate::render::table::TableComposer;
use crate::styles::{StylePrimitive, StyleSheet};

/// One open list; tracks numbering for ordered lists.
#[derive(Debug)]
pub(crate) struct ListState {
    pub ordered: bool,
    pub index: u64,
}

/// An open link: destination plus the literal text seen so far, for
/// suppressing duplicate URLs on autolinks.
#[derive(Debug)]
pub(crate) struct LinkState {
    pub dest: String,
    pub plain: String,
}

/// An open image; alt text is captured rather than emitted.
#[derive(Debug)]
pub(crate) struct ImageState {
    pub dest: String,
    pub alt: String,
}

pub(crate) struct RenderContext<'a> {
    pub sheet: &'a StyleSheet,
    pub color_system: Option<ColorSystem>,
    pub blocks: BlockStack,
    /// Table under assembly, if the walk is inside one.
    pub table: Option<TableComposer>,
    pub lists: Vec<ListState>,
    pub link: Option<LinkState>,
    pub image: Option<ImageState>,
    /// Nesting depth of containers whose content is dropped entirely
    /// (footnote definitions).
    pub hidden: usize,
    inline: Vec<StylePrimitive>,
}

impl<'a> RenderContext<'a> {
    pub fn new(sheet: &'a StyleSheet, color_system: Option<ColorSystem>, width: usize) -> Self {
        Self {
            sheet,
            color_system,
            blocks: BlockStack::new(width, color_system, &sheet.document),
            table: None,
            lists: Vec::new(),
            link: None,
            image: None,
            hidden: 0,
            inline: Vec::new(),
        }
    }

    /// True while the walk is between a cell's start and end events.
    pub fn in_table_cell(&self) -> bool {
        self.table.as_ref().is_some_and(TableComposer::in_cell)
    }

    /// Rule governing text at the current position: the innermost inline
    /// span, else the table cell rule, else the block ambient.
    pub fn current_rule(&self) -> StylePrimitive {
        if let Some(rule) = self.inline.last() {
            return rule.clone();
        }
        if let Some(composer) = &self.table
            && composer.in_cell()
        {
            return composer.cell_rule().clone();
        }
        self.blocks.rule().clone()
    }

    /// Buffer receiving output: the open table cell if one is active,
    /// the innermost block otherwise.
    pub fn sink(&mut self) -> &mut String {
        if let Some(composer) = &mut self.table
            && composer.in_cell()
        {
            return composer.cell_buf();
        }
        self.blocks.buf()
    }

    pub fn emit_with(&mut self, rule: &StylePrimitive, text: &str) {
        let color_system = self.color_system;
        emit::styled_text(self.sink(), color_system, rule, text);
    }

    /// Emit document text, honoring capture modes. Newlines collapse
    /// to spaces inside table cells so each cell stays a single line.
    pub fn emit_text(&mut self, text: &str) {
        if let Some(image) = &mut self.image {
            image.alt.push_str(text);
            return;
        }
        if let Some(link) = &mut self.link {
            link.plain.push_str(text);
        }
        let rule = self.current_rule().cascade(&self.sheet.text);
        if self.in_table_cell() {
            let flat = text.replace('\n', " ");
            self.emit_with(&rule, &flat);
        } else {
            self.emit_with(&rule, text);
        }
    }

    /// Emit unstyled break whitespace, honoring capture modes.
    pub fn emit_break(&mut self, s: &str) {
        if let Some(image) = &mut self.image {
            image.alt.push_str(s);
            return;
        }
        if let Some(link) = &mut self.link {
            link.plain.push_str(s);
        }
        self.sink().push_str(s);
    }

    /// Open an inline span: the block prefix is written with the ambient
    /// rule, the prefix with the cascaded one, and the cascaded rule
    /// becomes current for the span's text.
    pub fn enter_inline(&mut self, rule: &StylePrimitive) {
        let ambient = self.current_rule();
        let cascaded = ambient.cascade(rule);
        if self.image.is_none() {
            let block_prefix = rule.block_prefix.clone();
            let prefix = rule.prefix.clone();
            self.emit_with(&ambient, &block_prefix);
            self.emit_with(&cascaded, &prefix);
        }
        self.inline.push(cascaded);
    }

    /// Close the innermost inline span, mirroring [`Self::enter_inline`].
    pub fn leave_inline(&mut self, rule: &StylePrimitive) {
        let cascaded = self
            .inline
            .pop()
            .unwrap_or_else(|| self.current_rule());
        if self.image.is_none() {
            let suffix = rule.suffix.clone();
            let block_suffix = rule.block_suffix.clone();
            self.emit_with(&cascaded, &suffix);
            let ambient = self.current_rule();
            self.emit_with(&ambient, &block_suffix);
        }
    }

    /// Consume the context, laying out the document.
    pub fn finish(self) -> String {
        self.blocks.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_ctx(sheet: &StyleSheet) -> RenderContext<'_> {
        RenderContext::new(sheet, None, 80)
    }

    #[test]
    fn test_text_lands_in_block_buffer() {
        let sheet = StyleSheet::ascii();
        let mut ctx = plain_ctx(&sheet);
        ctx.emit_text("hello");
        assert_eq!(ctx.blocks.buf().as_str(), "hello");
    }

    #[test]
    fn test_inline_span_emits_markers() {
        let sheet = StyleSheet::ascii();
        let mut ctx = plain_ctx(&sheet);
        let strong = sheet.strong.clone();
        ctx.enter_inline(&strong);
        ctx.emit_text("bold");
        ctx.leave_inline(&strong);
        assert_eq!(ctx.blocks.buf().as_str(), "**bold**");
    }

    #[test]
    fn test_inline_cascade_styles_text() {
        let sheet = StyleSheet::dark();
        let mut ctx = RenderContext::new(&sheet, Some(ColorSystem::TrueColor), 80);
        let strong = sheet.strong.clone();
        ctx.enter_inline(&strong);
        ctx.emit_text("x");
        ctx.leave_inline(&strong);
        // Bold attribute plus the document foreground cascade.
        let buf = ctx.blocks.buf().as_str();
        assert!(buf.contains("\u{1b}[1;"), "missing bold: {buf:?}");
        assert!(buf.contains('x'));
    }

    #[test]
    fn test_image_capture_swallows_text_and_markers() {
        let sheet = StyleSheet::ascii();
        let mut ctx = plain_ctx(&sheet);
        ctx.image = Some(ImageState {
            dest: "img.png".to_string(),
            alt: String::new(),
        });
        let emph = sheet.emph.clone();
        ctx.enter_inline(&emph);
        ctx.emit_text("alt text");
        ctx.leave_inline(&emph);
        assert_eq!(ctx.blocks.buf().as_str(), "");
        assert_eq!(ctx.image.unwrap().alt, "alt text");
    }

    #[test]
    fn test_link_accumulates_plain_text() {
        let sheet = StyleSheet::ascii();
        let mut ctx = plain_ctx(&sheet);
        ctx.link = Some(LinkState {
            dest: "https://example.com".to_string(),
            plain: String::new(),
        });
        ctx.emit_text("click");
        assert_eq!(ctx.link.unwrap().plain, "click");
        assert_eq!(ctx.blocks.buf().as_str(), "click");
    }

    #[test]
    fn test_leave_inline_without_enter_does_not_panic() {
        let sheet = StyleSheet::ascii();
        let mut ctx = plain_ctx(&sheet);
        let emph = sheet.emph.clone();
        ctx.leave_inline(&emph);
        assert_eq!(ctx.blocks.buf().as_str(), "*");
    }
}
