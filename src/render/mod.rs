//! Markdown rendering: parse with pulldown-cmark, walk the event
//! stream, and lay styled blocks out against the terminal width.
//!
//! [`Renderer`] drives one pass per document. Block containers nest on
//! a [`block::BlockStack`]; tables divert cell text into a composer that
//! is laid out when the table closes; inline spans cascade style rules
//! over the enclosing block's ambient rule.

mod block;
mod context;
mod inline;
mod table;

use std::fmt;
use std::io;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::color::ColorSystem;
use crate::styles::{StyleBlock, StylePreset, StyleSheet};
use crate::terminal;

use context::{ListState, RenderContext};

/// Errors surfaced while rendering a document.
#[derive(Debug)]
pub enum RenderError {
    /// The table event sequence was structurally invalid.
    MalformedTable(&'static str),
    /// Writing rendered output failed.
    Io(io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTable(msg) => write!(f, "malformed table: {msg}"),
            Self::Io(err) => write!(f, "write failed: {err}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedTable(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Options for a [`Renderer`].
///
/// Unset fields are resolved against the environment at render time:
/// width from the terminal, colors from `NO_COLOR`/`COLORTERM`/`TERM`,
/// and the sheet from the preset.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    width: Option<usize>,
    color_system: Option<ColorSystem>,
    no_color: bool,
    preset: StylePreset,
    sheet: Option<StyleSheet>,
}

impl RenderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Word-wrap width. Defaults to the terminal width (80 when that
    /// cannot be determined).
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Force a color system instead of detecting one.
    #[must_use]
    pub fn color_system(mut self, system: ColorSystem) -> Self {
        self.color_system = Some(system);
        self
    }

    /// Disable colors entirely; wins over detection and
    /// [`Self::color_system`].
    #[must_use]
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    #[must_use]
    pub fn preset(mut self, preset: StylePreset) -> Self {
        self.preset = preset;
        self
    }

    /// Render with an explicit sheet, ignoring the preset.
    #[must_use]
    pub fn sheet(mut self, sheet: StyleSheet) -> Self {
        self.sheet = Some(sheet);
        self
    }
}

/// Renders Markdown documents to styled text.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        log::debug!("renderer configured: {options:?}");
        Self { options }
    }

    /// Render a document to a string.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MalformedTable`] when the parsed table
    /// structure cannot be assembled.
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let width = self
            .options
            .width
            .unwrap_or_else(terminal::get_terminal_width);
        let color_system = if self.options.no_color {
            None
        } else {
            self.options
                .color_system
                .or_else(terminal::detect_color_system)
        };
        let sheet = match &self.options.sheet {
            Some(sheet) => sheet.clone(),
            None => self.options.preset.resolve(color_system.is_some()),
        };
        log::debug!(
            "rendering {} bytes at width {width}, colors: {color_system:?}",
            markdown.len()
        );

        let mut ctx = RenderContext::new(&sheet, color_system, width);
        walk(&mut ctx, markdown)?;
        let body = ctx.finish();

        let mut output =
            String::with_capacity(body.len() + sheet.document.style.block_prefix.len() + 1);
        output.push_str(&sheet.document.style.block_prefix);
        output.push_str(&body);
        output.push_str(&sheet.document.style.block_suffix);
        Ok(output)
    }

    /// Render a document directly to a writer.
    ///
    /// # Errors
    ///
    /// Returns any rendering error, or [`RenderError::Io`] when the
    /// write fails.
    pub fn render_to<W: io::Write>(
        &self,
        markdown: &str,
        writer: &mut W,
    ) -> Result<(), RenderError> {
        let rendered = self.render(markdown)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }
}

fn walk(ctx: &mut RenderContext<'_>, markdown: &str) -> Result<(), RenderError> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    for event in Parser::new_ext(markdown, options) {
        handle_event(ctx, event)?;
    }
    Ok(())
}

fn handle_event(ctx: &mut RenderContext<'_>, event: Event<'_>) -> Result<(), RenderError> {
    // Footnote definition bodies never reach the output; only the
    // inline references do.
    match &event {
        Event::Start(Tag::FootnoteDefinition(_)) => {
            ctx.hidden += 1;
            return Ok(());
        }
        Event::End(TagEnd::FootnoteDefinition) => {
            ctx.hidden = ctx.hidden.saturating_sub(1);
            return Ok(());
        }
        _ if ctx.hidden > 0 => return Ok(()),
        _ => {}
    }
    let sheet = ctx.sheet;
    match event {
        Event::Start(tag) => match tag {
            Tag::Paragraph => open_block(ctx, &sheet.paragraph, true),
            Tag::Heading { level, .. } => {
                let block = heading_block(sheet, level);
                open_block(ctx, &block, true);
            }
            Tag::BlockQuote(_) => open_block(ctx, &sheet.block_quote, true),
            Tag::CodeBlock(_) => open_block(ctx, &sheet.code_block.block, false),
            Tag::List(start) => {
                // A nested list begins on its own line under the item
                // text.
                let buf = ctx.blocks.buf();
                if !buf.is_empty() && !buf.ends_with('\n') {
                    buf.push('\n');
                }
                ctx.lists.push(ListState {
                    ordered: start.is_some(),
                    index: start.unwrap_or(1),
                });
            }
            Tag::Item => open_item(ctx),
            Tag::Table(alignments) => table::enter_table(ctx, &alignments),
            Tag::TableHead => table::enter_head(ctx),
            Tag::TableRow => table::enter_row(ctx),
            Tag::TableCell => table::enter_cell(ctx),
            Tag::Emphasis => ctx.enter_inline(&sheet.emph.clone()),
            Tag::Strong => ctx.enter_inline(&sheet.strong.clone()),
            Tag::Strikethrough => ctx.enter_inline(&sheet.strikethrough.clone()),
            Tag::Link { dest_url, .. } => inline::link_start(ctx, &dest_url),
            Tag::Image { dest_url, .. } => inline::image_start(ctx, &dest_url),
            _ => {}
        },
        Event::End(tag) => match tag {
            TagEnd::Paragraph => close_block(ctx, &sheet.paragraph),
            TagEnd::Heading(level) => {
                let block = heading_block(sheet, level);
                close_block(ctx, &block);
            }
            TagEnd::BlockQuote(_) => close_block(ctx, &sheet.block_quote),
            TagEnd::CodeBlock => close_block(ctx, &sheet.code_block.block),
            TagEnd::List(_) => {
                ctx.lists.pop();
                if ctx.lists.is_empty() {
                    ctx.blocks.ensure_blank_line();
                }
            }
            TagEnd::Item => ctx.blocks.finish_block(),
            TagEnd::Table => table::leave_table(ctx),
            TagEnd::TableHead => table::leave_head(ctx),
            TagEnd::TableRow => table::leave_row(ctx)?,
            TagEnd::TableCell => table::leave_cell(ctx),
            TagEnd::Emphasis => ctx.leave_inline(&sheet.emph.clone()),
            TagEnd::Strong => ctx.leave_inline(&sheet.strong.clone()),
            TagEnd::Strikethrough => ctx.leave_inline(&sheet.strikethrough.clone()),
            TagEnd::Link => inline::link_end(ctx),
            TagEnd::Image => inline::image_end(ctx),
            _ => {}
        },
        Event::Text(text) => ctx.emit_text(&text),
        Event::Code(code) => inline::code(ctx, &code),
        Event::SoftBreak => inline::soft_break(ctx),
        Event::HardBreak => inline::hard_break(ctx),
        Event::Rule => inline::horizontal_rule(ctx),
        Event::TaskListMarker(checked) => inline::task_marker(ctx, checked),
        Event::FootnoteReference(label) => ctx.emit_text(&format!("[^{label}]")),
        _ => {}
    }
    Ok(())
}

/// Open a block container: ambient-styled block prefix into the parent,
/// a new frame, then the cascaded prefix inside it.
fn open_block(ctx: &mut RenderContext<'_>, block: &StyleBlock, wrap: bool) {
    let style = block.style.clone();
    let ambient = ctx.blocks.rule().clone();
    ctx.emit_with(&ambient, &style.block_prefix);
    let cascaded = ambient.cascade(&style);
    ctx.blocks.push(cascaded.clone(), block, wrap);
    ctx.emit_with(&cascaded, &style.prefix);
}

/// Close a block container: cascaded suffix inside, flush the frame,
/// ambient block suffix after, and a blank line to separate what
/// follows.
fn close_block(ctx: &mut RenderContext<'_>, block: &StyleBlock) {
    let style = block.style.clone();
    let cascaded = ctx.blocks.rule().clone();
    ctx.emit_with(&cascaded, &style.suffix);
    ctx.blocks.finish_block();
    let ambient = ctx.blocks.rule().clone();
    ctx.emit_with(&ambient, &style.block_suffix);
    ctx.blocks.ensure_blank_line();
}

/// Heading style: the level rule layered over the base heading rule,
/// block affixes falling back to the base.
fn heading_block(sheet: &StyleSheet, level: HeadingLevel) -> StyleBlock {
    let level_block = sheet.heading_level(heading_index(level));
    StyleBlock {
        style: sheet.heading.style.cascade_block(&level_block.style),
        indent: level_block.indent.or(sheet.heading.indent),
        indent_token: level_block
            .indent_token
            .clone()
            .or_else(|| sheet.heading.indent_token.clone()),
        margin: level_block.margin.or(sheet.heading.margin),
    }
}

fn heading_index(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Open a list item: an indented frame and the bullet or number marker.
fn open_item(ctx: &mut RenderContext<'_>) {
    let sheet = ctx.sheet;
    let depth = ctx.lists.len();
    let block = StyleBlock::new()
        .indent(depth.saturating_sub(1))
        .indent_token(" ".repeat(sheet.list.level_indent));
    let ambient = ctx.blocks.rule().clone();
    let cascaded = ambient.cascade(&sheet.list.block.style);
    ctx.blocks.push(cascaded, &block, true);

    let marker = match ctx.lists.last_mut() {
        Some(state) if state.ordered => {
            let index = state.index;
            state.index += 1;
            Some((sheet.enumeration.clone(), format!("{index}{}", sheet.enumeration.block_prefix)))
        }
        Some(_) => Some((sheet.item.clone(), sheet.item.block_prefix.clone())),
        None => None,
    };
    if let Some((rule, marker)) = marker {
        let styled = ctx.blocks.rule().cascade(&rule);
        ctx.emit_with(&styled, &marker);
    }
}
