//! Handlers for inline events: code spans, breaks, rules, task markers,
//! links, and images. Plain text goes straight through
//! [`RenderContext::emit_text`].

use crate::render::context::{ImageState, LinkState, RenderContext};

const RULE_TOKEN: &str = "--------";

/// Inline code span.
pub(crate) fn code(ctx: &mut RenderContext<'_>, literal: &str) {
    let rule = ctx.sheet.code.style.clone();
    ctx.enter_inline(&rule);
    ctx.emit_text(literal);
    ctx.leave_inline(&rule);
}

pub(crate) fn soft_break(ctx: &mut RenderContext<'_>) {
    ctx.emit_break(" ");
}

/// Hard breaks flatten to a space inside table cells.
pub(crate) fn hard_break(ctx: &mut RenderContext<'_>) {
    if ctx.in_table_cell() {
        ctx.emit_break(" ");
    } else {
        ctx.emit_break("\n");
    }
}

/// Thematic break: a styled dash run on its own line.
pub(crate) fn horizontal_rule(ctx: &mut RenderContext<'_>) {
    ctx.blocks.ensure_blank_line();
    let rule = ctx.blocks.rule().cascade(&ctx.sheet.horizontal_rule);
    ctx.emit_with(&rule, RULE_TOKEN);
    ctx.blocks.buf().push('\n');
    ctx.blocks.ensure_blank_line();
}

/// Checkbox marker at the head of a task list item.
pub(crate) fn task_marker(ctx: &mut RenderContext<'_>, checked: bool) {
    let marker = if checked {
        ctx.sheet.task.ticked.clone()
    } else {
        ctx.sheet.task.unticked.clone()
    };
    let rule = ctx.current_rule();
    ctx.emit_with(&rule, &marker);
}

pub(crate) fn link_start(ctx: &mut RenderContext<'_>, dest: &str) {
    ctx.link = Some(LinkState {
        dest: dest.to_string(),
        plain: String::new(),
    });
    let rule = ctx.sheet.link_text.clone();
    ctx.enter_inline(&rule);
}

/// Close a link. The destination follows the text unless it repeats it,
/// is empty, or the link sits inside a table cell.
pub(crate) fn link_end(ctx: &mut RenderContext<'_>) {
    let rule = ctx.sheet.link_text.clone();
    ctx.leave_inline(&rule);
    let Some(state) = ctx.link.take() else {
        return;
    };
    if state.dest.is_empty() || state.dest == state.plain || ctx.in_table_cell() {
        return;
    }
    ctx.sink().push(' ');
    let url_rule = ctx.current_rule().cascade(&ctx.sheet.link);
    ctx.emit_with(&url_rule, &state.dest);
}

/// Open an image: inline content up to the closing event is captured as
/// alt text instead of being emitted.
pub(crate) fn image_start(ctx: &mut RenderContext<'_>, dest: &str) {
    ctx.image = Some(ImageState {
        dest: dest.to_string(),
        alt: String::new(),
    });
}

pub(crate) fn image_end(ctx: &mut RenderContext<'_>) {
    let Some(state) = ctx.image.take() else {
        return;
    };
    let ambient = ctx.current_rule();
    if !state.alt.is_empty() {
        let label_rule = ambient.cascade(&ctx.sheet.image_text);
        let label = format!("Image: {} \u{2192}", state.alt);
        ctx.emit_with(&label_rule, &label);
    }
    if !state.dest.is_empty() {
        if !state.alt.is_empty() {
            ctx.sink().push(' ');
        }
        let url_rule = ambient.cascade(&ctx.sheet.image);
        ctx.emit_with(&url_rule, &state.dest);
    }
}
