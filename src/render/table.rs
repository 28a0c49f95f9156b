//! Table assembly during the document walk.
//!
//! Between the table start and end events, cell text is diverted into a
//! [`TableComposer`] instead of the block stack. Rows commit on row-end
//! events; the finished grid is laid out and written back to the
//! enclosing block when the table closes.

use pulldown_cmark::Alignment;

use crate::border::Border;
use crate::render::RenderError;
use crate::render::context::RenderContext;
use crate::styles::StylePrimitive;
use crate::table::{Align, Table};

/// In-progress table: the layout under construction plus the row and
/// cell accumulators.
pub(crate) struct TableComposer {
    layout: Table,
    row: Vec<String>,
    cell: String,
    in_cell: bool,
    in_head: bool,
    cell_rule: StylePrimitive,
}

impl TableComposer {
    pub fn in_cell(&self) -> bool {
        self.in_cell
    }

    pub fn cell_buf(&mut self) -> &mut String {
        &mut self.cell
    }

    pub fn cell_rule(&self) -> &StylePrimitive {
        &self.cell_rule
    }

    #[cfg(test)]
    fn pending_cells(&self) -> usize {
        self.row.len()
    }
}

fn map_alignment(alignment: Alignment) -> Align {
    match alignment {
        Alignment::Center => Align::Center,
        Alignment::Right => Align::Right,
        Alignment::None | Alignment::Left => Align::Left,
    }
}

/// Open a table: write its prefixes and park a fresh composer in the
/// context. Cell text is styled with the table rule cascaded over the
/// ambient one.
pub(crate) fn enter_table(ctx: &mut RenderContext<'_>, alignments: &[Alignment]) {
    ctx.blocks.ensure_blank_line();

    let rules = ctx.sheet.table.clone();
    let ambient = ctx.blocks.rule().clone();
    let cell_rule = ambient.cascade(&rules.block.style);

    ctx.emit_with(&ambient, &rules.block.style.block_prefix);
    ctx.emit_with(&cell_rule, &rules.block.style.prefix);

    let mut layout = Table::new()
        .edges(false)
        .padding(1, 0)
        .alignments(alignments.iter().copied().map(map_alignment).collect());
    if let Some(system) = ctx.color_system {
        layout = layout.color_system(system);
    }

    ctx.table = Some(TableComposer {
        layout,
        row: Vec::new(),
        cell: String::new(),
        in_cell: false,
        in_head: false,
        cell_rule,
    });
}

pub(crate) fn enter_head(ctx: &mut RenderContext<'_>) {
    if let Some(composer) = &mut ctx.table {
        composer.in_head = true;
        composer.row.clear();
    }
}

/// Commit the accumulated cells as the header row. An empty header is
/// allowed; outside a table this is a no-op.
pub(crate) fn leave_head(ctx: &mut RenderContext<'_>) {
    if let Some(composer) = &mut ctx.table {
        composer.layout.set_headers(std::mem::take(&mut composer.row));
        composer.in_head = false;
    }
}

pub(crate) fn enter_row(ctx: &mut RenderContext<'_>) {
    if let Some(composer) = &mut ctx.table {
        composer.row.clear();
    }
}

/// Commit the accumulated cells as a body row. A body row with no cells
/// is malformed; outside a table this is a no-op.
pub(crate) fn leave_row(ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
    let Some(composer) = &mut ctx.table else {
        return Ok(());
    };
    if composer.in_head {
        return Ok(());
    }
    if composer.row.is_empty() {
        return Err(RenderError::MalformedTable(
            "row finished without any cells",
        ));
    }
    let row = std::mem::take(&mut composer.row);
    composer.layout.add_row(row);
    Ok(())
}

pub(crate) fn enter_cell(ctx: &mut RenderContext<'_>) {
    if let Some(composer) = &mut ctx.table {
        composer.in_cell = true;
        composer.cell.clear();
    }
}

pub(crate) fn leave_cell(ctx: &mut RenderContext<'_>) {
    if let Some(composer) = &mut ctx.table {
        composer.in_cell = false;
        composer.row.push(std::mem::take(&mut composer.cell));
    }
}

/// Derive the border and width cap, lay the finished grid out, and
/// write it into the enclosing block followed by the table suffixes.
/// The composer is released whether or not anything was rendered; a
/// stray end event is a no-op.
pub(crate) fn leave_table(ctx: &mut RenderContext<'_>) {
    let Some(composer) = ctx.table.take() else {
        return;
    };

    let rules = ctx.sheet.table.clone();
    // A custom border needs both separators; the center glyph falls
    // back to a plain cross. Otherwise the default box is used.
    let border = match (rules.row_separator, rules.column_separator) {
        (Some(row), Some(column)) => {
            Border::from_separators(row, column, rules.center_separator)
        }
        _ => Border::default(),
    };
    let layout = composer
        .layout
        .border(border)
        .max_width(ctx.blocks.available_width());

    let rendered = layout.render();
    log::trace!(
        "table laid out: {} columns, {} lines",
        layout.column_count(),
        rendered.lines().count()
    );

    if !rendered.is_empty() {
        let buf = ctx.blocks.buf();
        buf.push_str(&rendered);
        buf.push('\n');
    }

    ctx.emit_with(&composer.cell_rule, &rules.block.style.suffix);
    let ambient = ctx.blocks.rule().clone();
    ctx.emit_with(&ambient, &rules.block.style.block_suffix);
    ctx.blocks.ensure_blank_line();
}
