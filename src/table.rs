//! Table layout engine.
//!
//! Lays out pre-styled cell strings into a character grid: column widths
//! are measured from visible content, rows are padded to the column
//! count, and each of the four outer edges can be drawn or suppressed
//! independently. Cell strings may contain SGR sequences; measurement
//! and truncation go through [`crate::cells`] so escapes never count
//! toward width.

use crate::border::{Border, RowLevel};
use crate::cells::{truncate_with_ellipsis, visible_len};
use crate::color::ColorSystem;
use crate::style::Style;
use num_rational::Ratio;

/// Horizontal cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Per-cell style hook, called with the body row index (`None` for
/// header cells) and the column index.
pub type CellStyle = fn(row: Option<usize>, column: usize) -> Option<Style>;

/// A grid of styled cells with an optional header row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    alignments: Vec<Align>,
    border: Border,
    border_style: Option<Style>,
    cell_style: Option<CellStyle>,
    /// Color system for border styling; without one the glyphs stay
    /// plain.
    color_system: Option<ColorSystem>,
    /// Cell padding (horizontal, vertical).
    padding: (usize, usize),
    /// Pad the outer columns even when edges are hidden.
    pad_edge: bool,
    edge_top: bool,
    edge_bottom: bool,
    edge_left: bool,
    edge_right: bool,
    /// Total width cap; columns shrink proportionally to fit.
    max_width: Option<usize>,
}

impl Table {
    #[must_use]
    pub fn new() -> Self {
        Self {
            padding: (1, 0),
            pad_edge: true,
            edge_top: true,
            edge_bottom: true,
            edge_left: true,
            edge_right: true,
            ..Self::default()
        }
    }

    /// Set the header row. An empty header list means no header row and
    /// no header separator.
    #[must_use]
    pub fn headers(mut self, headers: Vec<String>) -> Self {
        self.headers = headers;
        self
    }

    /// Replace the header row in place.
    pub fn set_headers(&mut self, headers: Vec<String>) {
        self.headers = headers;
    }

    /// Append a body row. Rows shorter than the column count are padded
    /// with empty cells at render time.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn with_row(mut self, row: Vec<String>) -> Self {
        self.rows.push(row);
        self
    }

    /// Per-column alignment; missing entries default to left.
    #[must_use]
    pub fn alignments(mut self, alignments: Vec<Align>) -> Self {
        self.alignments = alignments;
        self
    }

    #[must_use]
    pub fn border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    /// Style applied to border glyphs and separator lines.
    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = Some(style);
        self
    }

    /// Style hook applied to aligned cell content at render time. Takes
    /// effect only when a color system is set.
    #[must_use]
    pub fn cell_style(mut self, f: CellStyle) -> Self {
        self.cell_style = Some(f);
        self
    }

    #[must_use]
    pub fn color_system(mut self, system: ColorSystem) -> Self {
        self.color_system = Some(system);
        self
    }

    #[must_use]
    pub fn padding(mut self, horizontal: usize, vertical: usize) -> Self {
        self.padding = (horizontal, vertical);
        self
    }

    #[must_use]
    pub fn pad_edge(mut self, pad: bool) -> Self {
        self.pad_edge = pad;
        self
    }

    /// Toggle all four outer edges at once.
    #[must_use]
    pub fn edges(mut self, show: bool) -> Self {
        self.edge_top = show;
        self.edge_bottom = show;
        self.edge_left = show;
        self.edge_right = show;
        self
    }

    #[must_use]
    pub fn edge_top(mut self, show: bool) -> Self {
        self.edge_top = show;
        self
    }

    #[must_use]
    pub fn edge_bottom(mut self, show: bool) -> Self {
        self.edge_bottom = show;
        self
    }

    #[must_use]
    pub fn edge_left(mut self, show: bool) -> Self {
        self.edge_left = show;
        self
    }

    #[must_use]
    pub fn edge_right(mut self, show: bool) -> Self {
        self.edge_right = show;
        self
    }

    #[must_use]
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Number of columns: the widest of the header row and any body row.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.headers.len())
    }

    fn alignment(&self, column: usize) -> Align {
        self.alignments.get(column).copied().unwrap_or_default()
    }

    /// Horizontal overhead around content: edge glyphs, dividers, and
    /// padding columns.
    fn overhead(&self, num_cols: usize) -> usize {
        let edges = usize::from(self.edge_left) + usize::from(self.edge_right);
        let dividers = num_cols.saturating_sub(1);
        let pad = self.padding.0;
        let inner_padding = dividers * pad * 2;
        let edge_padding = if self.pad_edge { pad * 2 } else { 0 };
        edges + dividers + inner_padding + edge_padding
    }

    /// Natural column widths, shrunk proportionally when a max width is
    /// set and the content does not fit.
    fn calculate_widths(&self) -> Vec<usize> {
        let num_cols = self.column_count();
        if num_cols == 0 {
            return Vec::new();
        }

        let mut widths = vec![1usize; num_cols];
        for (i, header) in self.headers.iter().enumerate() {
            widths[i] = widths[i].max(visible_len(header));
        }
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(visible_len(cell));
            }
        }

        if let Some(max_width) = self.max_width {
            let available = max_width.saturating_sub(self.overhead(num_cols));
            let total: usize = widths.iter().sum();
            if total > available {
                widths = Self::collapse_widths(&widths, available);
            }
        }

        widths
    }

    /// Shrink columns proportionally to their slack above the one-cell
    /// minimum. Rounded shares never remove more than the outstanding
    /// excess; a final pass drains whatever rounding left behind.
    fn collapse_widths(widths: &[usize], available: usize) -> Vec<usize> {
        let total: usize = widths.iter().sum();
        let excess = total - available;

        let shrinkable: Vec<usize> = widths.iter().map(|w| w.saturating_sub(1)).collect();
        let total_shrinkable: usize = shrinkable.iter().sum();
        if total_shrinkable == 0 || excess >= total_shrinkable {
            return vec![1; widths.len()];
        }

        let mut result = widths.to_vec();
        let mut removed = 0;

        for (i, &shrink) in shrinkable.iter().enumerate() {
            if shrink == 0 {
                continue;
            }
            let share = Ratio::new(shrink, total_shrinkable);
            let reduction = (share * excess)
                .round()
                .to_integer()
                .min(shrink)
                .min(excess - removed);
            result[i] -= reduction;
            removed += reduction;
        }

        // Rounded shares can fall short of the excess. The guard above
        // keeps the excess strictly below the total slack, so a single
        // pass over the remaining slack always drains the difference.
        if removed < excess {
            for w in &mut result {
                let take = (excess - removed).min(w.saturating_sub(1));
                *w -= take;
                removed += take;
                if removed == excess {
                    break;
                }
            }
        }

        result
    }

    fn styled_glyphs(&self, glyphs: &str, out: &mut String) {
        match (&self.border_style, self.color_system) {
            (Some(style), Some(system)) => out.push_str(&style.render(glyphs, system)),
            _ => out.push_str(glyphs),
        }
    }

    fn separator_line(&self, padded: &[usize], level: RowLevel) -> String {
        let line = self
            .border
            .build_row(padded, level, self.edge_left, self.edge_right);
        let mut out = String::new();
        self.styled_glyphs(&line, &mut out);
        out
    }

    fn content_line(&self, widths: &[usize], cells: &[String], row: Option<usize>) -> String {
        let pad = " ".repeat(self.padding.0);
        let last = widths.len() - 1;
        let mut line = String::new();

        if self.edge_left {
            self.styled_glyphs(&self.border.cell_left().to_string(), &mut line);
        }
        for (i, &width) in widths.iter().enumerate() {
            if self.pad_edge || i > 0 {
                line.push_str(&pad);
            }
            let content = cells.get(i).map_or("", String::as_str);
            let aligned = Self::align_cell(content, width, self.alignment(i));
            match (self.cell_style.and_then(|f| f(row, i)), self.color_system) {
                (Some(style), Some(system)) => line.push_str(&style.render(&aligned, system)),
                _ => line.push_str(&aligned),
            }
            if self.pad_edge || i < last {
                line.push_str(&pad);
            }
            if i < last {
                self.styled_glyphs(&self.border.cell_divider().to_string(), &mut line);
            }
        }
        if self.edge_right {
            self.styled_glyphs(&self.border.cell_right().to_string(), &mut line);
        }

        line
    }

    fn blank_line(&self, widths: &[usize], row: Option<usize>) -> String {
        let blanks: Vec<String> = vec![String::new(); widths.len()];
        self.content_line(widths, &blanks, row)
    }

    fn align_cell(content: &str, width: usize, align: Align) -> String {
        let visible = visible_len(content);
        if visible > width {
            return truncate_with_ellipsis(content, width);
        }

        let fill = width - visible;
        let mut out = String::new();
        match align {
            Align::Left => {
                out.push_str(content);
                out.push_str(&" ".repeat(fill));
            }
            Align::Right => {
                out.push_str(&" ".repeat(fill));
                out.push_str(content);
            }
            Align::Center => {
                let left = fill / 2;
                out.push_str(&" ".repeat(left));
                out.push_str(content);
                out.push_str(&" ".repeat(fill - left));
            }
        }
        out
    }

    /// Render to a string with `\n` separated lines and no trailing
    /// newline. An empty table renders as an empty string.
    #[must_use]
    pub fn render(&self) -> String {
        let widths = self.calculate_widths();
        if widths.is_empty() {
            return String::new();
        }

        let pad = self.padding.0;
        let last = widths.len() - 1;
        let padded: Vec<usize> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let left = if self.pad_edge || i > 0 { pad } else { 0 };
                let right = if self.pad_edge || i < last { pad } else { 0 };
                left + w + right
            })
            .collect();

        let mut lines = Vec::new();
        if self.edge_top {
            lines.push(self.separator_line(&padded, RowLevel::Top));
        }
        if !self.headers.is_empty() {
            for _ in 0..self.padding.1 {
                lines.push(self.blank_line(&widths, None));
            }
            lines.push(self.content_line(&widths, &self.headers, None));
            for _ in 0..self.padding.1 {
                lines.push(self.blank_line(&widths, None));
            }
            lines.push(self.separator_line(&padded, RowLevel::HeadRow));
        }
        for (r, row) in self.rows.iter().enumerate() {
            for _ in 0..self.padding.1 {
                lines.push(self.blank_line(&widths, Some(r)));
            }
            lines.push(self.content_line(&widths, row, Some(r)));
            for _ in 0..self.padding.1 {
                lines.push(self.blank_line(&widths, Some(r)));
            }
        }
        if self.edge_bottom {
            lines.push(self.separator_line(&padded, RowLevel::Bottom));
        }

        lines.join("\n")
    }
}
