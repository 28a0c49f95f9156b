//! Border glyph sets for table rendering.
//!
//! A [`Border`] is four glyph rows of four characters each:
//! `[left, middle, cross, right]`. Content rows only use the vertical
//! glyphs; separator rows use all four. A space means "no glyph" for
//! edge positions.

/// Horizontal line kind within a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLevel {
    /// Line above the first row.
    Top,
    /// Separator between header and body.
    HeadRow,
    /// Line below the last row.
    Bottom,
}

/// Box drawing character set for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    /// Top line: ┌─┬┐
    pub top: [char; 4],
    /// Content row verticals: │ ││
    pub cell: [char; 4],
    /// Header separator: ├─┼┤
    pub head_row: [char; 4],
    /// Bottom line: └─┴┘
    pub bottom: [char; 4],
}

/// Unicode single-line border.
pub const NORMAL: Border = Border {
    top: ['\u{250C}', '\u{2500}', '\u{252C}', '\u{2510}'],
    cell: ['\u{2502}', ' ', '\u{2502}', '\u{2502}'],
    head_row: ['\u{251C}', '\u{2500}', '\u{253C}', '\u{2524}'],
    bottom: ['\u{2514}', '\u{2500}', '\u{2534}', '\u{2518}'],
};

/// ASCII-safe border.
pub const ASCII: Border = Border {
    top: ['+', '-', '+', '+'],
    cell: ['|', ' ', '|', '|'],
    head_row: ['+', '-', '+', '+'],
    bottom: ['+', '-', '+', '+'],
};

impl Default for Border {
    fn default() -> Self {
        NORMAL
    }
}

impl Border {
    /// Build a border from separator glyphs.
    ///
    /// `row` draws horizontal lines, `column` draws verticals, and
    /// `center` fills every intersection and corner. A missing center
    /// falls back to the single-line cross.
    #[must_use]
    pub fn from_separators(row: char, column: char, center: Option<char>) -> Self {
        let center = center.unwrap_or('\u{253C}');
        Self {
            top: [center, row, center, center],
            cell: [column, ' ', column, column],
            head_row: [center, row, center, center],
            bottom: [center, row, center, center],
        }
    }

    #[must_use]
    pub fn row_chars(&self, level: RowLevel) -> &[char; 4] {
        match level {
            RowLevel::Top => &self.top,
            RowLevel::HeadRow => &self.head_row,
            RowLevel::Bottom => &self.bottom,
        }
    }

    /// Build a horizontal line for the given column widths.
    ///
    /// `left` and `right` control the outer edge glyphs independently;
    /// interior crosses are always drawn.
    #[must_use]
    pub fn build_row(&self, widths: &[usize], level: RowLevel, left: bool, right: bool) -> String {
        let chars = self.row_chars(level);
        let mut result = String::new();

        if left && chars[0] != ' ' {
            result.push(chars[0]);
        }
        for (i, &width) in widths.iter().enumerate() {
            for _ in 0..width {
                result.push(chars[1]);
            }
            if i < widths.len() - 1 {
                result.push(chars[2]);
            } else if right && chars[3] != ' ' {
                result.push(chars[3]);
            }
        }

        result
    }

    /// Left edge glyph for content rows.
    #[must_use]
    pub fn cell_left(&self) -> char {
        self.cell[0]
    }

    /// Divider glyph between content cells.
    #[must_use]
    pub fn cell_divider(&self) -> char {
        self.cell[2]
    }

    /// Right edge glyph for content rows.
    #[must_use]
    pub fn cell_right(&self) -> char {
        self.cell[3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_glyphs() {
        assert_eq!(NORMAL.cell_divider(), '\u{2502}');
        assert_eq!(NORMAL.head_row[2], '\u{253C}');
    }

    #[test]
    fn test_build_head_row_without_edges() {
        let line = NORMAL.build_row(&[6, 5], RowLevel::HeadRow, false, false);
        assert_eq!(line, "──────┼─────");
    }

    #[test]
    fn test_build_row_with_edges() {
        let line = ASCII.build_row(&[3, 3], RowLevel::Top, true, true);
        assert_eq!(line, "+---+---+");
    }

    #[test]
    fn test_build_row_left_edge_only() {
        let line = ASCII.build_row(&[2], RowLevel::Bottom, true, false);
        assert_eq!(line, "+--");
    }

    #[test]
    fn test_from_separators() {
        let border = Border::from_separators('-', '|', Some('|'));
        assert_eq!(border.cell_divider(), '|');
        let line = border.build_row(&[3, 3], RowLevel::HeadRow, false, false);
        assert_eq!(line, "---|---");
    }

    #[test]
    fn test_from_separators_default_center() {
        let border = Border::from_separators('-', '|', None);
        let line = border.build_row(&[2, 2], RowLevel::HeadRow, false, false);
        assert_eq!(line, "--\u{253C}--");
    }

    #[test]
    fn test_space_edges_are_skipped() {
        let border = Border {
            top: [' ', '-', '+', ' '],
            ..ASCII
        };
        let line = border.build_row(&[2, 2], RowLevel::Top, true, true);
        assert_eq!(line, "--+--");
    }

    #[test]
    fn test_empty_widths() {
        let line = ASCII.build_row(&[], RowLevel::Top, true, true);
        assert_eq!(line, "+");
    }
}
