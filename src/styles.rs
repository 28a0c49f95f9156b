//! Style rules for document elements.
//!
//! A [`StyleSheet`] holds one rule per element kind. Rules come in two
//! shapes: [`StylePrimitive`] for inline decoration (colors, attributes,
//! prefix/suffix text) and [`StyleBlock`] for block elements, which add
//! indentation and margins. Primitives cascade: a child rule layered over
//! an ambient rule inherits colors and attributes it does not set itself.
//!
//! Built-in sheets: [`StyleSheet::dark`], [`StyleSheet::light`],
//! [`StyleSheet::ascii`], and [`StyleSheet::no_tty`], selectable through
//! [`StylePreset`].

use crate::color::Color;
use crate::style::Style;

/// Default margin applied around the document.
pub const DEFAULT_MARGIN: usize = 2;

/// Default extra indent per list nesting level.
const DEFAULT_LIST_LEVEL_INDENT: usize = 2;

/// Inline style rule for a document element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePrimitive {
    /// Text emitted before the element's block.
    pub block_prefix: String,
    /// Text emitted after the element's block.
    pub block_suffix: String,
    /// Text emitted before the element's content.
    pub prefix: String,
    /// Text emitted after the element's content.
    pub suffix: String,
    /// Foreground color (ANSI number, hex, or name).
    pub color: Option<String>,
    /// Background color.
    pub background_color: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub crossed_out: Option<bool>,
    pub faint: Option<bool>,
}

impl StylePrimitive {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn prefix(mut self, p: impl Into<String>) -> Self {
        self.prefix = p.into();
        self
    }

    #[must_use]
    pub fn suffix(mut self, s: impl Into<String>) -> Self {
        self.suffix = s.into();
        self
    }

    #[must_use]
    pub fn block_prefix(mut self, p: impl Into<String>) -> Self {
        self.block_prefix = p.into();
        self
    }

    #[must_use]
    pub fn block_suffix(mut self, s: impl Into<String>) -> Self {
        self.block_suffix = s.into();
        self
    }

    #[must_use]
    pub fn color(mut self, c: impl Into<String>) -> Self {
        self.color = Some(c.into());
        self
    }

    #[must_use]
    pub fn background_color(mut self, c: impl Into<String>) -> Self {
        self.background_color = Some(c.into());
        self
    }

    #[must_use]
    pub fn bold(mut self, b: bool) -> Self {
        self.bold = Some(b);
        self
    }

    #[must_use]
    pub fn italic(mut self, i: bool) -> Self {
        self.italic = Some(i);
        self
    }

    #[must_use]
    pub fn underline(mut self, u: bool) -> Self {
        self.underline = Some(u);
        self
    }

    #[must_use]
    pub fn crossed_out(mut self, c: bool) -> Self {
        self.crossed_out = Some(c);
        self
    }

    #[must_use]
    pub fn faint(mut self, f: bool) -> Self {
        self.faint = Some(f);
        self
    }

    /// Layer `child` over this rule.
    ///
    /// The child's colors and attributes win where set; unset fields
    /// inherit from this rule. Prefix/suffix text is the child's own and
    /// never inherited.
    #[must_use]
    pub fn cascade(&self, child: &Self) -> Self {
        Self {
            block_prefix: child.block_prefix.clone(),
            block_suffix: child.block_suffix.clone(),
            prefix: child.prefix.clone(),
            suffix: child.suffix.clone(),
            color: child.color.clone().or_else(|| self.color.clone()),
            background_color: child
                .background_color
                .clone()
                .or_else(|| self.background_color.clone()),
            bold: child.bold.or(self.bold),
            italic: child.italic.or(self.italic),
            underline: child.underline.or(self.underline),
            crossed_out: child.crossed_out.or(self.crossed_out),
            faint: child.faint.or(self.faint),
        }
    }

    /// Layer `child` over this rule, block-style: affix text also falls
    /// back to this rule where the child leaves it empty. Used to merge
    /// the base heading rule with a per-level rule.
    #[must_use]
    pub fn cascade_block(&self, child: &Self) -> Self {
        let pick = |own: &str, parent: &str| {
            if own.is_empty() { parent } else { own }.to_string()
        };
        Self {
            block_prefix: pick(&child.block_prefix, &self.block_prefix),
            block_suffix: pick(&child.block_suffix, &self.block_suffix),
            prefix: pick(&child.prefix, &self.prefix),
            suffix: pick(&child.suffix, &self.suffix),
            ..self.cascade(child)
        }
    }

    /// Resolve this rule into a concrete [`Style`].
    ///
    /// Color strings that fail to parse are skipped rather than surfaced;
    /// a bad color in a custom sheet degrades to unstyled text.
    #[must_use]
    pub fn to_style(&self) -> Style {
        let mut style = Style::new();

        if let Some(color) = self.color.as_deref()
            && let Ok(c) = Color::parse(color)
        {
            style = style.color(c);
        }
        if let Some(bg) = self.background_color.as_deref()
            && let Ok(c) = Color::parse(bg)
        {
            style = style.bgcolor(c);
        }
        if self.bold == Some(true) {
            style = style.bold();
        }
        if self.italic == Some(true) {
            style = style.italic();
        }
        if self.underline == Some(true) {
            style = style.underline();
        }
        if self.crossed_out == Some(true) {
            style = style.strike();
        }
        if self.faint == Some(true) {
            style = style.dim();
        }

        style
    }
}

/// Block-level style rule: a primitive plus layout settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleBlock {
    pub style: StylePrimitive,
    /// Indentation depth in units of the indent token.
    pub indent: Option<usize>,
    /// Token prepended per indent unit (defaults to spaces).
    pub indent_token: Option<String>,
    /// Blank margin columns to the left of the block.
    pub margin: Option<usize>,
}

impl StyleBlock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn style(mut self, s: StylePrimitive) -> Self {
        self.style = s;
        self
    }

    #[must_use]
    pub fn indent(mut self, i: usize) -> Self {
        self.indent = Some(i);
        self
    }

    #[must_use]
    pub fn indent_token(mut self, t: impl Into<String>) -> Self {
        self.indent_token = Some(t.into());
        self
    }

    #[must_use]
    pub fn margin(mut self, m: usize) -> Self {
        self.margin = Some(m);
        self
    }
}

/// List style rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleList {
    pub block: StyleBlock,
    /// Additional indent per nesting level.
    pub level_indent: usize,
}

impl Default for StyleList {
    fn default() -> Self {
        Self {
            block: StyleBlock::default(),
            level_indent: DEFAULT_LIST_LEVEL_INDENT,
        }
    }
}

impl StyleList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn block(mut self, b: StyleBlock) -> Self {
        self.block = b;
        self
    }

    #[must_use]
    pub fn level_indent(mut self, i: usize) -> Self {
        self.level_indent = i;
        self
    }
}

/// Code block style rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleCodeBlock {
    pub block: StyleBlock,
}

impl StyleCodeBlock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn block(mut self, b: StyleBlock) -> Self {
        self.block = b;
        self
    }
}

/// Table style rule.
///
/// When both `row_separator` and `column_separator` are configured the
/// table is drawn with a custom border built from them; otherwise the
/// default box-drawing border is used. Outer edges are never drawn either
/// way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleTable {
    pub block: StyleBlock,
    /// Glyph for interior intersections.
    pub center_separator: Option<char>,
    /// Glyph separating columns.
    pub column_separator: Option<char>,
    /// Glyph separating the header from rows.
    pub row_separator: Option<char>,
}

impl StyleTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn separators(mut self, center: char, column: char, row: char) -> Self {
        self.center_separator = Some(center);
        self.column_separator = Some(column);
        self.row_separator = Some(row);
        self
    }
}

/// Task-list item markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTask {
    pub ticked: String,
    pub unticked: String,
}

impl Default for StyleTask {
    fn default() -> Self {
        Self {
            ticked: "[x] ".to_string(),
            unticked: "[ ] ".to_string(),
        }
    }
}

impl StyleTask {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ticked(mut self, t: impl Into<String>) -> Self {
        self.ticked = t.into();
        self
    }

    #[must_use]
    pub fn unticked(mut self, u: impl Into<String>) -> Self {
        self.unticked = u.into();
        self
    }
}

/// Complete style configuration for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    pub document: StyleBlock,
    pub block_quote: StyleBlock,
    pub paragraph: StyleBlock,
    pub list: StyleList,

    pub heading: StyleBlock,
    pub h1: StyleBlock,
    pub h2: StyleBlock,
    pub h3: StyleBlock,
    pub h4: StyleBlock,
    pub h5: StyleBlock,
    pub h6: StyleBlock,

    pub text: StylePrimitive,
    pub strikethrough: StylePrimitive,
    pub emph: StylePrimitive,
    pub strong: StylePrimitive,
    pub horizontal_rule: StylePrimitive,

    pub item: StylePrimitive,
    pub enumeration: StylePrimitive,
    pub task: StyleTask,

    pub link: StylePrimitive,
    pub link_text: StylePrimitive,
    pub image: StylePrimitive,
    pub image_text: StylePrimitive,

    pub code: StyleBlock,
    pub code_block: StyleCodeBlock,

    pub table: StyleTable,
}

impl StyleSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule for a heading level (1-6). Levels out of range fall back to
    /// the base heading rule.
    #[must_use]
    pub fn heading_level(&self, level: u8) -> &StyleBlock {
        match level {
            1 => &self.h1,
            2 => &self.h2,
            3 => &self.h3,
            4 => &self.h4,
            5 => &self.h5,
            6 => &self.h6,
            _ => &self.heading,
        }
    }

    /// Plain ASCII sheet: no colors, markdown-ish markers, `|`/`-` table
    /// separators.
    #[must_use]
    pub fn ascii() -> Self {
        Self {
            document: StyleBlock::new()
                .style(StylePrimitive::new().block_prefix("\n").block_suffix("\n"))
                .margin(DEFAULT_MARGIN),
            block_quote: StyleBlock::new().indent(1).indent_token("| "),
            heading: StyleBlock::new().style(StylePrimitive::new().block_suffix("\n")),
            h1: StyleBlock::new().style(StylePrimitive::new().prefix("# ")),
            h2: StyleBlock::new().style(StylePrimitive::new().prefix("## ")),
            h3: StyleBlock::new().style(StylePrimitive::new().prefix("### ")),
            h4: StyleBlock::new().style(StylePrimitive::new().prefix("#### ")),
            h5: StyleBlock::new().style(StylePrimitive::new().prefix("##### ")),
            h6: StyleBlock::new().style(StylePrimitive::new().prefix("###### ")),
            strikethrough: StylePrimitive::new().block_prefix("~~").block_suffix("~~"),
            emph: StylePrimitive::new().block_prefix("*").block_suffix("*"),
            strong: StylePrimitive::new().block_prefix("**").block_suffix("**"),
            item: StylePrimitive::new().block_prefix("* "),
            enumeration: StylePrimitive::new().block_prefix(". "),
            task: StyleTask::new(),
            code: StyleBlock::new().style(StylePrimitive::new().prefix("`").suffix("`")),
            code_block: StyleCodeBlock::new().block(StyleBlock::new().margin(DEFAULT_MARGIN)),
            table: StyleTable::new().separators('|', '|', '-'),
            ..Default::default()
        }
    }

    /// Sheet for non-terminal output. Same markers as [`StyleSheet::ascii`].
    #[must_use]
    pub fn no_tty() -> Self {
        Self::ascii()
    }

    /// Dark-background sheet (the default).
    #[must_use]
    pub fn dark() -> Self {
        Self {
            document: StyleBlock::new()
                .style(
                    StylePrimitive::new()
                        .block_prefix("\n")
                        .block_suffix("\n")
                        .color("252"),
                )
                .margin(DEFAULT_MARGIN),
            block_quote: StyleBlock::new().indent(1).indent_token("│ "),
            heading: StyleBlock::new().style(
                StylePrimitive::new()
                    .block_suffix("\n")
                    .color("39")
                    .bold(true),
            ),
            h1: StyleBlock::new().style(
                StylePrimitive::new()
                    .prefix(" ")
                    .suffix(" ")
                    .color("228")
                    .background_color("63")
                    .bold(true),
            ),
            h2: StyleBlock::new().style(StylePrimitive::new().prefix("## ")),
            h3: StyleBlock::new().style(StylePrimitive::new().prefix("### ")),
            h4: StyleBlock::new().style(StylePrimitive::new().prefix("#### ")),
            h5: StyleBlock::new().style(StylePrimitive::new().prefix("##### ")),
            h6: StyleBlock::new().style(
                StylePrimitive::new()
                    .prefix("###### ")
                    .color("35")
                    .bold(false),
            ),
            strikethrough: StylePrimitive::new().crossed_out(true),
            emph: StylePrimitive::new().italic(true),
            strong: StylePrimitive::new().bold(true),
            horizontal_rule: StylePrimitive::new().color("240"),
            item: StylePrimitive::new().block_prefix("• "),
            enumeration: StylePrimitive::new().block_prefix(". "),
            task: StyleTask::new().ticked("[✓] "),
            link: StylePrimitive::new().color("30").underline(true),
            link_text: StylePrimitive::new().color("35").bold(true),
            image: StylePrimitive::new().color("212").underline(true),
            image_text: StylePrimitive::new().color("243"),
            code: StyleBlock::new().style(
                StylePrimitive::new()
                    .prefix(" ")
                    .suffix(" ")
                    .color("203")
                    .background_color("236"),
            ),
            code_block: StyleCodeBlock::new().block(
                StyleBlock::new()
                    .style(StylePrimitive::new().color("244"))
                    .margin(DEFAULT_MARGIN),
            ),
            ..Default::default()
        }
    }

    /// Light-background sheet.
    #[must_use]
    pub fn light() -> Self {
        Self {
            document: StyleBlock::new()
                .style(
                    StylePrimitive::new()
                        .block_prefix("\n")
                        .block_suffix("\n")
                        .color("234"),
                )
                .margin(DEFAULT_MARGIN),
            block_quote: StyleBlock::new().indent(1).indent_token("│ "),
            heading: StyleBlock::new().style(
                StylePrimitive::new()
                    .block_suffix("\n")
                    .color("27")
                    .bold(true),
            ),
            h1: StyleBlock::new().style(
                StylePrimitive::new()
                    .prefix(" ")
                    .suffix(" ")
                    .color("228")
                    .background_color("63")
                    .bold(true),
            ),
            h2: StyleBlock::new().style(StylePrimitive::new().prefix("## ")),
            h3: StyleBlock::new().style(StylePrimitive::new().prefix("### ")),
            h4: StyleBlock::new().style(StylePrimitive::new().prefix("#### ")),
            h5: StyleBlock::new().style(StylePrimitive::new().prefix("##### ")),
            h6: StyleBlock::new().style(StylePrimitive::new().prefix("###### ").bold(false)),
            strikethrough: StylePrimitive::new().crossed_out(true),
            emph: StylePrimitive::new().italic(true),
            strong: StylePrimitive::new().bold(true),
            horizontal_rule: StylePrimitive::new().color("249"),
            item: StylePrimitive::new().block_prefix("• "),
            enumeration: StylePrimitive::new().block_prefix(". "),
            task: StyleTask::new().ticked("[✓] "),
            link: StylePrimitive::new().color("36").underline(true),
            link_text: StylePrimitive::new().color("29").bold(true),
            image: StylePrimitive::new().color("205").underline(true),
            image_text: StylePrimitive::new().color("243"),
            code: StyleBlock::new().style(
                StylePrimitive::new()
                    .prefix(" ")
                    .suffix(" ")
                    .color("203")
                    .background_color("254"),
            ),
            code_block: StyleCodeBlock::new().block(
                StyleBlock::new()
                    .style(StylePrimitive::new().color("242"))
                    .margin(DEFAULT_MARGIN),
            ),
            ..Default::default()
        }
    }
}

/// Built-in sheet selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StylePreset {
    Ascii,
    #[default]
    Dark,
    Light,
    NoTty,
    /// Pick based on terminal capability at render time.
    Auto,
}

impl StylePreset {
    /// Resolve to a concrete sheet.
    ///
    /// `Auto` maps to [`StyleSheet::no_tty`] when no color is available and
    /// [`StyleSheet::dark`] otherwise (background luminance is not portably
    /// detectable).
    #[must_use]
    pub fn resolve(self, has_color: bool) -> StyleSheet {
        match self {
            Self::Ascii => StyleSheet::ascii(),
            Self::Dark => StyleSheet::dark(),
            Self::Light => StyleSheet::light(),
            Self::NoTty => StyleSheet::no_tty(),
            Self::Auto => {
                if has_color {
                    StyleSheet::dark()
                } else {
                    StyleSheet::no_tty()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorSystem;

    #[test]
    fn test_cascade_inherits_unset_fields() {
        let ambient = StylePrimitive::new().color("252").bold(true);
        let child = StylePrimitive::new().italic(true);
        let merged = ambient.cascade(&child);
        assert_eq!(merged.color.as_deref(), Some("252"));
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.italic, Some(true));
    }

    #[test]
    fn test_cascade_child_wins() {
        let ambient = StylePrimitive::new().color("252");
        let child = StylePrimitive::new().color("39").bold(false);
        let merged = ambient.cascade(&child);
        assert_eq!(merged.color.as_deref(), Some("39"));
        assert_eq!(merged.bold, Some(false));
    }

    #[test]
    fn test_cascade_does_not_inherit_prefixes() {
        let ambient = StylePrimitive::new().prefix("## ").block_prefix("\n");
        let child = StylePrimitive::new().color("39");
        let merged = ambient.cascade(&child);
        assert!(merged.prefix.is_empty());
        assert!(merged.block_prefix.is_empty());
    }

    #[test]
    fn test_cascade_block_merges_affixes() {
        let heading = StylePrimitive::new().block_suffix("\n").color("39").bold(true);
        let h1 = StylePrimitive::new().prefix(" ").suffix(" ").color("228");
        let merged = heading.cascade_block(&h1);
        assert_eq!(merged.block_suffix, "\n");
        assert_eq!(merged.prefix, " ");
        assert_eq!(merged.color.as_deref(), Some("228"));
        assert_eq!(merged.bold, Some(true));
    }

    #[test]
    fn test_to_style_resolves_colors() {
        let rule = StylePrimitive::new().color("196").bold(true);
        let style = rule.to_style();
        let out = style.render("x", ColorSystem::EightBit);
        assert!(out.contains("38;5;196"));
        assert!(out.contains("1;"));
    }

    #[test]
    fn test_to_style_skips_bad_colors() {
        let rule = StylePrimitive::new().color("definitely_not_a_color");
        let style = rule.to_style();
        assert_eq!(style.render("x", ColorSystem::TrueColor), "x");
    }

    #[test]
    fn test_bold_false_does_not_set_attribute() {
        let rule = StylePrimitive::new().bold(false);
        let style = rule.to_style();
        assert_eq!(style.render("x", ColorSystem::TrueColor), "x");
    }

    #[test]
    fn test_dark_sheet_values() {
        let sheet = StyleSheet::dark();
        assert_eq!(sheet.document.style.color.as_deref(), Some("252"));
        assert_eq!(sheet.heading.style.color.as_deref(), Some("39"));
        assert_eq!(sheet.item.block_prefix, "• ");
        assert!(sheet.table.row_separator.is_none());
    }

    #[test]
    fn test_ascii_sheet_has_table_separators() {
        let sheet = StyleSheet::ascii();
        assert_eq!(sheet.table.row_separator, Some('-'));
        assert_eq!(sheet.table.column_separator, Some('|'));
        assert_eq!(sheet.table.center_separator, Some('|'));
    }

    #[test]
    fn test_heading_level_lookup() {
        let sheet = StyleSheet::dark();
        assert_eq!(sheet.heading_level(1), &sheet.h1);
        assert_eq!(sheet.heading_level(6), &sheet.h6);
        assert_eq!(sheet.heading_level(9), &sheet.heading);
    }

    #[test]
    fn test_preset_auto_resolution() {
        assert_eq!(StylePreset::Auto.resolve(true), StyleSheet::dark());
        assert_eq!(StylePreset::Auto.resolve(false), StyleSheet::no_tty());
        assert_eq!(StylePreset::Light.resolve(false), StyleSheet::light());
    }
}
