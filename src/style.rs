//! Style system for terminal text attributes.
//!
//! A [`Style`] is the resolved visual appearance of a run of text: optional
//! foreground/background colors plus attribute flags. Style rules
//! (`styles` module) resolve to `Style` values, which render text by
//! wrapping it in SGR escape sequences.

use std::fmt;

use bitflags::bitflags;

use crate::color::{Color, ColorSystem};

bitflags! {
    /// Text attribute flags.
    ///
    /// Each flag corresponds to an ANSI SGR (Select Graphic Rendition) code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u16 {
        /// Bold/bright text (SGR 1).
        const BOLD      = 1 << 0;
        /// Dim/faint text (SGR 2).
        const DIM       = 1 << 1;
        /// Italic text (SGR 3).
        const ITALIC    = 1 << 2;
        /// Single underline (SGR 4).
        const UNDERLINE = 1 << 3;
        /// Slow blinking text (SGR 5).
        const BLINK     = 1 << 4;
        /// Reverse video (SGR 7).
        const REVERSE   = 1 << 5;
        /// Concealed/hidden text (SGR 8).
        const CONCEAL   = 1 << 6;
        /// Strikethrough text (SGR 9).
        const STRIKE    = 1 << 7;
        /// Overlined text (SGR 53).
        const OVERLINE  = 1 << 8;
    }
}

impl Attributes {
    /// Map of attribute flags to their ANSI SGR codes.
    const SGR_CODES: [(Self, u8); 9] = [
        (Self::BOLD, 1),
        (Self::DIM, 2),
        (Self::ITALIC, 3),
        (Self::UNDERLINE, 4),
        (Self::BLINK, 5),
        (Self::REVERSE, 7),
        (Self::CONCEAL, 8),
        (Self::STRIKE, 9),
        (Self::OVERLINE, 53),
    ];

    /// Get the ANSI SGR codes for enabled attributes.
    #[must_use]
    pub fn to_sgr_codes(&self) -> Vec<u8> {
        Self::SGR_CODES
            .iter()
            .filter_map(|(attr, code)| self.contains(*attr).then_some(*code))
            .collect()
    }
}

/// Visual style for terminal text.
///
/// Styles combine with [`Style::combine`], where the right-hand style takes
/// precedence for conflicting properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub color: Option<Color>,
    /// Background color.
    pub bgcolor: Option<Color>,
    /// Enabled attributes.
    pub attributes: Attributes,
    /// Which attributes are explicitly set (vs inherited).
    pub set_attributes: Attributes,
    /// Whether this is a null/empty style.
    null: bool,
}

impl Style {
    /// Create an empty (null) style.
    #[must_use]
    pub fn null() -> Self {
        Self {
            null: true,
            ..Default::default()
        }
    }

    /// Create a new style builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this is a null/empty style.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.null
    }

    /// Set the foreground color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self.null = false;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn bgcolor(mut self, color: Color) -> Self {
        self.bgcolor = Some(color);
        self.null = false;
        self
    }

    fn with_attribute(mut self, attr: Attributes) -> Self {
        self.attributes.insert(attr);
        self.set_attributes.insert(attr);
        self.null = false;
        self
    }

    /// Enable bold text.
    #[must_use]
    pub fn bold(self) -> Self {
        self.with_attribute(Attributes::BOLD)
    }

    /// Enable dim/faint text.
    #[must_use]
    pub fn dim(self) -> Self {
        self.with_attribute(Attributes::DIM)
    }

    /// Enable italic text.
    #[must_use]
    pub fn italic(self) -> Self {
        self.with_attribute(Attributes::ITALIC)
    }

    /// Enable underlined text.
    #[must_use]
    pub fn underline(self) -> Self {
        self.with_attribute(Attributes::UNDERLINE)
    }

    /// Enable blinking text.
    #[must_use]
    pub fn blink(self) -> Self {
        self.with_attribute(Attributes::BLINK)
    }

    /// Enable reverse video.
    #[must_use]
    pub fn reverse(self) -> Self {
        self.with_attribute(Attributes::REVERSE)
    }

    /// Enable concealed/hidden text.
    #[must_use]
    pub fn conceal(self) -> Self {
        self.with_attribute(Attributes::CONCEAL)
    }

    /// Enable strikethrough text.
    #[must_use]
    pub fn strike(self) -> Self {
        self.with_attribute(Attributes::STRIKE)
    }

    /// Enable overlined text.
    #[must_use]
    pub fn overline(self) -> Self {
        self.with_attribute(Attributes::OVERLINE)
    }

    /// Combine this style with another, the other taking precedence.
    #[must_use]
    pub fn combine(&self, other: &Style) -> Style {
        if other.is_null() {
            return self.clone();
        }
        if self.is_null() {
            return other.clone();
        }

        Style {
            color: other.color.clone().or_else(|| self.color.clone()),
            bgcolor: other.bgcolor.clone().or_else(|| self.bgcolor.clone()),
            attributes: (self.attributes & !other.set_attributes)
                | (other.attributes & other.set_attributes),
            set_attributes: self.set_attributes | other.set_attributes,
            null: false,
        }
    }

    /// Generate the SGR parameter string for this style.
    #[must_use]
    pub fn make_ansi_codes(&self, color_system: ColorSystem) -> String {
        let mut codes: Vec<String> = Vec::new();

        for code in self.attributes.to_sgr_codes() {
            codes.push(code.to_string());
        }

        if let Some(color) = &self.color {
            codes.extend(color.downgrade(color_system).get_ansi_codes(true));
        }

        if let Some(bgcolor) = &self.bgcolor {
            codes.extend(bgcolor.downgrade(color_system).get_ansi_codes(false));
        }

        codes.join(";")
    }

    /// Render text with this style applied.
    ///
    /// A null or empty style passes the text through unchanged.
    #[must_use]
    pub fn render(&self, text: &str, color_system: ColorSystem) -> String {
        if self.is_null() {
            return text.to_string();
        }

        let codes = self.make_ansi_codes(color_system);
        if codes.is_empty() {
            return text.to_string();
        }

        let mut result = String::with_capacity(text.len() + codes.len() + 8);
        result.push_str("\x1b[");
        result.push_str(&codes);
        result.push('m');
        result.push_str(text);
        result.push_str("\x1b[0m");
        result
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "none");
        }
        const NAMES: [(Attributes, &str); 9] = [
            (Attributes::BOLD, "bold"),
            (Attributes::DIM, "dim"),
            (Attributes::ITALIC, "italic"),
            (Attributes::UNDERLINE, "underline"),
            (Attributes::BLINK, "blink"),
            (Attributes::REVERSE, "reverse"),
            (Attributes::CONCEAL, "conceal"),
            (Attributes::STRIKE, "strike"),
            (Attributes::OVERLINE, "overline"),
        ];
        let mut parts: Vec<String> = Vec::new();
        for (attr, name) in NAMES {
            if self.attributes.contains(attr) {
                parts.push(name.to_string());
            }
        }
        if let Some(color) = &self.color {
            parts.push(color.to_string());
        }
        if let Some(bgcolor) = &self.bgcolor {
            parts.push(format!("on {bgcolor}"));
        }
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_style_passthrough() {
        let style = Style::null();
        assert_eq!(style.render("text", ColorSystem::TrueColor), "text");
    }

    #[test]
    fn test_empty_style_passthrough() {
        let style = Style::new();
        assert_eq!(style.render("text", ColorSystem::TrueColor), "text");
    }

    #[test]
    fn test_bold_render() {
        let style = Style::new().bold();
        assert_eq!(
            style.render("hi", ColorSystem::TrueColor),
            "\x1b[1mhi\x1b[0m"
        );
    }

    #[test]
    fn test_color_render() {
        let style = Style::new().color(Color::from_ansi(196));
        assert_eq!(
            style.render("x", ColorSystem::EightBit),
            "\x1b[38;5;196mx\x1b[0m"
        );
    }

    #[test]
    fn test_render_downgrades_color() {
        let style = Style::new().color(Color::from_rgb(255, 0, 0));
        let out = style.render("x", ColorSystem::Standard);
        assert!(!out.contains("38;2;"), "truecolor leaked: {out:?}");
    }

    #[test]
    fn test_combine_right_precedence() {
        let base = Style::new().color(Color::from_ansi(1)).bold();
        let over = Style::new().color(Color::from_ansi(2));
        let combined = base.combine(&over);
        assert_eq!(combined.color, Some(Color::from_ansi(2)));
        assert!(combined.attributes.contains(Attributes::BOLD));
    }

    #[test]
    fn test_combine_with_null() {
        let style = Style::new().bold();
        assert_eq!(style.combine(&Style::null()), style);
        assert_eq!(Style::null().combine(&style), style);
    }

    #[test]
    fn test_sgr_code_order() {
        let style = Style::new().bold().italic().underline();
        assert_eq!(style.make_ansi_codes(ColorSystem::Standard), "1;3;4");
    }

    #[test]
    fn test_display() {
        let style = Style::new().bold().color(Color::from_ansi(1));
        let text = format!("{style}");
        assert!(text.contains("bold"));
    }
}
