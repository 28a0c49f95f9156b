//! Styled text emission.
//!
//! One funnel for turning a style rule plus text into output bytes. All
//! element handlers go through [`styled_text`] so color-system handling
//! and the empty-text short-circuit live in exactly one place.

use crate::color::ColorSystem;
use crate::styles::StylePrimitive;

/// Append `text` to `out`, decorated according to `rule`.
///
/// With no color system the text is passed through verbatim; markers and
/// prefixes still apply at the call sites, only SGR sequences are elided.
/// Empty text produces no output at all, not even escape pairs.
pub fn styled_text(
    out: &mut String,
    color_system: Option<ColorSystem>,
    rule: &StylePrimitive,
    text: &str,
) {
    if text.is_empty() {
        return;
    }
    match color_system {
        Some(system) => {
            let style = rule.to_style();
            out.push_str(&style.render(text, system));
        }
        None => out.push_str(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::StylePrimitive;

    fn styled(color_system: Option<ColorSystem>, rule: &StylePrimitive, text: &str) -> String {
        let mut out = String::new();
        styled_text(&mut out, color_system, rule, text);
        out
    }

    #[test]
    fn test_plain_without_color_system() {
        let rule = StylePrimitive::new().color("203").bold(true);
        assert_eq!(styled(None, &rule, "code"), "code");
    }

    #[test]
    fn test_styled_with_color_system() {
        let rule = StylePrimitive::new().color("203");
        let out = styled(Some(ColorSystem::EightBit), &rule, "code");
        assert_eq!(out, "\x1b[38;5;203mcode\x1b[0m");
    }

    #[test]
    fn test_empty_text_emits_nothing() {
        let rule = StylePrimitive::new().color("203").bold(true);
        assert_eq!(styled(Some(ColorSystem::TrueColor), &rule, ""), "");
    }

    #[test]
    fn test_null_rule_passthrough() {
        let rule = StylePrimitive::new();
        assert_eq!(styled(Some(ColorSystem::TrueColor), &rule, "x"), "x");
    }
}
