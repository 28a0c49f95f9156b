//! Unicode cell width calculations and ANSI-aware text measurement.
//!
//! Widths are measured in terminal cells: most characters occupy one cell,
//! CJK and some emoji occupy two, control characters none. SGR escape
//! sequences measure as zero cells, so styled strings align exactly like
//! their plain equivalents.

use std::borrow::Cow;
use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

use lru::LruCache;
use regex::Regex;
use unicode_width::UnicodeWidthChar;

/// Minimum string length to cache (shorter strings have minimal overhead).
const CACHE_MIN_LEN: usize = 8;

/// LRU cache for `cell_len` calculations.
static CELL_LEN_CACHE: LazyLock<Mutex<LruCache<String, usize>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

/// Matches CSI escape sequences, which cover the SGR styling this crate
/// emits.
static ANSI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;:?]*[ -/]*[@-~]").expect("valid pattern"));

/// Get the cell width of a single character.
///
/// Most characters are 1 cell wide, but CJK characters and some emoji
/// are 2 cells wide. Control characters have 0 width.
#[must_use]
pub fn get_character_cell_size(c: char) -> usize {
    c.width().unwrap_or(0)
}

#[inline]
fn compute_cell_width(text: &str) -> usize {
    text.chars().map(get_character_cell_size).sum()
}

/// Get the total cell width of a string (cached for longer strings).
///
/// Escape sequences are *not* skipped here; use [`visible_len`] for styled
/// input. Results for strings of 8+ bytes are kept in an LRU cache.
#[must_use]
pub fn cell_len(text: &str) -> usize {
    if text.len() < CACHE_MIN_LEN {
        return compute_cell_width(text);
    }

    if let Ok(mut cache) = CELL_LEN_CACHE.lock()
        && let Some(&cached) = cache.get(text)
    {
        return cached;
    }

    let width = compute_cell_width(text);

    if let Ok(mut cache) = CELL_LEN_CACHE.lock() {
        cache.put(text.to_string(), width);
    }

    width
}

/// Remove CSI escape sequences from a string.
///
/// Returns the input borrowed when it contains no escapes.
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }
    ANSI_PATTERN.replace_all(text, "")
}

/// Cell width of the visible portion of a possibly-styled string.
#[must_use]
pub fn visible_len(text: &str) -> usize {
    cell_len(strip_ansi(text).as_ref())
}

/// Byte ranges of the escape sequences in `text`, in order.
fn escape_ranges(text: &str) -> Vec<(usize, usize)> {
    if !text.contains('\x1b') {
        return Vec::new();
    }
    ANSI_PATTERN
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect()
}

/// Split a string at a cell position.
///
/// Returns (left, right) where left has at most `max_size` visible cells.
/// Escape sequences are zero width and are never split; a sequence sitting
/// on the split point stays with the left half.
#[must_use]
pub fn chop_cells(text: &str, max_size: usize) -> (&str, &str) {
    let mut escapes = escape_ranges(text).into_iter().peekable();
    let mut width = 0;
    let mut byte_pos = 0;

    let mut i = 0;
    while i < text.len() {
        if let Some(&(start, end)) = escapes.peek()
            && start == i
        {
            escapes.next();
            i = end;
            byte_pos = end;
            continue;
        }
        let Some(c) = text[i..].chars().next() else {
            break;
        };
        let char_width = get_character_cell_size(c);
        if width + char_width > max_size {
            break;
        }
        width += char_width;
        i += c.len_utf8();
        byte_pos = i;
    }

    (&text[..byte_pos], &text[byte_pos..])
}

/// Truncate a possibly-styled string to a maximum visible width, appending
/// an ellipsis when content is dropped.
///
/// Text that already fits passes through untouched. When the cut lands
/// inside styled content a reset is appended so the styling cannot bleed
/// into following output.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if visible_len(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let (kept, _) = chop_cells(text, max_width - 1);
    let mut out = String::with_capacity(kept.len() + 6);
    out.push_str(kept);
    out.push('…');
    if kept.contains('\x1b') && !kept.ends_with("\x1b[0m") {
        out.push_str("\x1b[0m");
    }
    out
}

/// Greedy word wrap at a maximum visible width.
///
/// Hard newlines are preserved as line breaks, and the leading spaces of
/// each hard line survive the rewrap. Escape sequences stick to the word
/// they are embedded in and measure as zero cells. Words wider than the
/// limit are folded with [`chop_cells`].
#[must_use]
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if width == 0 {
        lines.extend(text.split('\n').map(str::to_string));
        return lines;
    }

    for hard_line in text.split('\n') {
        let content = hard_line.trim_start_matches(' ');
        let lead = hard_line.len() - content.len();
        let mut current = " ".repeat(lead);
        let mut current_width = lead;
        let mut line_started = false;

        for word in content.split(' ') {
            let word_width = visible_len(word);
            let sep = usize::from(line_started);

            if current_width + sep + word_width <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += sep + word_width;
                line_started = true;
                continue;
            }

            if line_started || current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
                line_started = false;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                line_started = true;
                continue;
            }

            // Fold a word wider than the wrap width.
            let mut rest = word;
            while visible_len(rest) > width {
                let (chunk, tail) = chop_cells(rest, width);
                if chunk.is_empty() {
                    break;
                }
                lines.push(chunk.to_string());
                rest = tail;
            }
            current.push_str(rest);
            current_width = visible_len(rest);
            line_started = true;
        }

        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(cell_len("hello"), 5);
        assert_eq!(cell_len("Hello, World!"), 13);
    }

    #[test]
    fn test_character_width() {
        assert_eq!(get_character_cell_size('a'), 1);
        assert_eq!(get_character_cell_size(' '), 1);
        assert_eq!(get_character_cell_size('\x1b'), 0);
    }

    #[test]
    fn test_cjk_width() {
        assert_eq!(cell_len("日本語"), 6);
        assert_eq!(cell_len("中文"), 4);
        assert_eq!(cell_len("Hello日本"), 9);
    }

    #[test]
    fn test_cell_len_caching() {
        let long = "Hello, this is a longer string for testing";
        let width1 = cell_len(long);
        let width2 = cell_len(long);
        assert_eq!(width1, width2);
        assert_eq!(width1, 42);
    }

    #[test]
    fn test_strip_ansi_plain_passthrough() {
        let plain = "no escapes here";
        assert!(matches!(strip_ansi(plain), Cow::Borrowed(_)));
        assert_eq!(strip_ansi(plain), plain);
    }

    #[test]
    fn test_strip_ansi_removes_sgr() {
        assert_eq!(strip_ansi("\x1b[1;38;5;39mbold\x1b[0m"), "bold");
        assert_eq!(strip_ansi("a\x1b[31mb\x1b[0mc"), "abc");
    }

    #[test]
    fn test_visible_len_ignores_styling() {
        assert_eq!(visible_len("\x1b[1mName\x1b[0m"), 4);
        assert_eq!(visible_len("\x1b[38;5;252m日本\x1b[0m"), 4);
        assert_eq!(visible_len("plain"), cell_len("plain"));
    }

    #[test]
    fn test_chop_cells() {
        let (left, right) = chop_cells("hello world", 5);
        assert_eq!(left, "hello");
        assert_eq!(right, " world");
    }

    #[test]
    fn test_chop_cells_cjk() {
        let (left, right) = chop_cells("日本語", 3);
        assert_eq!(left, "日");
        assert_eq!(right, "本語");
    }

    #[test]
    fn test_chop_cells_keeps_escapes_whole() {
        let styled = "\x1b[1mhello\x1b[0m world";
        let (left, right) = chop_cells(styled, 5);
        assert_eq!(left, "\x1b[1mhello\x1b[0m");
        assert_eq!(right, " world");
        assert_eq!(visible_len(left), 5);
    }

    #[test]
    fn test_truncate_with_ellipsis_fits() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_with_ellipsis_cuts() {
        let out = truncate_with_ellipsis("hello world", 5);
        assert_eq!(out, "hell…");
        assert_eq!(visible_len(&out), 5);
    }

    #[test]
    fn test_truncate_with_ellipsis_closes_styling() {
        let out = truncate_with_ellipsis("\x1b[31mhello world", 5);
        assert!(out.ends_with("\x1b[0m"));
        assert_eq!(visible_len(&out), 5);
    }

    #[test]
    fn test_wrap_words_basic() {
        let lines = wrap_words("the quick brown fox", 10);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
    }

    #[test]
    fn test_wrap_words_preserves_hard_breaks() {
        let lines = wrap_words("one\ntwo three", 20);
        assert_eq!(lines, vec!["one", "two three"]);
    }

    #[test]
    fn test_wrap_words_folds_long_words() {
        let lines = wrap_words("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_words_keeps_leading_indent() {
        let lines = wrap_words("  indented line\nplain", 20);
        assert_eq!(lines, vec!["  indented line", "plain"]);
    }

    #[test]
    fn test_wrap_words_never_exceeds_width() {
        let lines = wrap_words("a styled \x1b[1mbold run\x1b[0m of words", 8);
        for line in &lines {
            assert!(visible_len(line) <= 8, "line too wide: {line:?}");
        }
    }

    #[test]
    fn test_wrap_words_empty_input() {
        assert_eq!(wrap_words("", 10), vec![String::new()]);
    }
}
