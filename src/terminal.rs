//! Terminal detection.
//!
//! Detects whether stdout is a terminal, which color system it supports,
//! and how wide it is. Detection runs against a captured environment
//! snapshot so it stays testable without a real TTY.

use std::io::IsTerminal;

use crate::color::ColorSystem;

/// Snapshot of the environment variables detection consults.
struct EnvSettings {
    no_color: Option<String>,
    colorterm: Option<String>,
    term: Option<String>,
    wt_session: Option<String>,
}

impl EnvSettings {
    fn capture() -> Self {
        Self {
            no_color: std::env::var("NO_COLOR").ok(),
            colorterm: std::env::var("COLORTERM").ok(),
            term: std::env::var("TERM").ok(),
            wt_session: std::env::var("WT_SESSION").ok(),
        }
    }
}

/// Get the terminal size (width, height) in cells, or `None` when it
/// cannot be determined.
#[must_use]
pub fn get_terminal_size() -> Option<(usize, usize)> {
    crossterm::terminal::size()
        .ok()
        .map(|(w, h)| (w as usize, h as usize))
}

/// Get the terminal width in cells, defaulting to 80.
#[must_use]
pub fn get_terminal_width() -> usize {
    get_terminal_size().map_or(80, |(w, _)| w)
}

/// Check if stdout is connected to a terminal. `FORCE_COLOR` makes the
/// answer yes regardless of the actual stream.
#[must_use]
pub fn is_terminal() -> bool {
    force_color_set(std::env::var("FORCE_COLOR").ok().as_deref()) || std::io::stdout().is_terminal()
}

// Empty and "0" count as unset.
fn force_color_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        let v = v.trim();
        !v.is_empty() && v != "0"
    })
}

/// Detect the color system supported by the terminal.
///
/// Consults, in order: `NO_COLOR` (disables colors), `COLORTERM`
/// (`truecolor`/`24bit`), `TERM` (`dumb`/`unknown` disable; suffixes
/// `-256color` and `-kitty` give 256 colors, `-16color` the standard
/// 16), and `WT_SESSION` (Windows Terminal, true color). On a plain
/// terminal the fallback is the standard 16 colors; off a terminal it
/// is no color at all.
#[must_use]
pub fn detect_color_system() -> Option<ColorSystem> {
    detect_color_system_with(&EnvSettings::capture(), is_terminal())
}

fn detect_color_system_with(env: &EnvSettings, is_tty: bool) -> Option<ColorSystem> {
    if env
        .no_color
        .as_deref()
        .is_some_and(|value| !value.is_empty())
    {
        return None;
    }

    if let Some(colorterm) = env.colorterm.as_deref() {
        match colorterm.trim().to_lowercase().as_str() {
            "truecolor" | "24bit" => return Some(ColorSystem::TrueColor),
            _ => {}
        }
    }

    let term = env
        .term
        .as_deref()
        .map(|value| value.trim().to_lowercase())
        .unwrap_or_default();
    if term == "dumb" || term == "unknown" {
        return None;
    }
    // "xterm-256color" -> "256color"
    match term.rsplit('-').next().unwrap_or("") {
        "kitty" | "256color" => return Some(ColorSystem::EightBit),
        "16color" => return Some(ColorSystem::Standard),
        _ => {}
    }

    // Windows Terminal announces itself through WT_SESSION rather than
    // TERM; this also holds inside WSL shells.
    if env.wt_session.is_some() {
        return Some(ColorSystem::TrueColor);
    }
    if cfg!(windows) {
        // The modern Windows console accepts VT true-color sequences.
        return Some(ColorSystem::TrueColor);
    }

    if is_tty {
        Some(ColorSystem::Standard)
    } else {
        None
    }
}
