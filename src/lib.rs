//! # inkdown
//!
//! Markdown rendering for the terminal.
//!
//! Documents are parsed with pulldown-cmark, laid out against the
//! terminal width, and emitted as ANSI-styled text. Styling is driven by
//! a [`StyleSheet`] with built-in dark, light, and ASCII variants;
//! colors degrade to the detected terminal color depth.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let out = inkdown::render("# Hello\n\nSome *styled* text.")?;
//! print!("{out}");
//! ```
//!
//! ## Core Concepts
//!
//! - **Renderer**: Walks the parsed event stream and assembles output
//! - **StyleSheet**: Per-element style rules, cascading from the
//!   document rule down to inline spans
//! - **Table**: Grid layout with per-column alignment, padding, and
//!   border control
//! - **ColorSystem**: Detected color depth (16, 256, or truecolor)

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cells;
pub mod color;
pub mod style;
mod emit;
pub mod styles;
pub mod border;
pub mod table;
pub mod terminal;
pub mod render;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::border::Border;
    pub use crate::color::{Color, ColorSystem, ColorType, ColorTriplet};
    pub use crate::render::{RenderError, RenderOptions, Renderer};
    pub use crate::style::{Attributes, Style};
    pub use crate::styles::{StylePreset, StyleSheet};
    pub use crate::table::{Align, Table};
}

// Re-export key types at crate root
pub use color::{Color, ColorSystem};
pub use render::{RenderError, RenderOptions, Renderer};
pub use style::Style;
pub use styles::{StylePreset, StyleSheet};
pub use table::Table;

/// Render Markdown with environment-detected defaults: terminal width,
/// detected color depth, and the matching built-in sheet.
///
/// # Errors
///
/// Returns [`RenderError::MalformedTable`] when a table in the document
/// cannot be assembled.
pub fn render(markdown: &str) -> Result<String, RenderError> {
    Renderer::new(RenderOptions::new()).render(markdown)
}

/// Render Markdown with explicit options.
///
/// # Errors
///
/// Same as [`render`].
pub fn render_with(options: RenderOptions, markdown: &str) -> Result<String, RenderError> {
    Renderer::new(options).render(markdown)
}
