//! End-to-end tests for Markdown table rendering.
//!
//! Tables run through the whole pipeline: the document walk collects
//! header and body cells, and the layout engine grids them on table
//! close. These tests cover grid shape, edge suppression, alignment,
//! width capping, styled cells, and back-to-back tables.
//!
//! Run with: RUST_LOG=debug cargo test --test e2e_table_flow -- --nocapture

mod common;

use common::init_test_logging;
use inkdown::cells::{strip_ansi, visible_len};
use inkdown::prelude::*;

fn plain(width: usize) -> Renderer {
    Renderer::new(
        RenderOptions::new()
            .width(width)
            .no_color()
            .preset(StylePreset::Dark),
    )
}

fn colored(width: usize) -> Renderer {
    Renderer::new(
        RenderOptions::new()
            .width(width)
            .color_system(ColorSystem::TrueColor)
            .preset(StylePreset::Dark),
    )
}

const NAME_AGE: &str = "| Name | Age |\n| --- | --- |\n| Ann | 30 |\n| Bob | 9 |\n";

// =============================================================================
// Scenario 1: Grid shape
// =============================================================================

#[test]
fn e2e_table_two_column_grid() {
    init_test_logging();
    tracing::info!("Starting E2E two column grid test");

    let output = plain(80).render(NAME_AGE).unwrap();
    tracing::debug!(output = %output, "Rendered table");

    assert_eq!(
        output,
        "\n   Name \u{2502} Age \n  \
         \u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{253C}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\n   \
         Ann  \u{2502} 30  \n   Bob  \u{2502} 9   \n\n"
    );

    tracing::info!("E2E two column grid test PASSED");
}

#[test]
fn e2e_table_grid_lines_share_width() {
    init_test_logging();

    let output = plain(80).render(NAME_AGE).unwrap();
    let widths: Vec<usize> = output
        .lines()
        .filter(|line| !line.is_empty())
        .map(visible_len)
        .collect();

    assert!(!widths.is_empty());
    assert!(
        widths.iter().all(|&w| w == widths[0]),
        "uneven grid: {widths:?}"
    );
}

#[test]
fn e2e_table_header_only() {
    init_test_logging();
    tracing::info!("Starting E2E header-only table test");

    let output = plain(80).render("| Col A | Col B |\n| --- | --- |\n").unwrap();
    tracing::debug!(output = %output, "Header-only table");

    assert_eq!(
        output,
        "\n   Col A \u{2502} Col B \n  \
         \u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{253C}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\n\n"
    );

    tracing::info!("E2E header-only table test PASSED");
}

#[test]
fn e2e_table_short_row_padded() {
    init_test_logging();

    let output = plain(80)
        .render("| A | B |\n| --- | --- |\n| 1 |\n")
        .unwrap();
    tracing::debug!(output = %output, "Short row table");

    assert_eq!(
        output,
        "\n   A \u{2502} B \n  \u{2500}\u{2500}\u{2500}\u{253C}\u{2500}\u{2500}\u{2500}\n   1 \u{2502}   \n\n"
    );
}

// =============================================================================
// Scenario 2: Edges
// =============================================================================

#[test]
fn e2e_table_outer_edges_suppressed() {
    init_test_logging();
    tracing::info!("Starting E2E edge suppression test");

    let output = plain(80).render(NAME_AGE).unwrap();

    for corner in ['\u{250C}', '\u{2510}', '\u{2514}', '\u{2518}', '\u{251C}', '\u{2524}', '\u{252C}', '\u{2534}'] {
        assert!(
            !output.contains(corner),
            "outer edge glyph {corner} leaked: {output}"
        );
    }
    // Content lines open with padding, not a border glyph.
    for line in output.lines().filter(|line| line.contains("Ann")) {
        assert!(line.starts_with(' '), "unexpected edge: {line:?}");
        assert!(!line.ends_with('\u{2502}'));
    }

    tracing::info!("E2E edge suppression test PASSED");
}

// =============================================================================
// Scenario 3: Sequential tables
// =============================================================================

#[test]
fn e2e_two_tables_render_independently() {
    init_test_logging();
    tracing::info!("Starting E2E sequential tables test");

    let source = "| A |\n| - |\n| 1 |\n\nbetween\n\n| B |\n| - |\n| 2 |\n";
    let output = plain(80).render(source).unwrap();
    tracing::debug!(output = %output, "Two tables");

    assert_eq!(
        output,
        "\n   A \n  \u{2500}\u{2500}\u{2500}\n   1 \n\n  between\n\n   B \n  \u{2500}\u{2500}\u{2500}\n   2 \n\n"
    );

    tracing::info!("E2E sequential tables test PASSED");
}

// =============================================================================
// Scenario 4: Alignment
// =============================================================================

#[test]
fn e2e_table_alignment_markers() {
    init_test_logging();
    tracing::info!("Starting E2E alignment test");

    let source = "| Left | Center | Right |\n| :--- | :---: | ---: |\n| a | b | c |\n";
    let output = plain(80).render(source).unwrap();
    tracing::debug!(output = %output, "Aligned table");

    assert!(
        output.contains("\n   a    \u{2502}   b    \u{2502}     c \n"),
        "alignment mismatch: {output}"
    );

    tracing::info!("E2E alignment test PASSED");
}

// =============================================================================
// Scenario 5: Width capping
// =============================================================================

#[test]
fn e2e_wide_table_shrinks_to_terminal() {
    init_test_logging();
    tracing::info!("Starting E2E table shrink test");

    let source =
        "| Column One | Column Two |\n| --- | --- |\n| first cell | second cell |\n";
    let output = plain(24).render(source).unwrap();
    tracing::debug!(output = %output, "Shrunk table");

    for line in output.lines() {
        assert!(visible_len(line) <= 24, "line too wide: {line:?}");
    }
    assert!(output.contains('\u{2026}'), "expected truncation: {output}");

    tracing::info!("E2E table shrink test PASSED");
}

// =============================================================================
// Scenario 6: Styled cells
// =============================================================================

#[test]
fn e2e_styled_cells_align_like_plain() {
    init_test_logging();
    tracing::info!("Starting E2E styled cell alignment test");

    let source = "| Name | Age |\n| --- | --- |\n| **Ann** | 30 |\n";
    let plain_out = plain(80).render(source).unwrap();
    let colored_out = colored(80).render(source).unwrap();
    tracing::debug!(colored = %colored_out, "Styled table");

    assert!(colored_out.contains('\u{1b}'));
    assert_eq!(strip_ansi(&colored_out), plain_out);

    tracing::info!("E2E styled cell alignment test PASSED");
}

#[test]
fn e2e_link_in_cell_keeps_text_only() {
    init_test_logging();

    let source = "| Ref |\n| --- |\n| [docs](https://example.com) |\n";
    let output = plain(80).render(source).unwrap();
    tracing::debug!(output = %output, "Link cell");

    assert_eq!(
        output,
        "\n   Ref  \n  \u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\n   docs \n\n"
    );
    assert!(!output.contains("example.com"));
}

// =============================================================================
// Scenario 7: Custom separators
// =============================================================================

#[test]
fn e2e_ascii_sheet_uses_pipe_dash_border() {
    init_test_logging();
    tracing::info!("Starting E2E ascii border test");

    let output = Renderer::new(
        RenderOptions::new()
            .width(80)
            .no_color()
            .preset(StylePreset::Ascii),
    )
    .render(NAME_AGE)
    .unwrap();
    tracing::debug!(output = %output, "Ascii table");

    assert_eq!(
        output,
        "\n   Name | Age \n  ------|-----\n   Ann  | 30  \n   Bob  | 9   \n\n"
    );

    tracing::info!("E2E ascii border test PASSED");
}

// =============================================================================
// Scenario 8: Tables inside other blocks
// =============================================================================

#[test]
fn e2e_table_inside_blockquote() {
    init_test_logging();
    tracing::info!("Starting E2E quoted table test");

    let output = plain(80).render("> | A |\n> | - |\n> | 1 |\n").unwrap();
    tracing::debug!(output = %output, "Quoted table");

    assert_eq!(
        output,
        "\n  \u{2502}  A \n  \u{2502} \u{2500}\u{2500}\u{2500}\n  \u{2502}  1 \n\n"
    );

    tracing::info!("E2E quoted table test PASSED");
}

#[test]
fn e2e_table_between_paragraphs_keeps_spacing() {
    init_test_logging();

    let output = plain(80)
        .render("before\n\n| K | V |\n| - | - |\n| a | b |\n\nafter\n")
        .unwrap();

    assert!(output.starts_with("\n  before\n\n"));
    assert!(output.ends_with("\n  after\n\n"));
    assert!(output.contains(" K \u{2502} V \n"));
}
