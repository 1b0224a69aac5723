//! Terminal rendering of backdrop frames.
//!
//! The text renderer draws the grid row by row, one fixed-width token per cell:
//! the displayed symbol, arrow and change colored by direction, dimmed or bolded by the cell's ambient
//! opacity, and shown in reverse video while the cell is popped. The JSON renderer
//! writes each frame as a single line.

use std::io::Write;
use ticker_common::Result;
use ticker_engine::{CellView, Frame};

const CLEAR_SCREEN: &str = "\x1b[2J";
const CURSOR_HOME: &str = "\x1b[H";
const RESET: &str = "\x1b[0m";
const SYMBOL_WIDTH: usize = 4;
const CHANGE_WIDTH: usize = 6;

/// Clear the terminal before the first text frame.
pub fn clear<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "{}{}", CLEAR_SCREEN, CURSOR_HOME)?;
    Ok(())
}

/// Draw `frame` as a colored text grid, overwriting the previous one.
pub fn render_text<W: Write>(out: &mut W, frame: &Frame) -> Result<()> {
    write!(out, "{}", CURSOR_HOME)?;
    for row in frame.cells.chunks(frame.grid.cols.max(1)) {
        for cell in row {
            write!(out, "{} ", cell_token(cell))?;
        }
        writeln!(out)?;
    }
    let scrambling = frame.cells.iter().filter(|cell| cell.scrambling).count();
    let popped = frame.cells.iter().filter(|cell| cell.popped).count();
    writeln!(
        out,
        "t={:>7}ms  scrambling={:>3}  popped={:>3}",
        frame.elapsed_ms, scrambling, popped
    )?;
    Ok(())
}

/// Write `frame` as one line of JSON.
pub fn render_json<W: Write>(out: &mut W, frame: &Frame) -> Result<()> {
    serde_json::to_writer(&mut *out, frame)?;
    writeln!(out)?;
    Ok(())
}

fn cell_token(cell: &CellView) -> String {
    let color = if cell.text.direction.is_up() { 32 } else { 31 };
    let weight = match cell.pose.opacity {
        o if o < 0.3 => 2,
        o if o > 0.6 => 1,
        _ => 22,
    };
    let reverse = if cell.popped { ";7" } else { "" };
    let symbol: String = cell.text.symbol.chars().take(SYMBOL_WIDTH).collect();
    let change: String = cell.text.change.chars().take(CHANGE_WIDTH).collect();
    format!(
        "\x1b[{};{}{}m{:<sw$}{}{:>cw$}{}",
        weight,
        color,
        reverse,
        symbol,
        cell.text.arrow,
        change,
        RESET,
        sw = SYMBOL_WIDTH,
        cw = CHANGE_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use ticker_common::FixedRandom;
    use ticker_common::grid::ROWS;
    use ticker_engine::Backdrop;

    fn frame_at(ms: u64) -> Frame {
        let mut backdrop = Backdrop::mount(FixedRandom(0.5));
        backdrop.advance_to(Duration::from_millis(ms));
        backdrop.frame()
    }

    #[test]
    fn text_has_one_line_per_row_plus_status() {
        let mut out = Vec::new();
        render_text(&mut out, &frame_at(2_500)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), ROWS + 1);
        assert!(text.contains("t=   2500ms"));
        assert!(text.contains("scrambling=  0"));
    }

    #[test]
    fn tokens_are_green_for_rising_quotes() {
        let frame = frame_at(0);
        let token = cell_token(&frame.cells[0]);
        // invisible before its wave delay, so dimmed
        assert!(token.starts_with("\x1b[2;32m"));
        assert!(token.ends_with(RESET));
    }

    #[test]
    fn tokens_carry_arrow_and_change() {
        let frame = frame_at(0);
        // (7·0 + 16) mod 32 is ATOM; a 0.5 draw rises by 2%
        assert!(cell_token(&frame.cells[0]).contains("ATOM▲+2.00%"));
    }

    #[test]
    fn scrambled_tokens_show_the_placeholder() {
        let mut cell = frame_at(0).cells[0].clone();
        cell.scrambling = true;
        cell.text.symbol = "A3F".into();
        cell.text.change = "7C%".into();
        cell.text.arrow = "▼";
        assert!(cell_token(&cell).contains("A3F ▼   7C%"));
    }

    #[test]
    fn json_is_a_single_line() {
        let mut out = Vec::new();
        render_json(&mut out, &frame_at(100)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["cells"].as_array().unwrap().len(), 480);
    }
}
