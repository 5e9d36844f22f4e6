//! Colored text rendering of the header and grid.
//!
//! Lines end in `\r\n` because output is written while the terminal is in raw
//! mode.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, StyledContent, Stylize},
    terminal::{Clear, ClearType},
};
use slide_engine::{Grid, Tile};

use crate::session::Session;

const CELL_WIDTH: usize = 4;

/// Clear the screen and draw header plus grid.
pub fn draw<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    header(out, session)?;
    grid(out, session.grid())?;
    out.flush()
}

pub fn header<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    queue!(
        out,
        Print("== 2048  Game ==\r\n"),
        Print("High score: "),
        Print(colored(session.high_score(), session.high_score().to_string())),
        Print("\r\nnumber history: ")
    )?;
    for value in session.history() {
        queue!(out, Print(colored(value, value.to_string())), Print(' '))?;
    }
    queue!(out, Print("\r\n"))
}

pub fn grid<W: Write>(out: &mut W, grid: &Grid) -> io::Result<()> {
    let border = format!("{}+\r\n", "+-----".repeat(grid.width()));
    for row in grid.rows() {
        queue!(out, Print(&border))?;
        for &value in row {
            queue!(out, Print('|'))?;
            if value == 0 {
                queue!(out, Print(" ".repeat(CELL_WIDTH)))?;
            } else {
                let text = format!("{value:<width$}", width = CELL_WIDTH);
                queue!(out, Print(colored(value, text)))?;
            }
            queue!(out, Print(' '))?;
        }
        queue!(out, Print("|\r\n"))?;
    }
    queue!(out, Print(&border))
}

/// Style a tile's text by its magnitude.
fn colored(value: Tile, text: String) -> StyledContent<String> {
    // 2 -> 0, 4 -> 1, ... clamped to the last style
    let rank = value.max(1).ilog2().saturating_sub(1).min(10);
    match rank {
        0 => text.with(Color::DarkRed),
        1 => text.with(Color::DarkGreen),
        2 => text.with(Color::DarkYellow),
        3 => text.with(Color::DarkBlue),
        4 => text.with(Color::DarkMagenta),
        5..=7 => text.with(Color::DarkCyan),
        8 => text.with(Color::Yellow),
        9 => text.black().on_dark_green().italic(),
        _ => text.black().on_dark_yellow().italic(),
    }
}
