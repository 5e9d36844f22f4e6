//! Key decoding and the dimension prompt.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use slide_engine::Move;

use crate::config::{KeyBindings, MAX_DIMENSION};

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Quit,
}

/// Source of key presses. `Ok(None)` means input is closed.
pub trait KeySource {
    fn next_key(&mut self) -> Result<Option<char>>;
}

/// Map a key to a command. Case-insensitive; unbound keys yield `None`.
pub fn decode(bindings: &KeyBindings, key: char) -> Option<Command> {
    let key = key.to_ascii_lowercase();
    let table = [
        (bindings.left, Command::Move(Move::Left)),
        (bindings.right, Command::Move(Move::Right)),
        (bindings.up, Command::Move(Move::Up)),
        (bindings.down, Command::Move(Move::Down)),
        (bindings.quit, Command::Quit),
    ];
    table
        .into_iter()
        .find(|(bound, _)| bound.to_ascii_lowercase() == key)
        .map(|(_, cmd)| cmd)
}

/// Ask for a grid dimension in `1..=MAX_DIMENSION` until one parses.
pub fn prompt_dimension<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<usize> {
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;
        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("failed to read grid dimension")?;
        if read == 0 {
            bail!("input closed before a grid dimension was entered");
        }
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=MAX_DIMENSION).contains(&n) => return Ok(n),
            _ => writeln!(
                out,
                "\nPlease enter a whole number from 1 to {}.",
                MAX_DIMENSION
            )?,
        }
    }
}

/// Replays a fixed key sequence.
#[cfg(test)]
pub(crate) struct ScriptedKeys(std::collections::VecDeque<char>);

#[cfg(test)]
impl ScriptedKeys {
    pub(crate) fn new(keys: &str) -> Self {
        ScriptedKeys(keys.chars().collect())
    }
}

#[cfg(test)]
impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> Result<Option<char>> {
        Ok(self.0.pop_front())
    }
}
