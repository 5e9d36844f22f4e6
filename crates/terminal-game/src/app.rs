//! The interactive loop: one key in, one redraw out.

use std::io::Write;

use anyhow::Result;
use log::info;

use crate::config::KeyBindings;
use crate::input::{self, Command, KeySource};
use crate::render;
use crate::session::Session;

const QUIT_PROMPT: &str = "do you want to quit? (Y/N):";

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Quit,
    GameOver,
    InputClosed,
}

/// Play until the player quits, no moves remain, or input runs out.
pub fn run<K: KeySource, W: Write>(
    session: &mut Session,
    bindings: &KeyBindings,
    keys: &mut K,
    out: &mut W,
) -> Result<Ending> {
    render::draw(out, session)?;
    loop {
        let Some(key) = keys.next_key()? else {
            return Ok(Ending::InputClosed);
        };
        match input::decode(bindings, key) {
            None => continue,
            Some(Command::Quit) => {
                write!(out, "{}", QUIT_PROMPT)?;
                out.flush()?;
                let answer = keys.next_key()?;
                write!(out, "\r\n")?;
                match answer {
                    Some('y' | 'Y') => {
                        write!(out, "See you soon!\r\n")?;
                        out.flush()?;
                        info!("player quit after {} steps", session.steps());
                        return Ok(Ending::Quit);
                    }
                    None => return Ok(Ending::InputClosed),
                    Some(_) => {
                        let step = session.pass();
                        if finish_turn(session, step.game_over, out)? {
                            return Ok(Ending::GameOver);
                        }
                    }
                }
            }
            Some(Command::Move(dir)) => {
                let step = session.step(dir);
                if finish_turn(session, step.game_over, out)? {
                    return Ok(Ending::GameOver);
                }
            }
        }
    }
}

/// Redraw, and print the game-over line when no moves remain.
fn finish_turn<W: Write>(session: &Session, game_over: bool, out: &mut W) -> Result<bool> {
    render::draw(out, session)?;
    if game_over {
        write!(out, "\r\nGame over!\r\n")?;
        out.flush()?;
        info!(
            "game over after {} steps, highest tile {}",
            session.steps(),
            session.grid().highest_tile()
        );
    }
    Ok(game_over)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedKeys;
    use rand::{SeedableRng, rngs::StdRng};
    use slide_engine::{Grid, SpawnPool};

    fn session(cells: Vec<u64>, pool: SpawnPool) -> Session {
        let width = cells.len();
        Session::from_grid(
            Grid::from_cells(width, 1, cells),
            pool,
            StdRng::seed_from_u64(9),
            true,
        )
    }

    fn play(session: &mut Session, keys: &str) -> (Ending, String) {
        let mut out = Vec::new();
        let ending = run(
            session,
            &KeyBindings::default(),
            &mut ScriptedKeys::new(keys),
            &mut out,
        )
        .unwrap();
        (ending, String::from_utf8(out).unwrap())
    }

    #[test]
    fn confirmed_quit_stops() {
        let mut s = session(vec![2, 0, 0, 0, 0, 0], SpawnPool::default());
        let (ending, text) = play(&mut s, "qy");
        assert_eq!(ending, Ending::Quit);
        assert!(text.contains(QUIT_PROMPT));
        assert!(text.contains("See you soon!"));
        assert_eq!(s.steps(), 0);
    }

    #[test]
    fn declined_quit_keeps_playing() {
        let mut s = session(vec![2, 0, 0, 0, 0, 0], SpawnPool::default());
        let (ending, text) = play(&mut s, "qnd");
        assert_eq!(ending, Ending::InputClosed);
        assert!(!text.contains("See you soon!"));
        assert_eq!(s.steps(), 1);
        // the declined quit spawns like a no-op move, then the move spawns again
        assert_eq!(s.grid().count_empty(), 3);
    }

    #[test]
    fn declined_quit_can_end_the_game() {
        let mut s = session(vec![2, 4, 0], SpawnPool::new(vec![8]).unwrap());
        let (ending, text) = play(&mut s, "qnaa");
        assert_eq!(ending, Ending::GameOver);
        assert!(text.ends_with("Game over!\r\n"));
        assert_eq!(s.steps(), 0);
        assert_eq!(s.grid().cells(), &[2, 4, 8]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut s = session(vec![2, 0, 0, 0], SpawnPool::default());
        let (ending, _) = play(&mut s, "xz1 ");
        assert_eq!(ending, Ending::InputClosed);
        assert_eq!(s.steps(), 0);
        assert_eq!(s.grid().cells(), &[2, 0, 0, 0]);
    }

    #[test]
    fn stuck_grid_ends_the_game() {
        let mut s = session(vec![2, 4, 0], SpawnPool::new(vec![8]).unwrap());
        let (ending, text) = play(&mut s, "aaa");
        assert_eq!(ending, Ending::GameOver);
        assert!(text.ends_with("Game over!\r\n"));
        assert_eq!(s.steps(), 1);
    }

    #[test]
    fn uppercase_moves_work() {
        let mut s = session(vec![0, 2, 2, 0], SpawnPool::default());
        play(&mut s, "A");
        assert_eq!(s.grid().get(0, 0), 4);
    }
}
