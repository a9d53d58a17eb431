//! Input scripts for the `simulate` command.
//!
//! A script is a comma-separated list of frames. Each frame holds one or more
//! tokens joined with `+`: a key (`w`, `a`, `s`, `d`, `enter`, `esc`),
//! `quit`, mouse motion `m<dx>`, or `_` for a frame with no input.

use tilecast_input::{Event, Key, MouseDelta, ScriptedFrame};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown token `{0}` in frame {1}")]
    UnknownToken(String, usize),
    #[error("bad mouse delta `{0}` in frame {1}")]
    BadMouse(String, usize),
}

fn parse_token(token: &str, frame: usize, out: &mut ScriptedFrame) -> Result<(), ScriptError> {
    let key = match token.to_ascii_lowercase().as_str() {
        "_" => return Ok(()),
        "quit" => {
            out.events.push(Event::WindowQuit);
            return Ok(());
        }
        "w" => Key::W,
        "a" => Key::A,
        "s" => Key::S,
        "d" => Key::D,
        "enter" => Key::Enter,
        "esc" => Key::Escape,
        other => {
            let Some(dx) = other.strip_prefix('m') else {
                return Err(ScriptError::UnknownToken(token.to_string(), frame));
            };
            let dx: f64 = dx
                .parse()
                .map_err(|_| ScriptError::BadMouse(token.to_string(), frame))?;
            out.mouse = MouseDelta::new(out.mouse.dx + dx, out.mouse.dy);
            return Ok(());
        }
    };
    out.events.push(Event::key_down(key));
    Ok(())
}

pub fn parse_script(script: &str) -> Result<Vec<ScriptedFrame>, ScriptError> {
    script
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .enumerate()
        .map(|(i, frame)| {
            let mut out = ScriptedFrame::default();
            for token in frame.split('+').map(str::trim) {
                parse_token(token, i, &mut out)?;
            }
            Ok(out)
        })
        .collect()
}
