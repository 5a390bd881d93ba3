//! Conversation session driver.
//!
//! A [`Session`] runs one conversation over a [`Responder`]. Each call to
//! [`Session::turn`] consumes one line of input (or end of input) and moves
//! the session through `Running → Terminated`:
//!
//! - blank input is skipped without a reply;
//! - any other input is answered, and a farewell ends the session after its
//!   reply;
//! - end of input ends the session with the closing message and no
//!   classification.
//!
//! [`Session::run`] drives turns over a reader and a writer, prompting with
//! `You: ` and prefixing replies with `Bot: `.

use std::io::{BufRead, Write};

use log::debug;

use crate::error::Result;
use crate::responder::{Reply, Responder};

/// Prefix of bot lines in the console transcript.
pub const BOT_PREFIX: &str = "Bot: ";

/// Prompt printed before reading a line.
pub const USER_PROMPT: &str = "You: ";

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated,
}

/// Outcome of one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    /// Blank input, or the session had already ended.
    Skipped,
    /// The utterance was answered.
    Replied(Reply),
    /// Input ended; the closing message should be shown.
    Closed(String),
}

/// One conversation over a responder.
pub struct Session<'a> {
    responder: &'a Responder,
    state: SessionState,
    turns: usize,
}

impl<'a> Session<'a> {
    pub fn new(responder: &'a Responder) -> Self {
        Session {
            responder,
            state: SessionState::Running,
            turns: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Number of answered turns.
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Process one line of input; `None` means end of input.
    pub fn turn(&mut self, input: Option<&str>) -> Result<Turn> {
        if !self.is_running() {
            return Ok(Turn::Skipped);
        }

        let Some(line) = input else {
            debug!("Input ended after {} turns", self.turns);
            self.state = SessionState::Terminated;
            return Ok(Turn::Closed(self.responder.closing_message().to_string()));
        };

        let line = line.trim();
        if line.is_empty() {
            return Ok(Turn::Skipped);
        }

        let reply = self.responder.reply(line)?;
        self.turns += 1;
        if reply.intent.ends_session() {
            debug!("Farewell after {} turns", self.turns);
            self.state = SessionState::Terminated;
        }
        Ok(Turn::Replied(reply))
    }

    /// Run the console loop until the session terminates.
    ///
    /// Lines that are not valid UTF-8 are skipped like blank input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut reader: R, mut writer: W) -> Result<()> {
        writeln!(writer, "{BOT_PREFIX}{}", self.responder.greeting_message())?;

        let mut buffer = Vec::new();
        while self.is_running() {
            write!(writer, "{USER_PROMPT}")?;
            writer.flush()?;

            buffer.clear();
            let line = match reader.read_until(b'\n', &mut buffer)? {
                0 => None,
                _ => match std::str::from_utf8(&buffer) {
                    Ok(line) => Some(line),
                    Err(e) => {
                        debug!("Skipping input line that is not valid UTF-8: {e}");
                        continue;
                    }
                },
            };
            match self.turn(line)? {
                Turn::Skipped => {}
                Turn::Replied(reply) => writeln!(writer, "{BOT_PREFIX}{}", reply.text)?,
                Turn::Closed(message) => writeln!(writer, "\n{BOT_PREFIX}{message}")?,
            }
        }

        writer.flush()?;
        Ok(())
    }
}
