//! Impact feedback.
//!
//! Terminals have no haptics; the closest thing they expose is the bell, which emulators render
//! as a sound or a visual flash. [`TerminalBell`] maps every impact onto it. Apps with a richer
//! channel implement [`Feedback`] themselves.

use std::io;
use std::io::Write;

use log::trace;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImpactStyle {
    Light,
    #[default]
    Medium,
    Heavy,
    Soft,
    Rigid,
}

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("failed to emit feedback: {0}")]
    Io(#[from] io::Error),
}

pub trait Feedback {
    fn impact_occurred_with(&mut self, style: ImpactStyle) -> Result<(), FeedbackError>;

    fn impact_occurred(&mut self) -> Result<(), FeedbackError> {
        self.impact_occurred_with(ImpactStyle::default())
    }
}

const BEL: &[u8] = b"\x07";

/// Rings the terminal bell on `writer` for every impact.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    writer: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Feedback for TerminalBell<W> {
    fn impact_occurred_with(&mut self, style: ImpactStyle) -> Result<(), FeedbackError> {
        trace!("impact feedback: {style:?}");
        self.writer.write_all(BEL)?;
        self.writer.flush()?;
        Ok(())
    }
}
