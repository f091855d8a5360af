//! Rendering collaborator interface.

use super::state::DrawTicket;
use std::fmt::Write as _;

/// Plays back a draw. The shell reports completion to the session once
/// presentation finishes.
pub trait Presenter {
    /// Presents a freshly drawn ticket.
    fn present(&mut self, ticket: &DrawTicket);
}

/// Renders the reel around the winner as a single text line.
///
/// The winner is bracketed: `… 14  3 [27] 8  51 …`.
#[derive(Debug, Clone)]
pub struct TextPresenter {
    radius: usize,
    lines: Vec<String>,
}

impl TextPresenter {
    /// Shows `radius` decoys on each side of the winner.
    pub fn new(radius: usize) -> Self {
        Self {
            radius,
            lines: Vec::new(),
        }
    }

    /// Renders a ticket without recording it.
    pub fn render(&self, ticket: &DrawTicket) -> String {
        let reel = &ticket.reel;
        let start = reel.winning_index().saturating_sub(self.radius);
        let mut line = String::new();

        if start > 0 {
            line.push_str("… ");
        }
        for (offset, value) in reel.window(self.radius).iter().enumerate() {
            if start + offset == reel.winning_index() {
                let _ = write!(line, "[{}] ", value);
            } else {
                let _ = write!(line, "{} ", value);
            }
        }
        if start + reel.window(self.radius).len() < reel.len() {
            line.push('…');
        }
        line.trim_end().to_string()
    }

    /// Lines presented so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Default for TextPresenter {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Presenter for TextPresenter {
    fn present(&mut self, ticket: &DrawTicket) {
        let line = self.render(ticket);
        tracing::info!(draw_id = ticket.draw_id, reel = %line, "Presenting draw");
        self.lines.push(line);
    }
}
