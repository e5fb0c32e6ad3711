//! Styled console text

use crossterm::style::{Color, Stylize};

use ringprov::domain::value_objects::{FailurePolicy, Outcome};

use crate::ui::theme::colors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Error,
    Warning,
    Info,
    Dim,
}

impl Tone {
    /// Tone of the outcome word on a stage line
    pub fn of_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Changed => Tone::Info,
            Outcome::Failed { .. } => Tone::Error,
            Outcome::AlreadySatisfied | Outcome::Skipped { .. } => Tone::Dim,
        }
    }

    /// Tone of a failure message under the stage's policy
    pub fn of_policy(policy: FailurePolicy) -> Self {
        match policy {
            FailurePolicy::Abort => Tone::Error,
            FailurePolicy::Warn | FailurePolicy::Ignore => Tone::Warning,
        }
    }

    pub fn paint(self, text: impl Into<String>) -> ColoredText {
        ColoredText {
            text: text.into(),
            tone: self,
            bold: false,
        }
    }

    fn color(self) -> Option<Color> {
        match self {
            Tone::Plain => None,
            Tone::Success => Some(colors::SUCCESS),
            Tone::Error => Some(colors::ERROR),
            Tone::Warning => Some(colors::WARNING),
            Tone::Info => Some(colors::INFO),
            Tone::Dim => Some(colors::DIM),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredText {
    text: String,
    tone: Tone,
    bold: bool,
}

impl ColoredText {
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn render(&self, supports_color: bool) -> String {
        let color = self.tone.color();
        if !supports_color || (color.is_none() && !self.bold) {
            return self.text.clone();
        }

        let mut styled = self.text.as_str().stylize();
        if let Some(color) = color {
            styled = styled.with(color);
        }
        if self.bold {
            styled = styled.bold();
        }
        styled.to_string()
    }
}
