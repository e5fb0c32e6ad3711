use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Changed,
    Error,
    Warning,
    Skipped,
    Arrow,
    Planned,
    Drift,
    Provision,
    Status,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Changed) => theme::icons::CHANGED,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Skipped) => theme::icons::SKIPPED,
            (true, Icon::Arrow) => theme::icons::ARROW,
            (true, Icon::Planned) => theme::icons::PLANNED,
            (true, Icon::Drift) => theme::icons::DRIFT,
            (true, Icon::Provision) => theme::icons::PROVISION,
            (true, Icon::Status) => theme::icons::STATUS,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Changed) => theme::icons_ascii::CHANGED,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Skipped) => theme::icons_ascii::SKIPPED,
            (false, Icon::Arrow) => theme::icons_ascii::ARROW,
            (false, Icon::Planned) => theme::icons_ascii::PLANNED,
            (false, Icon::Drift) => theme::icons_ascii::DRIFT,
            (false, Icon::Provision) => theme::icons_ascii::PROVISION,
            (false, Icon::Status) => theme::icons_ascii::STATUS,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Changed => theme::colors::INFO,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Drift => theme::colors::WARNING,
            Icon::Skipped | Icon::Arrow | Icon::Planned => theme::colors::DIM,
            Icon::Provision | Icon::Status => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
