use ringprov::config::ConfigWarning;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::Tone;

pub fn print_config_warnings(ui: &UiContext, warnings: &[ConfigWarning]) {
    for w in warnings {
        eprintln!(
            "{} {}",
            Icon::Warning.colored(ui.color, ui.unicode),
            Tone::Warning.paint(w.to_string()).render(ui.color)
        );
    }
}
