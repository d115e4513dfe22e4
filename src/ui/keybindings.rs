use crate::domain::{Theme, UiMode};
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Hints for the current mode
pub fn hints_for(mode: UiMode) -> &'static str {
    match mode {
        UiMode::Normal => {
            " ↑/↓ select   Enter toggle   a add   e edit   d delete   f filter   t theme   r reload   ? help   q quit"
        }
        UiMode::Form => " Tab next field   Enter save / pick deadline   Space toggle done   Esc cancel",
        UiMode::Picker => " ←/→ ±1 day or hour   ↑/↓ ±1 week or 5 min   Enter confirm   Esc close",
        UiMode::Help => " ? / Esc close help",
        UiMode::Notice => " Enter / Esc dismiss",
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect, mode: UiMode, theme: Theme) {
    let paragraph = Paragraph::new(Line::raw(hints_for(mode))).style(hint_style(theme));
    f.render_widget(paragraph, area);
}
