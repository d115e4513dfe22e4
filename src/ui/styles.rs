use crate::domain::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
        Theme::Dark => Style::default().fg(Color::White).bg(Color::Black),
    }
}

/// Selected row highlight style
pub fn selected_style(theme: Theme) -> Style {
    let bg = match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::LightCyan,
    };
    let fg = match theme {
        Theme::Light => Color::White,
        Theme::Dark => Color::Black,
    };
    Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
}

/// Completed task style
pub fn done_style(theme: Theme) -> Style {
    let fg = match theme {
        Theme::Light => Color::DarkGray,
        Theme::Dark => Color::Gray,
    };
    Style::default().fg(fg).add_modifier(Modifier::CROSSED_OUT)
}

/// Deadline column style
pub fn deadline_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::Magenta),
        Theme::Dark => Style::default().fg(Color::LightMagenta),
    }
}

/// Marker for tasks with a request in flight
pub fn pending_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style(theme: Theme) -> Style {
    let fg = match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::Cyan,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

/// Active filter tab
pub fn active_tab_style(theme: Theme) -> Style {
    title_style(theme).add_modifier(Modifier::UNDERLINED)
}

/// Border style
pub fn border_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::DarkGray),
        Theme::Dark => Style::default().fg(Color::Gray),
    }
}

/// Modal background style
pub fn modal_bg_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().bg(Color::Gray).fg(Color::Black),
        Theme::Dark => Style::default().bg(Color::DarkGray).fg(Color::White),
    }
}

/// Modal title style
pub fn modal_title_style(theme: Theme) -> Style {
    let fg = match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::Yellow,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().fg(Color::DarkGray),
        Theme::Dark => Style::default().fg(Color::Gray),
    }
}

/// Error message style
pub fn error_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}
