pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;

use crate::app::AppState;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::{render_header, render_list_pane};
use modal::{render_help, render_notice, render_picker};
use ratatui::Frame;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_header(f, app, layout.header_area);
    render_list_pane(f, app, layout.list_area);
    render_keybindings(f, layout.keybindings_area, app.ui_mode(), app.theme);

    // Overlays, bottom to top
    if app.session.is_active() {
        render_input_form(f, app, size);
    }
    if app.picker.is_open() {
        render_picker(f, app, size);
    }
    if app.show_help {
        render_help(f, app, size);
    }
    if app.notice.is_some() {
        render_notice(f, app, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Task, TaskId, Theme};
    use chrono::{Local, TimeZone, Utc};
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn create_test_app() -> AppState {
        let mut app = AppState::new(Theme::Dark, true);
        app.store.replace_all(vec![Task {
            id: TaskId::Number(1),
            title: "Water plants".to_string(),
            description: None,
            completed: false,
            deadline: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            extra: Default::default(),
        }]);
        app
    }

    #[test]
    fn test_render_list_and_header() {
        let app = create_test_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();

        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("Water plants"));
        assert!(text.contains("All (1)"));
        assert!(text.contains("Pending (1)"));
    }

    #[test]
    fn test_render_add_form() {
        let mut app = create_test_app();
        app.start_create(Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();

        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("Add Task"));
        assert!(!text.contains("Save Changes"));
    }

    #[test]
    fn test_render_edit_form() {
        let mut app = create_test_app();
        app.start_edit_selected();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();

        terminal.draw(|f| render(f, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Save Changes"));
    }
}
