use crate::api::Request;
use crate::app::AppState;
use crate::domain::{FilterMode, FormField, UiMode};
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the event loop should do after a key
#[derive(Debug, PartialEq)]
pub enum KeyOutcome {
    Continue,
    Quit,
    Dispatch(Request),
}

impl From<Option<Request>> for KeyOutcome {
    fn from(request: Option<Request>) -> Self {
        request.map_or(KeyOutcome::Continue, KeyOutcome::Dispatch)
    }
}

/// Handle keyboard input events
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: DateTime<Local>) -> KeyOutcome {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyOutcome::Quit;
    }

    match app.ui_mode() {
        UiMode::Normal => handle_normal_mode(app, key, now),
        UiMode::Form => handle_form_mode(app, key, now),
        UiMode::Picker => handle_picker_mode(app, key, now),
        UiMode::Help => handle_help_mode(app, key),
        UiMode::Notice => handle_notice_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent, now: DateTime<Local>) -> KeyOutcome {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            KeyOutcome::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            KeyOutcome::Continue
        }

        // Toggle completion
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected().into(),

        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_create(now);
            KeyOutcome::Continue
        }
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit_selected();
            KeyOutcome::Continue
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.delete_selected().into(),

        // Filters
        KeyCode::Char('f') | KeyCode::Char('F') => {
            app.cycle_filter();
            KeyOutcome::Continue
        }
        KeyCode::Char('1') => {
            app.set_filter(FilterMode::All);
            KeyOutcome::Continue
        }
        KeyCode::Char('2') => {
            app.set_filter(FilterMode::Completed);
            KeyOutcome::Continue
        }
        KeyCode::Char('3') => {
            app.set_filter(FilterMode::Pending);
            KeyOutcome::Continue
        }

        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.toggle_theme();
            KeyOutcome::Continue
        }
        KeyCode::Char('r') | KeyCode::Char('R') => KeyOutcome::Dispatch(app.request_load()),
        KeyCode::Char('?') => {
            app.toggle_help();
            KeyOutcome::Continue
        }

        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyOutcome::Quit,

        _ => KeyOutcome::Continue,
    }
}

/// Handle keys while the add/edit form is open
fn handle_form_mode(app: &mut AppState, key: KeyEvent, now: DateTime<Local>) -> KeyOutcome {
    match key.code {
        KeyCode::Enter => match app.form_field {
            FormField::Deadline => {
                app.open_picker(now);
                KeyOutcome::Continue
            }
            _ => app.submit_form().into(),
        },
        KeyCode::Esc => {
            app.cancel_form();
            KeyOutcome::Continue
        }
        KeyCode::Tab | KeyCode::Down => {
            app.form_next_field();
            KeyOutcome::Continue
        }
        KeyCode::Backspace => {
            if app.form_field == FormField::Deadline {
                app.form_clear_deadline();
            } else {
                app.form_backspace();
            }
            KeyOutcome::Continue
        }
        KeyCode::Char(' ') if app.form_field == FormField::Completed => {
            app.form_toggle_completed();
            KeyOutcome::Continue
        }
        KeyCode::Char(c) => {
            app.form_add_char(c);
            KeyOutcome::Continue
        }
        _ => KeyOutcome::Continue,
    }
}

/// Handle keys in the deadline picker
fn handle_picker_mode(app: &mut AppState, key: KeyEvent, now: DateTime<Local>) -> KeyOutcome {
    match key.code {
        KeyCode::Enter => app.picker_confirm(now),
        KeyCode::Esc => app.picker_dismiss(),

        // Date step moves by day/week, time step by hour/5 minutes
        KeyCode::Left => {
            app.picker.shift_days(-1);
            app.picker.shift_minutes(-60);
        }
        KeyCode::Right => {
            app.picker.shift_days(1);
            app.picker.shift_minutes(60);
        }
        KeyCode::Up => {
            app.picker.shift_days(-7);
            app.picker.shift_minutes(5);
        }
        KeyCode::Down => {
            app.picker.shift_days(7);
            app.picker.shift_minutes(-5);
        }
        _ => {}
    }
    KeyOutcome::Continue
}

fn handle_help_mode(app: &mut AppState, key: KeyEvent) -> KeyOutcome {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter => app.toggle_help(),
        KeyCode::Char('q') => return KeyOutcome::Quit,
        _ => {}
    }
    KeyOutcome::Continue
}

/// Notices block everything until dismissed
fn handle_notice_mode(app: &mut AppState, key: KeyEvent) -> KeyOutcome {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.dismiss_notice();
    }
    KeyOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Completion, UpdateOrigin};
    use crate::app::NoticeKind;
    use crate::domain::{PickerStep, Task, TaskId, Theme};
    use chrono::{NaiveDate, TimeZone, Utc};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app() -> AppState {
        let mut app = AppState::new(Theme::Light, true);
        app.store.replace_all(vec![
            Task {
                id: TaskId::Number(1),
                title: "Test task".to_string(),
                description: None,
                completed: false,
                deadline: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
                extra: Default::default(),
            },
            Task {
                id: TaskId::Number(2),
                title: "Done task".to_string(),
                description: None,
                completed: true,
                deadline: Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap(),
                extra: Default::default(),
            },
        ]);
        app
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 1, 9, 15, 0).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn press(app: &mut AppState, code: KeyCode) -> KeyOutcome {
        handle_key(app, key(code), now())
    }

    #[test]
    fn test_handle_navigation() {
        let mut app = create_test_app();
        assert_eq!(app.selected_index, 0);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_index, 1);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), KeyOutcome::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.start_create(now());
        assert_eq!(handle_key(&mut app, ctrl_c, now()), KeyOutcome::Quit);
    }

    #[test]
    fn test_handle_toggle_dispatches_update() {
        let mut app = create_test_app();
        match press(&mut app, KeyCode::Enter) {
            KeyOutcome::Dispatch(Request::Update { task, origin, .. }) => {
                assert_eq!(origin, UpdateOrigin::Toggle);
                assert_eq!(task.id, TaskId::Number(1));
                assert!(task.completed);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_handle_delete() {
        let mut app = create_test_app();
        match press(&mut app, KeyCode::Delete) {
            KeyOutcome::Dispatch(Request::Delete { id, .. }) => assert_eq!(id, TaskId::Number(1)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_handle_filters() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.filter, FilterMode::Completed);
        assert_eq!(app.visible_tasks().len(), 1);

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.filter, FilterMode::Pending);

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.filter, FilterMode::All);
    }

    #[test]
    fn test_handle_reload() {
        let mut app = create_test_app();
        assert!(matches!(
            press(&mut app, KeyCode::Char('r')),
            KeyOutcome::Dispatch(Request::Load { .. })
        ));
        assert!(app.inflight.is_loading());
    }

    #[test]
    fn test_handle_add_task() {
        let mut app = create_test_app();

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.ui_mode(), UiMode::Form);

        press(&mut app, KeyCode::Char('N'));
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('w'));

        let ticket = match press(&mut app, KeyCode::Enter) {
            KeyOutcome::Dispatch(Request::Create { ticket, task }) => {
                assert_eq!(task.title, "New");
                assert_eq!(task.deadline, now().with_timezone(&Utc));
                ticket
            }
            other => panic!("unexpected {:?}", other),
        };

        // Letters go to the title, not to normal-mode commands
        assert_eq!(app.filter, FilterMode::All);

        let created = Task {
            id: TaskId::Number(3),
            title: "New".to_string(),
            description: None,
            completed: false,
            deadline: now().with_timezone(&Utc),
            extra: Default::default(),
        };
        app.apply(Completion::Created { ticket, result: Ok(created) });
        assert_eq!(app.store.len(), 3);
        assert_eq!(app.ui_mode(), UiMode::Normal);
    }

    #[test]
    fn test_handle_empty_title_shows_notice() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));

        assert_eq!(press(&mut app, KeyCode::Enter), KeyOutcome::Continue);
        assert_eq!(app.ui_mode(), UiMode::Notice);
        assert_eq!(app.notice.as_ref().unwrap().kind, NoticeKind::Validation);

        // Other keys are swallowed until the notice is dismissed
        assert_eq!(press(&mut app, KeyCode::Char('q')), KeyOutcome::Continue);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui_mode(), UiMode::Form);
    }

    #[test]
    fn test_handle_escape_cancels_form() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('e'));
        assert!(app.session.is_editing());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode(), UiMode::Normal);
        assert!(!app.session.is_active());
    }

    #[test]
    fn test_handle_picker_flow() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.form_field, FormField::Deadline);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui_mode(), UiMode::Picker);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.picker.step(), PickerStep::AwaitingTime { .. }));

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui_mode(), UiMode::Form);

        let staged = app.session.draft().unwrap().deadline.unwrap();
        assert_eq!(
            staged.naive_local(),
            NaiveDate::from_ymd_opt(2024, 1, 9).unwrap().and_hms_opt(10, 20, 0).unwrap()
        );
    }

    #[test]
    fn test_handle_edit_completed_checkbox() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.form_field, FormField::Completed);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.session.draft().unwrap().completed);
        assert_eq!(app.session.draft().unwrap().title, "Test task");
    }

    #[test]
    fn test_handle_help_toggle() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.ui_mode(), UiMode::Help);

        // Navigation is inert under the help overlay
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_index, 0);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode(), UiMode::Normal);
    }
}
