use crate::app::AppState;
use crate::domain::{completion_box, filter_counts, format_deadline, FilterMode, Task, Theme};
use crate::ui::styles::{
    active_tab_style, border_style, deadline_style, default_style, done_style, hint_style,
    pending_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the header: filter tabs with counts, then status
pub fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let counts = filter_counts(app.store.tasks());
    let mut spans = vec![Span::styled(" Todos ", title_style(app.theme))];

    for (i, mode) in FilterMode::all().iter().enumerate() {
        let label = format!(" {} {} ({}) ", i + 1, mode.label(), counts.get(*mode));
        let style = if *mode == app.filter {
            active_tab_style(app.theme)
        } else {
            hint_style(app.theme)
        };
        spans.push(Span::styled(label, style));
    }

    spans.push(Span::styled(format!("  {} ", app.theme.name()), hint_style(app.theme)));
    if let Some(status) = status_text(app) {
        spans.push(Span::styled(status, pending_style()));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(default_style(app.theme)),
        area,
    );
}

/// Busy indicator, if anything is in flight
fn status_text(app: &AppState) -> Option<String> {
    if !app.is_busy() {
        None
    } else if app.inflight.is_loading() {
        Some(" loading…".to_string())
    } else if app.submitting.is_some() {
        Some(" saving…".to_string())
    } else {
        Some(format!(" syncing {}…", app.inflight.pending_count()))
    }
}

/// Render the task list under the active filter
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let visible = app.visible_tasks();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app.theme))
        .title(Span::styled(
            format!(" {} ", app.filter.label()),
            title_style(app.theme),
        ))
        .style(default_style(app.theme));

    if visible.is_empty() {
        let message = if app.inflight.is_loading() {
            Span::styled("  Loading tasks…", hint_style(app.theme))
        } else if app.store.is_empty() {
            Span::styled("  No tasks yet. Press 'a' to add one.", hint_style(app.theme))
        } else {
            Span::styled("  Nothing matches this filter.", hint_style(app.theme))
        };
        f.render_widget(Paragraph::new(Line::from(message)).block(block), area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|task| {
            let pending = app.inflight.is_pending(&task.id);
            ListItem::new(create_task_line(task, pending, app.theme))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(selected_style(app.theme));

    let mut state = ListState::default().with_selected(Some(app.selected_index));
    f.render_stateful_widget(list, area, &mut state);
}

/// Create a single line for a task
/// Format: [x] Buy milk            Mon 01 Jan 2024 10:00 ⟳
fn create_task_line(task: &Task, pending: bool, theme: Theme) -> Line<'static> {
    let mut spans = Vec::new();

    spans.push(Span::raw(format!(" {} ", completion_box(task))));

    let title_style = if task.completed {
        done_style(theme)
    } else {
        default_style(theme)
    };
    spans.push(Span::styled(task.title.clone(), title_style));

    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        spans.push(Span::styled(format!(" · {}", description), hint_style(theme)));
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled(format_deadline(task.deadline), deadline_style(theme)));

    if pending {
        spans.push(Span::styled(" ⟳", pending_style()));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskId;
    use chrono::{TimeZone, Utc};

    fn task(completed: bool) -> Task {
        Task {
            id: TaskId::Number(1),
            title: "Test task".to_string(),
            description: None,
            completed,
            deadline: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            extra: Default::default(),
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_create_task_line() {
        let line = create_task_line(&task(false), false, Theme::Light);
        let rendered = text(&line);

        assert!(rendered.contains("[ ]"));
        assert!(rendered.contains("Test task"));
        assert!(rendered.contains(&format_deadline(task(false).deadline)));
        assert!(!rendered.contains('⟳'));
    }

    #[test]
    fn test_completed_line_is_struck_through() {
        let line = create_task_line(&task(true), true, Theme::Dark);

        assert!(text(&line).contains("[x]"));
        assert!(text(&line).ends_with('⟳'));
        assert_eq!(line.spans[1].style, done_style(Theme::Dark));
    }

    #[test]
    fn test_status_text_follows_requests() {
        let mut app = AppState::new(Theme::Light, true);
        assert_eq!(status_text(&app), None);

        app.inflight.begin_task(&TaskId::Number(1));
        assert_eq!(status_text(&app).as_deref(), Some(" syncing 1…"));

        app.request_load();
        assert_eq!(status_text(&app).as_deref(), Some(" loading…"));
    }
}
