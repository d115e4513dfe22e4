use crate::app::AppState;
use crate::domain::{format_local, FormField};
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the add/edit form
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(draft) = app.session.draft() else {
        return;
    };
    let editing = app.session.is_editing();
    let theme = app.theme;
    let active = |field: FormField| app.form_field == field;

    let modal_area = create_modal_area(area, if editing { 14 } else { 11 });

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let label = |text: &str, field: FormField| {
        if active(field) {
            Line::styled(format!("{} (editing)", text), modal_title_style(theme))
        } else {
            Line::raw(text.to_string())
        }
    };

    let mut lines = Vec::new();

    // Title field
    lines.push(Line::raw(""));
    lines.push(label("Title:", FormField::Title));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(draft.title.clone(), modal_title_style(theme)),
        if active(FormField::Title) {
            Span::styled("█", modal_title_style(theme))
        } else {
            Span::raw("")
        },
    ]));
    lines.push(Line::raw(""));

    // Deadline field
    lines.push(label("Deadline:", FormField::Deadline));
    let deadline = draft
        .deadline
        .map(format_local)
        .unwrap_or_else(|| "(none, press Enter to pick)".to_string());
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(deadline, modal_title_style(theme)),
    ]));

    // Completed checkbox, only on existing tasks
    if editing {
        lines.push(Line::raw(""));
        lines.push(label("Completed:", FormField::Completed));
        let checkbox = if draft.completed { "[x] done" } else { "[ ] not done" };
        lines.push(Line::from(vec![Span::raw("> "), Span::raw(checkbox)]));
    }

    lines.push(Line::raw(""));
    let button = if editing { "[ Save Changes ]" } else { "[ Add Task ]" };
    let button_style = if app.submitting.is_some() {
        hint_style(theme)
    } else {
        modal_title_style(theme).add_modifier(Modifier::REVERSED)
    };
    let mut footer = vec![Span::styled(button, button_style)];
    if app.submitting.is_some() {
        footer.push(Span::styled("  saving…", hint_style(theme)));
    }
    lines.push(Line::from(footer));

    let title = if editing { " Edit Task " } else { " Add Task " };
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style(theme)))
                .style(modal_bg_style(theme)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
