use crate::app::{AppState, NoticeKind};
use crate::domain::{PickerStep, Theme};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, hint_style, modal_bg_style, modal_title_style},
};
use chrono::{Datelike, Duration, NaiveDate};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn modal_block(title: &str, theme: Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", title), modal_title_style(theme)))
        .style(modal_bg_style(theme))
}

/// Render a validation or error notice
pub fn render_notice(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };
    let modal_area = create_modal_area(area, 8);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let message_style = match notice.kind {
        NoticeKind::Validation => modal_title_style(app.theme),
        NoticeKind::Error => error_style(),
    };
    let lines = vec![
        Line::raw(""),
        Line::styled(format!("  {}", notice.message), message_style),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [Enter]", modal_title_style(app.theme)),
            Span::raw(" OK"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(modal_block(&notice.title, app.theme))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, modal_area);
}

const HELP_ROWS: &[(&str, &str)] = &[
    ("↑/↓ or j/k", "Move selection"),
    ("Enter / Space", "Toggle completed"),
    ("a", "Add a task"),
    ("e", "Edit selected task"),
    ("d / Delete", "Delete selected task"),
    ("f", "Cycle filter"),
    ("1 / 2 / 3", "All / Completed / Pending"),
    ("t", "Toggle dark mode"),
    ("r", "Reload from server"),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];

/// Render the keyboard help overlay
pub fn render_help(f: &mut Frame, app: &AppState, area: Rect) {
    let modal_area = create_modal_area(area, HELP_ROWS.len() as u16 + 4);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    for (keys, action) in HELP_ROWS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<16}", keys), modal_title_style(app.theme)),
            Span::raw(*action),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(modal_block("Help", app.theme));
    f.render_widget(paragraph, modal_area);
}

/// Render the deadline picker on top of the form
pub fn render_picker(f: &mut Frame, app: &AppState, area: Rect) {
    match app.picker.step() {
        PickerStep::Closed => {}
        PickerStep::AwaitingDate { cursor } => {
            let modal_area = create_modal_area(area, 12);
            f.render_widget(Clear, modal_area);
            let mut lines = vec![Line::styled(
                format!("  {}", cursor.format("%B %Y")),
                modal_title_style(app.theme),
            )];
            lines.extend(month_grid(cursor, app.theme));
            f.render_widget(
                Paragraph::new(lines).block(modal_block("Pick a date", app.theme)),
                modal_area,
            );
        }
        PickerStep::AwaitingTime { cursor } => {
            let modal_area = create_modal_area(area, 6);
            f.render_widget(Clear, modal_area);
            let lines = vec![
                Line::raw(""),
                Line::from(vec![
                    Span::raw("  Time: "),
                    Span::styled(
                        cursor.format("%H:%M").to_string(),
                        modal_title_style(app.theme).add_modifier(Modifier::REVERSED),
                    ),
                ]),
                Line::styled("  Esc keeps the current time", hint_style(app.theme)),
            ];
            f.render_widget(
                Paragraph::new(lines).block(modal_block("Pick a time", app.theme)),
                modal_area,
            );
        }
    }
}

/// Calendar rows for the cursor's month, Monday first, cursor highlighted
fn month_grid(cursor: NaiveDate, theme: Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled("  Mo Tu We Th Fr Sa Su", hint_style(theme))];

    let first = cursor.with_day(1).unwrap_or(cursor);
    let offset = first.weekday().num_days_from_monday() as usize;
    let mut spans = vec![Span::raw("  "), Span::raw("   ".repeat(offset))];
    let mut column = offset;
    let mut day = first;

    while day.month() == cursor.month() {
        let text = format!("{:>2}", day.day());
        if day == cursor {
            spans.push(Span::styled(
                text,
                modal_title_style(theme).add_modifier(Modifier::REVERSED),
            ));
        } else {
            spans.push(Span::raw(text));
        }
        spans.push(Span::raw(" "));

        column += 1;
        if column == 7 {
            lines.push(Line::from(std::mem::take(&mut spans)));
            spans.push(Span::raw("  "));
            column = 0;
        }
        day += Duration::days(1);
    }
    if column > 0 {
        lines.push(Line::from(spans));
    }
    lines
}
