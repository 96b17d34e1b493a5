use super::{centered_rect, render_input};
use crate::state::{TaskField, TaskForm};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use taskboard_core::User;

/// New-task overlay; choice fields show their value between arrows
pub fn render(frame: &mut Frame, form: &TaskForm, assignees: &[User], area: Rect) {
    let popup = centered_rect(60, 14, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" New task ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let pairs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)]);
    let choice_row = pairs.split(rows[1]);

    render_input(frame, rows[0], &form.title, " Title ", form.focus == TaskField::Title);
    render_choice(frame, choice_row[0], TaskField::Priority, &form.priority.to_string(), form);
    render_choice(frame, choice_row[1], TaskField::Category, &form.category.to_string(), form);
    render_input(frame, rows[2], &form.due, " Due (YYYY-MM-DD) ", form.focus == TaskField::Due);
    render_choice(frame, rows[3], TaskField::Assignee, &form.assignee_label(assignees), form);
}

fn render_choice(frame: &mut Frame, area: Rect, field: TaskField, value: &str, form: &TaskForm) {
    let focused = form.focus == field;
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let text = if focused {
        format!("◀ {} ▶", value)
    } else {
        value.to_string()
    };
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", field.label())),
        ),
        area,
    );
}
