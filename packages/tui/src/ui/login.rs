use super::{centered_rect, render_input};
use crate::app::App;
use crate::state::{RegisterField, RegisterForm};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Login section: username field and a hint about demo accounts
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let card = centered_rect(50, 11, area);
    let block = Block::default()
        .title(" Taskboard ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new("Log in with any username. New names get an account.")
            .style(Style::default().fg(Color::Gray)),
        rows[0],
    );
    render_input(
        frame,
        rows[1],
        &app.ui.username_input,
        " Username ",
        app.ui.username_focused && app.ui.register.is_none(),
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Demo accounts: "),
            Span::styled("demo", Style::default().fg(Color::Yellow)),
            Span::raw(", "),
            Span::styled("budi", Style::default().fg(Color::Yellow)),
        ])),
        rows[2],
    );
}

/// Registration overlay drawn over whatever screen is active
pub fn render_register(frame: &mut Frame, form: &RegisterForm, area: Rect) {
    let popup = centered_rect(56, 13, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Register ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    for (row, field) in rows.iter().zip(RegisterField::ALL) {
        let title = format!(" {} ", field.label());
        render_input(frame, *row, form.input(field), &title, form.focus == field);
    }
}
