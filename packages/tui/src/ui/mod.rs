pub mod login;
pub mod task_form;
pub mod tasks;
pub mod widgets;

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use std::time::Instant;
use tui_input::Input;
use widgets::{ConfirmationDialogWidget, StatusBarWidget, ToastWidget};

/// Main UI rendering function
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());
    let main_area = chunks[0];
    let status_area = chunks[1];

    if app.ui.main_visible {
        tasks::render(frame, app, main_area);
    } else if app.ui.login_visible {
        login::render(frame, app, main_area);
    }

    if let Some(form) = &app.ui.task_form {
        task_form::render(frame, form, &app.view().model().assignees, main_area);
    }

    if let Some(form) = &app.ui.register {
        login::render_register(frame, form, main_area);
    }

    let username = app.current_user.as_ref().map(|u| u.username.as_str());
    frame.render_widget(StatusBarWidget::new(&app.ui, username), status_area);

    let toasts = app.view().model().live_toasts(Instant::now());
    frame.render_widget(ToastWidget::new(toasts), main_area);

    if let Some(dialog) = &app.ui.confirmation {
        frame.render_widget(ConfirmationDialogWidget::new(dialog), frame.area());
    }
}

/// Bordered single-line text field; places the cursor when focused
pub fn render_input(frame: &mut Frame, area: Rect, input: &Input, title: &str, focused: bool) {
    let inner_width = area.width.saturating_sub(3) as usize;
    let scroll = input.visual_scroll(inner_width);
    let border = if focused { Color::Yellow } else { Color::DarkGray };

    let paragraph = Paragraph::new(input.value())
        .scroll((0, scroll as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title.to_string()),
        );
    frame.render_widget(paragraph, area);

    if focused {
        let cursor = input.visual_cursor().max(scroll) - scroll;
        frame.set_cursor_position((area.x + cursor as u16 + 1, area.y + 1));
    }
}

/// Rectangle of `width` x `height` centered in `area`, clipped to it
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
