use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    Confirmed,
    Cancelled,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogFocus {
    Cancel,
    Confirm,
}

/// Yes/no prompt shown over the current screen
#[derive(Debug, Clone)]
pub struct ConfirmationDialog {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub dangerous: bool,
    pub focus: DialogFocus,
}

impl ConfirmationDialog {
    /// Cancel starts focused so a stray Enter does nothing harmful
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
            dangerous: false,
            focus: DialogFocus::Cancel,
        }
    }

    pub fn dangerous(mut self) -> Self {
        self.dangerous = true;
        self
    }

    pub fn with_buttons(mut self, confirm_text: impl Into<String>, cancel_text: impl Into<String>) -> Self {
        self.confirm_text = confirm_text.into();
        self.cancel_text = cancel_text.into();
        self
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            DialogFocus::Cancel => DialogFocus::Confirm,
            DialogFocus::Confirm => DialogFocus::Cancel,
        };
    }

    pub fn handle_key(&mut self, key: KeyCode) -> DialogResult {
        match key {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.toggle_focus();
                DialogResult::Pending
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                DialogFocus::Cancel => DialogResult::Cancelled,
                DialogFocus::Confirm => DialogResult::Confirmed,
            },
            KeyCode::Char('y') | KeyCode::Char('Y') => DialogResult::Confirmed,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => DialogResult::Cancelled,
            _ => DialogResult::Pending,
        }
    }
}

pub struct ConfirmationDialogWidget<'a> {
    dialog: &'a ConfirmationDialog,
}

impl<'a> ConfirmationDialogWidget<'a> {
    pub fn new(dialog: &'a ConfirmationDialog) -> Self {
        Self { dialog }
    }

    fn button_style(&self, focus: DialogFocus) -> Style {
        let focused = self.dialog.focus == focus;
        let accent = match (focus, self.dialog.dangerous) {
            (DialogFocus::Confirm, true) => Color::Red,
            (DialogFocus::Confirm, false) => Color::Green,
            (DialogFocus::Cancel, _) => Color::Blue,
        };
        if focused {
            Style::default()
                .bg(accent)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }
}

impl<'a> Widget for ConfirmationDialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (area.width / 3).max(44).min(area.width.saturating_sub(4));
        let height = 9.min(area.height.saturating_sub(2));
        let dialog_area = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };
        Clear.render(dialog_area, buf);

        let accent = if self.dialog.dangerous {
            Color::Red
        } else {
            Color::Yellow
        };
        let block = Block::default()
            .title(format!(" {} ", self.dialog.title))
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(2), Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        Paragraph::new(self.dialog.message.as_str())
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        let buttons = Line::from(vec![
            Span::styled(
                format!("[{}]", self.dialog.cancel_text),
                self.button_style(DialogFocus::Cancel),
            ),
            Span::raw("   "),
            Span::styled(
                format!("[{}]", self.dialog.confirm_text),
                self.button_style(DialogFocus::Confirm),
            ),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        Paragraph::new("Tab: Switch • Enter: Choose • y/n • Esc: Cancel")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}
