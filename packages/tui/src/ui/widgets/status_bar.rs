use crate::state::{MainFocus, UiState};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// One-line footer: mode, location, and the shortcuts that apply right now
pub struct StatusBarWidget<'a> {
    ui: &'a UiState,
    username: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(ui: &'a UiState, username: Option<&'a str>) -> Self {
        Self { ui, username }
    }

    /// Mode indicator, only while a text field has focus
    fn mode(&self) -> Option<(&'static str, Style)> {
        if self.ui.register.is_some() {
            return Some(("FORM", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)));
        }
        if self.ui.task_form.is_some() {
            return Some(("NEW", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)));
        }
        if !self.ui.main_visible {
            return None;
        }
        match self.ui.focus {
            MainFocus::Tasks => None,
            MainFocus::Search => Some((
                "SEARCH",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )),
            MainFocus::QuickAdd => Some((
                "ADD",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
        }
    }

    fn breadcrumb(&self) -> String {
        match (self.ui.main_visible, self.username) {
            (true, Some(name)) => format!(" Tasks • {} • sort {}", name, self.ui.current_sort()),
            (true, None) => " Tasks".to_string(),
            (false, _) if self.ui.register.is_some() => " Register".to_string(),
            (false, _) => " Login".to_string(),
        }
    }

    pub fn shortcuts(&self) -> &'static str {
        if self.ui.confirmation.is_some() {
            return "Tab: Switch • Enter: Choose • Esc: Cancel";
        }
        if self.ui.register.is_some() {
            return "Tab/↓: Next • ↑: Previous • Enter: Register • Esc: Close";
        }
        if self.ui.task_form.is_some() {
            return "Tab/↓: Next • ↑: Previous • ←→: Change • Enter: Create • Esc: Close";
        }
        if !self.ui.main_visible {
            return "Enter: Login • Tab: Register • Esc: Quit";
        }
        match self.ui.focus {
            MainFocus::Search => "Type to search • Enter/Esc: Done",
            MainFocus::QuickAdd => "Enter: Add • Esc: Cancel",
            MainFocus::Tasks => {
                "↑↓ Select • Space Status • a Add • n New • d Del • / Search • 1-8 Filter • c Cat • s Sort • o Overdue • e Export • r Refresh • X Clear • L Logout • q Quit"
            }
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mode = self.mode();
        let shortcuts = self.shortcuts();
        let shortcuts_width = (shortcuts.chars().count() as u16).min(area.width / 2 + area.width / 4);

        let mut constraints = Vec::with_capacity(3);
        if let Some((text, _)) = mode {
            constraints.push(Constraint::Length(text.len() as u16 + 2));
        }
        constraints.push(Constraint::Min(10));
        constraints.push(Constraint::Length(shortcuts_width));

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        let mut next = 0;
        if let Some((text, style)) = mode {
            Paragraph::new(format!(" {} ", text))
                .style(style)
                .render(chunks[next], buf);
            next += 1;
        }

        Paragraph::new(self.breadcrumb())
            .style(Style::default().fg(Color::Gray))
            .render(chunks[next], buf);

        Paragraph::new(shortcuts)
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[next + 1], buf);
    }
}
