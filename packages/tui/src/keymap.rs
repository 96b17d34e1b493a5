use crate::app::{App, UiEvent};
use crate::state::{MainFocus, UiState, FILTER_BUTTONS};
use crate::ui::widgets::DialogResult;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use strum::IntoEnumIterator;
use taskboard_core::TaskCategory;
use tui_input::backend::crossterm::EventHandler;

impl App {
    /// Translate a key press into field edits or a dispatched [`UiEvent`]
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.dispatch(UiEvent::Quit);
            return;
        }

        if let Some(dialog) = self.ui.confirmation.as_mut() {
            match dialog.handle_key(key.code) {
                DialogResult::Confirmed => self.dispatch(UiEvent::ClearAllConfirmed),
                DialogResult::Cancelled => self.dispatch(UiEvent::ClearAllCancelled),
                DialogResult::Pending => {}
            }
            return;
        }

        if self.ui.register.is_some() {
            self.register_key(key);
        } else if self.ui.task_form.is_some() {
            self.task_form_key(key);
        } else if self.ui.main_visible {
            self.main_key(key);
        } else if self.ui.login_visible {
            self.login_key(key);
        }
    }

    fn login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.dispatch(UiEvent::LoginSubmit),
            KeyCode::Tab => self.dispatch(UiEvent::OpenRegister),
            KeyCode::Esc => self.dispatch(UiEvent::Quit),
            _ => {
                self.ui.username_input.handle_event(&Event::Key(key));
            }
        }
    }

    fn register_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.dispatch(UiEvent::CloseRegister),
            KeyCode::Enter => self.dispatch(UiEvent::RegisterSubmit),
            _ => {
                let Some(form) = self.ui.register.as_mut() else {
                    return;
                };
                match key.code {
                    KeyCode::Tab | KeyCode::Down => form.next_field(),
                    KeyCode::BackTab | KeyCode::Up => form.previous_field(),
                    _ => {
                        form.focused_input_mut().handle_event(&Event::Key(key));
                    }
                }
            }
        }
    }

    fn task_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.dispatch(UiEvent::CloseTaskForm),
            KeyCode::Enter => self.dispatch(UiEvent::TaskFormSubmit),
            _ => {
                let assignees = self.view().model().assignees.len();
                let Some(form) = self.ui.task_form.as_mut() else {
                    return;
                };
                match key.code {
                    KeyCode::Tab | KeyCode::Down => form.next_field(),
                    KeyCode::BackTab | KeyCode::Up => form.previous_field(),
                    KeyCode::Right if !form.focus.is_text() => form.cycle(true, assignees),
                    KeyCode::Left if !form.focus.is_text() => form.cycle(false, assignees),
                    _ => {
                        if let Some(input) = form.focused_input_mut() {
                            input.handle_event(&Event::Key(key));
                        }
                    }
                }
            }
        }
    }

    fn main_key(&mut self, key: KeyEvent) {
        match self.ui.focus {
            MainFocus::Search => match key.code {
                KeyCode::Esc | KeyCode::Enter => self.ui.focus = MainFocus::Tasks,
                _ => {
                    let changed = self.ui.search_input.handle_event(&Event::Key(key));
                    if changed.is_some_and(|c| c.value) {
                        let text = self.ui.search_input.value().to_string();
                        self.dispatch(UiEvent::SearchInput(text));
                    }
                }
            },
            MainFocus::QuickAdd => match key.code {
                KeyCode::Esc => {
                    self.ui.quick_add_input.reset();
                    self.ui.focus = MainFocus::Tasks;
                }
                KeyCode::Enter => {
                    let title = self.ui.quick_add_input.value().to_string();
                    self.ui.quick_add_input.reset();
                    self.ui.focus = MainFocus::Tasks;
                    self.dispatch(UiEvent::QuickAdd(title));
                }
                _ => {
                    self.ui.quick_add_input.handle_event(&Event::Key(key));
                }
            },
            MainFocus::Tasks => {
                if let Some(event) = task_list_event(key, &mut self.ui) {
                    self.dispatch(event);
                }
            }
        }
    }
}

/// Shortcuts on the task list; focus changes are applied to `ui` directly
pub fn task_list_event(key: KeyEvent, ui: &mut UiState) -> Option<UiEvent> {
    let event = match key.code {
        KeyCode::Char('q') => UiEvent::Quit,
        KeyCode::Char('L') => UiEvent::Logout,
        KeyCode::Char('/') => {
            ui.focus = MainFocus::Search;
            return None;
        }
        KeyCode::Char('a') => {
            ui.focus = MainFocus::QuickAdd;
            return None;
        }
        KeyCode::Char('n') => UiEvent::OpenTaskForm,
        KeyCode::Up | KeyCode::Char('k') => UiEvent::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => UiEvent::SelectNext,
        KeyCode::Char(' ') => UiEvent::ToggleSelected,
        KeyCode::Char('d') => UiEvent::DeleteSelected,
        KeyCode::Char(c @ '1'..='8') => {
            let index = c as usize - '1' as usize;
            UiEvent::FilterSelected(FILTER_BUTTONS[index].to_string())
        }
        KeyCode::Char('c') => UiEvent::CategorySelected(next_category(ui.filter_bar.active_category())),
        KeyCode::Char('s') => UiEvent::SortChanged(ui.next_sort().to_string()),
        KeyCode::Char('o') => UiEvent::ShowOverdue,
        KeyCode::Char('e') => UiEvent::Export,
        KeyCode::Char('r') => UiEvent::Refresh,
        KeyCode::Char('X') => UiEvent::ClearAllRequested,
        _ => return None,
    };
    Some(event)
}

fn next_category(current: Option<TaskCategory>) -> TaskCategory {
    let all: Vec<TaskCategory> = TaskCategory::iter().collect();
    match current.and_then(|c| all.iter().position(|x| *x == c)) {
        Some(i) => all[(i + 1) % all.len()],
        None => all[0],
    }
}
