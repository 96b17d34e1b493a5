use crate::view::{MessageKind, Toast};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

const TOAST_WIDTH: u16 = 48;

/// Stack of recent messages in the top-right corner, newest last
pub struct ToastWidget<'a> {
    toasts: Vec<&'a Toast>,
}

impl<'a> ToastWidget<'a> {
    pub fn new(toasts: impl IntoIterator<Item = &'a Toast>) -> Self {
        Self {
            toasts: toasts.into_iter().collect(),
        }
    }

    fn color(kind: MessageKind) -> Color {
        match kind {
            MessageKind::Info => Color::Cyan,
            MessageKind::Success => Color::Green,
            MessageKind::Warning => Color::Yellow,
            MessageKind::Error => Color::Red,
        }
    }
}

impl<'a> Widget for ToastWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = TOAST_WIDTH.min(area.width);
        let mut y = area.y + 1;

        for toast in self.toasts {
            let lines = (toast.message.chars().count() as u16 / width.saturating_sub(2).max(1)) + 1;
            let height = lines + 2;
            if y + height > area.y + area.height {
                break;
            }
            let rect = Rect {
                x: area.x + area.width - width,
                y,
                width,
                height,
            };
            let color = Self::color(toast.kind);

            Clear.render(rect, buf);
            Paragraph::new(toast.message.as_str())
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color))
                        .title(Span::styled(
                            format!(" {} ", toast.kind),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        )),
                )
                .render(rect, buf);
            y += height;
        }
    }
}
