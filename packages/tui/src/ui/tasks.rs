use super::render_input;
use crate::app::App;
use crate::state::{MainFocus, FILTER_BUTTONS};
use crate::view::ViewModel;
use chrono::Local;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use strum::IntoEnumIterator;
use taskboard_core::{Task, TaskCategory, TaskPriority, TaskStatus};

/// Main content: header, filter bar, search, task list and side panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let model = app.view().model();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(area);

    render_header(frame, app, rows[0]);
    render_filter_bar(frame, app, rows[1]);
    render_inputs(frame, app, rows[2]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(30)])
        .split(rows[3]);
    render_task_list(frame, model, body[0]);
    render_side_panel(frame, model, body[1]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    if !app.ui.user_info_visible {
        return;
    }
    let line = Line::from(vec![
        Span::styled(
            app.ui.welcome.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   (L to log out)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn button<'a>(label: String, active: bool) -> Span<'a> {
    if active {
        Span::styled(
            format!("[{}]", label),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!(" {} ", label), Style::default().fg(Color::Gray))
    }
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bar = &app.ui.filter_bar;

    let mut filters = vec![Span::raw("Filter: ")];
    for (i, value) in FILTER_BUTTONS.iter().enumerate() {
        filters.push(button(format!("{} {}", i + 1, value), bar.active_filter() == Some(*value)));
    }

    let mut categories = vec![Span::raw("Category (c): ")];
    for category in TaskCategory::iter() {
        categories.push(button(category.to_string(), bar.active_category() == Some(category)));
    }

    frame.render_widget(
        Paragraph::new(vec![Line::from(filters), Line::from(categories)]),
        area,
    );
}

fn render_inputs(frame: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_input(
        frame,
        cols[0],
        &app.ui.search_input,
        " Search (/) ",
        app.ui.focus == MainFocus::Search,
    );
    render_input(
        frame,
        cols[1],
        &app.ui.quick_add_input,
        " New task (a) ",
        app.ui.focus == MainFocus::QuickAdd,
    );
}

fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::Urgent => Color::Red,
        TaskPriority::High => Color::LightRed,
        TaskPriority::Medium => Color::Yellow,
        TaskPriority::Low => Color::Green,
    }
}

fn status_marker(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "[ ]",
        TaskStatus::InProgress => "[~]",
        TaskStatus::Completed => "[x]",
    }
}

fn task_item<'a>(task: &'a Task, today: chrono::NaiveDate) -> ListItem<'a> {
    let mut spans = vec![
        Span::raw(format!("{} ", status_marker(task.status))),
        Span::styled(
            format!("{:<7}", task.priority.as_ref()),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::raw(" "),
    ];

    let title_style = if task.is_completed() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    spans.push(Span::styled(task.title.as_str(), title_style));
    spans.push(Span::styled(
        format!("  #{}", task.category),
        Style::default().fg(Color::Blue),
    ));

    if let Some(due) = task.due_date {
        let style = if task.is_overdue(today) {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("  due {}", due), style));
    }

    ListItem::new(Line::from(spans))
}

fn render_task_list(frame: &mut Frame, model: &ViewModel, area: Rect) {
    let today = Local::now().date_naive();
    let title = format!(" Tasks ({}) ", model.tasks.len());
    let block = Block::default().title(title).borders(Borders::ALL);

    if model.tasks.is_empty() {
        let empty = Paragraph::new("No tasks here. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = model.tasks.iter().map(|t| task_item(t, today)).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(model.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_side_panel(frame: &mut Frame, model: &ViewModel, area: Rect) {
    let stats = &model.stats;
    let mut lines = vec![
        Line::from(Span::styled("Stats", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!("Total:       {}", stats.total)),
        Line::from(format!("Pending:     {}", stats.pending)),
        Line::from(format!("In progress: {}", stats.in_progress)),
        Line::from(format!("Completed:   {}", stats.completed)),
        Line::from(Span::styled(
            format!("Overdue:     {}", stats.overdue),
            Style::default().fg(if stats.overdue > 0 { Color::Red } else { Color::Reset }),
        )),
        Line::from(format!("Done:        {}%", stats.completion_rate())),
        Line::raw(""),
        Line::from(Span::styled("Team", Style::default().add_modifier(Modifier::BOLD))),
    ];

    if model.assignees.is_empty() {
        lines.push(Line::from(Span::styled(
            "(nobody else yet)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for user in &model.assignees {
        lines.push(Line::from(format!("• {}", user.display_name())));
    }

    if let Some(at) = model.last_refresh {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("Updated {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        area,
    );
}
