use std::cmp::{max, min};

use crate::models::{Rgb, STATIC_TASK};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Cell, Padding, Row, Table, TableState},
};
use ratatui_macros::span;

/// One row per catalog entry. The row order is the catalog order; the
/// active row carries a `[*]` marker and only ever changes when a
/// fresh TaskState is applied. The `static` row shows its color.
pub struct TaskList {
    tasks: Vec<String>,
    active: Option<String>,
    static_color: Rgb,
    state: TableState,
}

impl TaskList {
    pub fn new(tasks: Vec<String>) -> TaskList {
        TaskList {
            tasks,
            active: None,
            static_color: Rgb::default(),
            state: TableState::default().with_selected(0),
        }
    }

    /// `None` leaves no row marked active.
    pub fn set_active(&mut self, task: Option<&str>) {
        self.active = task.map(|t| t.to_string());
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn set_static_color(&mut self, color: Rgb) {
        self.static_color = color;
    }

    pub fn static_color(&self) -> Rgb {
        self.static_color
    }

    pub fn selected(&self) -> Option<&str> {
        self.tasks
            .get(self.state.selected().unwrap_or(0))
            .map(|t| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn next_row(&mut self) {
        let i = match self.state.selected() {
            Some(i) => max(min(self.tasks.len() as i32 - 1, i as i32 + 1), 0),
            None => 0,
        } as usize;

        self.state.select(Some(i));
    }

    pub fn prev_row(&mut self) {
        let i = match self.state.selected() {
            Some(i) => max(0, (i as i32) - 1),
            None => 0,
        } as usize;

        self.state.select(Some(i));
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let instructions = vec![
            " ".into(),
            span!("j/k").green().bold(),
            span!(" to move, ").white(),
            span!("Enter").green().bold(),
            span!(" to run ").white(),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightBlue))
            .padding(Padding::symmetric(1, 0))
            .title(Line::from(" Tasks ").bold())
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(instructions));

        let selected_row_style = Style::default()
            .add_modifier(Modifier::REVERSED)
            .add_modifier(Modifier::BOLD);
        let rows = build_rows(&self.tasks, self.active.as_deref(), self.static_color);
        let table = Table::new(rows, [Constraint::Fill(1)])
            .block(block)
            .row_highlight_style(selected_row_style);
        f.render_stateful_widget(table, area, &mut self.state);
    }
}

fn build_rows<'a>(tasks: &'a [String], active: Option<&str>, static_color: Rgb) -> Vec<Row<'a>> {
    tasks
        .iter()
        .map(|task| {
            let current = Some(task.as_str()) == active;
            let mut style = Style::default();
            let mut marker = "[ ]";
            if current {
                style = style.add_modifier(Modifier::BOLD).green();
                marker = "[*]";
            }

            let mut spans = vec![
                Span::styled(marker, style),
                Span::styled(" ", Style::default()),
                Span::styled(task, Style::default()),
            ];

            if task == STATIC_TASK {
                let Rgb(r, g, b) = static_color;
                spans.push(Span::styled("  ", Style::default()));
                spans.push(Span::styled(
                    static_color.to_hex(),
                    Style::default().fg(Color::Rgb(r, g, b)),
                ));
            }

            Row::new(vec![Cell::from(Text::from(Line::from(spans)))]).height(1)
        })
        .collect()
}
