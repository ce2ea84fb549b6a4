#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

use std::io;

use crate::models::{
    Action, AlarmState, AlarmStatus, Event, Rgb, STATIC_TASK, TaskRequest, TaskState, WEEKDAYS,
};
use chrono::NaiveTime;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use eyre::Result;
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    layout::{Alignment, Constraint, Direction, Layout},
    prelude::{Backend, CrosstermBackend},
    widgets::Paragraph,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tui_textarea::Key;

use crate::app::app_state::AppState;
use crate::app::ui::{AlarmPanel, HelpLine, InputBox, Notice, TaskList, input_box, utils};

use super::services::EventService;

const MIN_WIDTH: u16 = 60;

pub struct InitProps {
    pub alarm: AlarmStatus,
    pub task: TaskState,
    pub catalog: Vec<String>,
}

pub struct App<'a> {
    action_tx: mpsc::UnboundedSender<Action>,
    event_tx: mpsc::UnboundedSender<Event>,

    events: &'a mut EventService,

    app_state: AppState,
    task_list: TaskList,
    time_input: InputBox<'a>,
    color_input: InputBox<'a>,
    notice: Notice,

    cancel_token: CancellationToken,
}

impl<'a> App<'a> {
    pub fn new(
        action_tx: mpsc::UnboundedSender<Action>,
        events: &'a mut EventService,
        cancel_token: CancellationToken,
        init_props: InitProps,
    ) -> App<'a> {
        let event_tx = events.event_tx();

        let mut app_state = AppState::new();
        let mut task_list = TaskList::new(init_props.catalog);
        task_list.set_active(init_props.task.task.as_deref());
        app_state.set_alarm(init_props.alarm);
        app_state.set_task(init_props.task);

        App {
            action_tx,
            event_tx,
            events,
            app_state,
            task_list,
            time_input: InputBox::default()
                .with_title(" Alarm time ")
                .with_placeholder("HH:MM"),
            color_input: InputBox::default()
                .with_title(" Static color ")
                .with_placeholder("#rrggbb"),
            notice: Notice::default(),
            cancel_token,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let mut stdout = stdout.lock();

        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;

        let term_backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(term_backend)?;
        let result = self.start_loop(&mut terminal).await;

        self.cancel_token.cancel();

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

        terminal.show_cursor()?;
        result
    }

    async fn start_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.render(terminal)?;
            if self.handle_event().await {
                return Ok(());
            }
        }
    }

    async fn handle_event(&mut self) -> bool {
        let event = self.events.next().await;

        if let Some(quit) = self.handle_global_event(&event) {
            return quit;
        }

        if self.time_input.showing() {
            self.handle_time_input_event(&event);
            return false;
        }

        if self.color_input.showing() {
            self.handle_color_input_event(&event);
            return false;
        }

        self.handle_main_event(&event);
        false
    }

    fn handle_global_event(&mut self, event: &Event) -> Option<bool> {
        match event {
            Event::Quit => Some(true),

            Event::AlarmSynced(status) => {
                self.app_state.set_alarm(status.clone());
                Some(false)
            }

            Event::TaskSynced(state) => {
                self.task_list.set_active(state.task.as_deref());
                self.app_state.set_task(state.clone());
                Some(false)
            }

            Event::Notice(msg) => {
                self.notice.add_message(msg.clone());
                Some(false)
            }

            // Fallthrough to the focused handler
            _ => None,
        }
    }

    fn handle_main_event(&mut self, event: &Event) {
        match event {
            Event::KeyboardCtrlC => {
                let _ = self.event_tx.send(Event::Quit);
            }

            Event::KeyboardEnter => self.handle_select_task(),

            Event::UiScrollDown => self.task_list.next_row(),
            Event::UiScrollUp => self.task_list.prev_row(),

            Event::KeyboardCharInput(input) => match input.key {
                Key::Char('q') => {
                    let _ = self.event_tx.send(Event::Quit);
                }
                Key::Char('j') => self.task_list.next_row(),
                Key::Char('k') => self.task_list.prev_row(),
                Key::Char('t') => {
                    let current = self.app_state.alarm_state().time;
                    self.time_input.open(current);
                }
                Key::Char('e') => {
                    self.submit_alarm_edit(|alarm| alarm.enabled = !alarm.enabled);
                }
                Key::Char('r') => {
                    let _ = self.action_tx.send(Action::RefreshAlarm);
                    let _ = self.action_tx.send(Action::RefreshTask);
                }
                Key::Char(c @ '1'..='7') => {
                    let day = WEEKDAYS[c as usize - '1' as usize];
                    self.submit_alarm_edit(|alarm| alarm.toggle_day(day));
                }
                _ => {}
            },

            _ => {}
        }
    }

    fn handle_time_input_event(&mut self, event: &Event) {
        match event {
            Event::KeyboardEsc | Event::KeyboardCtrlC => {
                self.time_input.close();
            }

            Event::KeyboardEnter => {
                if let Some(text) = self.time_input.close() {
                    let text = text.trim().to_string();
                    // The device rejects anything strptime("%H:%M") rejects
                    match NaiveTime::parse_from_str(&text, "%H:%M") {
                        Ok(_) => self.submit_alarm_edit(move |alarm| alarm.time = text),
                        Err(_) => self
                            .notice
                            .error(format!("Invalid time \"{}\", expected HH:MM", text)),
                    }
                }
            }

            _ => self.time_input.handle_key_event(event),
        }
    }

    fn handle_color_input_event(&mut self, event: &Event) {
        match event {
            Event::KeyboardEsc | Event::KeyboardCtrlC | Event::KeyboardEnter => {
                self.color_input.close();
            }

            Event::KeyboardCharInput(_) => {
                let before = self.color_input.text();
                self.color_input.handle_key_event(event);
                // Every edit that forms a full color is sent right
                // away; ticks and no-op keys must not re-send it
                let after = self.color_input.text();
                if after != before {
                    if let Some(rgb) = Rgb::parse(after.trim()) {
                        self.task_list.set_static_color(rgb);
                        self.submit_static_color(rgb);
                    }
                }
            }

            _ => {}
        }
    }

    fn handle_select_task(&mut self) {
        let Some(task) = self.task_list.selected() else {
            return;
        };
        let task = task.to_string();

        if task == STATIC_TASK {
            // Opening the color control behaves like focusing it: the
            // current color is written once, then live edits follow
            let color = self.task_list.static_color();
            self.color_input.open(color.to_hex());
            self.submit_static_color(color);
            return;
        }

        let _ = self.action_tx.send(Action::SubmitTask(TaskRequest::new(task)));
    }

    fn submit_static_color(&mut self, color: Rgb) {
        let _ = self.action_tx.send(Action::SubmitTask(
            TaskRequest::new(STATIC_TASK).with_arg(color),
        ));
    }

    fn submit_alarm_edit(&mut self, edit: impl FnOnce(&mut AlarmState)) {
        if self.app_state.alarm.is_none() {
            self.notice.warning("Still waiting for the device...");
            return;
        }
        let mut alarm = self.app_state.alarm_state();
        edit(&mut alarm);
        let _ = self.action_tx.send(Action::SubmitAlarm(alarm));
    }

    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|f| {
            let current_width = f.area().width;
            if current_width < MIN_WIDTH {
                f.render_widget(
                    Paragraph::new(format!(
                        "I'm too small, make me bigger! I need at least {} cells (current: {})",
                        MIN_WIDTH, current_width
                    ))
                    .alignment(Alignment::Left),
                    f.area(),
                );
                return;
            }

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(5),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .split(f.area());

            AlarmPanel::render(f, layout[0], self.app_state.alarm.as_ref());
            self.task_list.render(f, layout[1]);
            HelpLine::render(f, layout[2]);

            let input_area = input_box::build_area(f.area(), 30);
            self.time_input.render(f, input_area);
            self.color_input.render(f, input_area);

            self.notice.render(f, utils::notice_area(f.area(), 30));
        })?;
        Ok(())
    }
}
