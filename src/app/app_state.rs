use crate::models::{AlarmState, AlarmStatus, TaskState};

/// The most recently synced device state. Only `AlarmSynced` and
/// `TaskSynced` events write here, so the screen can never show a
/// value that was not read back from the device.
pub(crate) struct AppState {
    pub alarm: Option<AlarmStatus>,
    pub task: Option<TaskState>,
}

impl AppState {
    pub fn new() -> AppState {
        AppState {
            alarm: None,
            task: None,
        }
    }

    pub fn set_alarm(&mut self, status: AlarmStatus) {
        self.alarm = Some(status);
    }

    pub fn set_task(&mut self, state: TaskState) {
        self.task = Some(state);
    }

    /// Editable copy of the last synced alarm, the base for a user edit.
    pub fn alarm_state(&self) -> AlarmState {
        self.alarm
            .as_ref()
            .map(|s| s.state().clone())
            .unwrap_or_default()
    }
}
