pub mod action;
pub mod alarm;
pub mod event;
pub mod notice;
pub mod task;

pub use action::Action;
pub use alarm::{AlarmState, AlarmStatus, TimeUntil, WEEKDAYS, format_alarm_time, format_time_until};
pub use event::{ArcEventTx, Event, EventTx};
pub use notice::*;
pub use task::{Rgb, STATIC_TASK, TaskRequest, TaskState};
