use std::sync::Arc;

use tokio::sync::mpsc;
use tui_textarea::Input;

use super::{AlarmStatus, TaskState};

#[derive(Debug)]
pub enum Event {
    Notice(crate::models::NoticeMessage),

    /// Fresh authoritative alarm state, from a periodic read or a
    /// write-then-resync cycle.
    AlarmSynced(AlarmStatus),
    /// Fresh authoritative task state.
    TaskSynced(TaskState),

    KeyboardCharInput(Input),
    KeyboardEsc,
    KeyboardEnter,
    KeyboardCtrlC,

    Quit,

    UiTick,
    UiScrollUp,
    UiScrollDown,
}

#[async_trait::async_trait]
pub trait EventTx {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>>;
}

#[async_trait::async_trait]
impl EventTx for mpsc::Sender<Event> {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(event).await
    }
}

#[async_trait::async_trait]
impl EventTx for mpsc::UnboundedSender<Event> {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(event)
    }
}

pub type ArcEventTx = Arc<dyn EventTx + Send + Sync>;
