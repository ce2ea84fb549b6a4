pub mod http;

pub use http::HttpDevice;

#[cfg(test)]
use mockall::{automock, predicate::*};

use crate::models::{AlarmState, AlarmStatus, TaskRequest, TaskState};
use async_trait::async_trait;
use eyre::Result;
use std::sync::Arc;

/// The device API surface the client depends on. Mocked in service
/// tests; implemented over HTTP by [`HttpDevice`].
#[async_trait]
#[cfg_attr(test, automock)]
pub trait Device {
    fn name(&self) -> &str;

    async fn get_alarm(&self) -> Result<AlarmStatus>;
    async fn set_alarm(&self, alarm: &AlarmState) -> Result<()>;

    async fn get_task(&self) -> Result<TaskState>;
    async fn set_task(&self, req: &TaskRequest) -> Result<()>;

    /// Fetched once at startup; defines which task controls exist.
    async fn list_tasks(&self) -> Result<Vec<String>>;
}

pub type ArcDevice = Arc<dyn Device + Send + Sync>;
