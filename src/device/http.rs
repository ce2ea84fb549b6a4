#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use crate::config::{DeviceConfig, constants::DEFAULT_ENDPOINT, user_agent};
use crate::device::Device;
use crate::models::{AlarmState, AlarmStatus, TaskRequest, TaskState};
use async_trait::async_trait;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, time};
use thiserror::Error;

pub struct HttpDevice {
    name: String,
    endpoint: String,
    auth_key: Option<String>,
    timeout: Option<time::Duration>,
}

#[async_trait]
impl Device for HttpDevice {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_alarm(&self) -> Result<AlarmStatus> {
        let res = self
            .get("/api/v1/alarm")
            .send()
            .await
            .wrap_err("fetching alarm")?;
        let res = check_response(res).await?;
        res.json::<AlarmStatus>()
            .await
            .wrap_err("parsing alarm response")
    }

    async fn set_alarm(&self, alarm: &AlarmState) -> Result<()> {
        let res = self
            .post("/api/v1/alarm")
            .json(alarm)
            .send()
            .await
            .wrap_err("sending alarm update")?;
        check_response(res).await?;
        Ok(())
    }

    async fn get_task(&self) -> Result<TaskState> {
        let res = self
            .get("/api/v1/task")
            .send()
            .await
            .wrap_err("fetching current task")?;
        let res = check_response(res).await?;
        res.json::<TaskState>()
            .await
            .wrap_err("parsing task response")
    }

    async fn set_task(&self, req: &TaskRequest) -> Result<()> {
        let res = self
            .post("/api/v1/task")
            .json(req)
            .send()
            .await
            .wrap_err("sending task update")?;
        check_response(res).await?;
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<String>> {
        let res = self
            .get("/api/v1/tasks")
            .send()
            .await
            .wrap_err("listing tasks")?;
        let res = check_response(res).await?;
        let res = res
            .json::<TaskListResponse>()
            .await
            .wrap_err("parsing task list response")?;
        Ok(res.tasks)
    }
}

impl HttpDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_auth_key(mut self, auth_key: &str) -> Self {
        self.auth_key = Some(auth_key.to_string());
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.prepare(reqwest::Client::new().get(format!("{}{}", self.endpoint, path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.prepare(
            reqwest::Client::new()
                .post(format!("{}{}", self.endpoint, path))
                .header("Content-Type", "application/json"),
        )
    }

    fn prepare(&self, mut req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req = req.header("User-Agent", user_agent());
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        if let Some(key) = &self.auth_key {
            req = req.bearer_auth(key);
        }
        req
    }
}

impl From<&DeviceConfig> for HttpDevice {
    fn from(value: &DeviceConfig) -> Self {
        let mut device = HttpDevice::default().with_endpoint(&value.endpoint);

        if let Some(auth_key) = &value.auth_key {
            device.auth_key = Some(auth_key.to_string());
        }

        if let Some(timeout) = value.timeout_secs {
            device.timeout = Some(time::Duration::from_secs(timeout as u64));
        }

        device
    }
}

impl Default for HttpDevice {
    fn default() -> Self {
        Self {
            name: "neocontrol".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            auth_key: None,
            timeout: None,
        }
    }
}

async fn check_response(res: reqwest::Response) -> Result<reqwest::Response> {
    if res.status().is_success() {
        return Ok(res);
    }

    let http_code = res.status().as_u16();
    let body = res.text().await.wrap_err("reading error response")?;
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    Err(DeviceError { http_code, message }.into())
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct TaskListResponse {
    tasks: Vec<String>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Default, Error, Debug)]
pub struct DeviceError {
    pub http_code: u16,
    pub message: String,
}

impl Display for DeviceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "device error ({}): {}", self.http_code, self.message)
    }
}
