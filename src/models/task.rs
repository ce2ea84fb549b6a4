#[cfg(test)]
#[path = "task_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

/// The one catalog entry that takes a color argument.
pub const STATIC_TASK: &str = "static";

/// The GET /api/v1/task response. A freshly booted device has no
/// current task and reports `{"task": null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskState {
    pub task: Option<String>,
}

/// An RGB triple; serializes as the `[r, g, b]` array the device expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parses a `#RRGGBB` color. Returns None for anything else.
    pub fn parse(hex: &str) -> Option<Rgb> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Rgb(r, g, b))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb(255, 255, 255)
    }
}

/// Body of POST /api/v1/task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub task: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<Rgb>,
}

impl TaskRequest {
    pub fn new(task: impl Into<String>) -> TaskRequest {
        TaskRequest {
            task: task.into(),
            arg: None,
        }
    }

    pub fn with_arg(mut self, arg: Rgb) -> Self {
        self.arg = Some(arg);
        self
    }
}
