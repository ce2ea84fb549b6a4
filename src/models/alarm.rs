#[cfg(test)]
#[path = "alarm_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

/// Day identifiers as the device API spells them.
pub const WEEKDAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmState {
    pub time: String,
    pub enabled: bool,
    #[serde(default)]
    pub days: Vec<String>,
}

impl AlarmState {
    pub fn has_day(&self, day: &str) -> bool {
        self.days.iter().any(|d| d == day)
    }

    /// Adds or removes a day, keeping `days` in weekday order.
    pub fn toggle_day(&mut self, day: &str) {
        if let Some(pos) = self.days.iter().position(|d| d == day) {
            self.days.remove(pos);
            return;
        }
        self.days.push(day.to_string());
        self.days
            .sort_by_key(|d| WEEKDAYS.iter().position(|w| w == d).unwrap_or(WEEKDAYS.len()));
    }
}

impl Default for AlarmState {
    fn default() -> Self {
        // The device falls back to this alarm when it has never been set
        Self {
            time: "06:30".to_string(),
            enabled: true,
            days: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeUntil {
    // The device reports fractional seconds
    pub time_until_alarm: f64,
}

/// The GET /api/v1/alarm response: the alarm record paired with the
/// seconds remaining until it next fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmStatus(pub AlarmState, pub TimeUntil);

impl AlarmStatus {
    pub fn state(&self) -> &AlarmState {
        &self.0
    }

    pub fn seconds_until(&self) -> u64 {
        self.1.time_until_alarm.max(0.0) as u64
    }

    /// The headline label: `6:30am (in 7 hours 52 minutes)`, or
    /// `Disabled` when the alarm is off.
    pub fn summary(&self) -> String {
        if !self.state().enabled {
            return "Disabled".to_string();
        }
        format!(
            "{} ({})",
            format_alarm_time(&self.state().time),
            format_time_until(self.seconds_until())
        )
    }
}

/// Renders a 24-hour `HH:MM` string as a 12-hour label. The minute
/// part is passed through untouched. Unparsable input is returned
/// as-is; this is a display helper, not a validator.
pub fn format_alarm_time(time: &str) -> String {
    let Some((hour, minute)) = time.split_once(':') else {
        return time.to_string();
    };
    let Ok(hour) = hour.parse::<u32>() else {
        return time.to_string();
    };
    let suffix = if hour < 12 { "am" } else { "pm" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{}{}", hour, minute, suffix)
}

/// `3661` becomes `in 1 hours 1 minutes`. No pluralization, matching
/// the device's own status page wording.
pub fn format_time_until(seconds: u64) -> String {
    format!(
        "in {} hours {} minutes",
        seconds / 3600,
        (seconds % 3600) / 60
    )
}
