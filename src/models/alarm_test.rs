use super::*;

#[test]
fn test_format_alarm_time() {
    assert_eq!(format_alarm_time("00:05"), "12:05am");
    assert_eq!(format_alarm_time("01:07"), "1:07am");
    assert_eq!(format_alarm_time("11:59"), "11:59am");
    assert_eq!(format_alarm_time("12:00"), "12:00pm");
    assert_eq!(format_alarm_time("13:30"), "1:30pm");
    assert_eq!(format_alarm_time("23:45"), "11:45pm");
}

#[test]
fn test_format_alarm_time_passes_through_garbage() {
    assert_eq!(format_alarm_time("soon"), "soon");
    assert_eq!(format_alarm_time("ab:30"), "ab:30");
}

#[test]
fn test_format_time_until() {
    assert_eq!(format_time_until(3661), "in 1 hours 1 minutes");
    assert_eq!(format_time_until(59), "in 0 hours 0 minutes");
    assert_eq!(format_time_until(7200), "in 2 hours 0 minutes");
    assert_eq!(format_time_until(0), "in 0 hours 0 minutes");
}

#[test]
fn test_alarm_status_summary() {
    let status = AlarmStatus(
        AlarmState {
            time: "06:30".to_string(),
            enabled: true,
            days: vec![],
        },
        TimeUntil {
            time_until_alarm: 3725.4,
        },
    );
    assert_eq!(status.summary(), "6:30am (in 1 hours 2 minutes)");

    let disabled = AlarmStatus(
        AlarmState {
            time: "06:30".to_string(),
            enabled: false,
            days: vec![],
        },
        TimeUntil {
            time_until_alarm: 10.0,
        },
    );
    assert_eq!(disabled.summary(), "Disabled");
}

#[test]
fn test_alarm_status_decodes_two_element_array() {
    let body = r#"[{"time":"07:15","enabled":true,"days":["mon","fri"]},{"time_until_alarm":1234.5}]"#;
    let status: AlarmStatus = serde_json::from_str(body).expect("failed to decode alarm status");
    assert_eq!(status.state().time, "07:15");
    assert_eq!(status.state().days, vec!["mon", "fri"]);
    assert_eq!(status.seconds_until(), 1234);
}

#[test]
fn test_alarm_status_tolerates_missing_days() {
    let body = r#"[{"time":"07:15","enabled":false},{"time_until_alarm":0}]"#;
    let status: AlarmStatus = serde_json::from_str(body).expect("failed to decode alarm status");
    assert!(status.state().days.is_empty());
}

#[test]
fn test_toggle_day_keeps_weekday_order() {
    let mut alarm = AlarmState {
        time: "06:30".to_string(),
        enabled: true,
        days: vec!["mon".to_string(), "sun".to_string()],
    };

    alarm.toggle_day("wed");
    assert_eq!(alarm.days, vec!["mon", "wed", "sun"]);

    alarm.toggle_day("mon");
    assert_eq!(alarm.days, vec!["wed", "sun"]);
    assert!(!alarm.has_day("mon"));
}
