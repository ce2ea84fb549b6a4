use super::{AlarmState, TaskRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Force an immediate alarm re-read.
    RefreshAlarm,
    /// Force an immediate task re-read.
    RefreshTask,

    /// Write the full desired alarm record, then re-read it.
    SubmitAlarm(AlarmState),
    /// Write the desired task (superseding any in-flight task write),
    /// then re-read it.
    SubmitTask(TaskRequest),

    /// Sent by a finished write worker to re-arm the periodic timer.
    /// Carries the write sequence number so a superseded worker's
    /// resume cannot un-pause the timer under a newer write.
    ResumeAlarmRefresh(u64),
    ResumeTaskRefresh(u64),
}
