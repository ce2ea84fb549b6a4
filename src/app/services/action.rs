#[cfg(test)]
#[path = "action_test.rs"]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use crate::device::ArcDevice;
use crate::models::{Action, AlarmState, ArcEventTx, Event, NoticeMessage, TaskRequest};
use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Owns all device traffic. Two independent interval timers re-read
/// alarm and task state; user edits arrive as [`Action`]s. A write
/// suspends its resource's timer, runs in a single-slot worker, and
/// re-reads authoritative state before the timer is re-armed, so a
/// periodic refresh can never race a user's own write. Reads occupy
/// single-slot workers that are overwritten rather than queued.
pub struct ActionService {
    device: ArcDevice,
    event_tx: ArcEventTx,
    action_rx: mpsc::UnboundedReceiver<Action>,
    // Loopback used by write workers to re-arm the timers
    action_tx: mpsc::UnboundedSender<Action>,
    cancel_token: CancellationToken,
    refresh_interval: Duration,
}

impl ActionService {
    pub fn new(
        device: ArcDevice,
        action_rx: mpsc::UnboundedReceiver<Action>,
        action_tx: mpsc::UnboundedSender<Action>,
        event_tx: ArcEventTx,
        cancel_token: CancellationToken,
        refresh_interval: Duration,
    ) -> ActionService {
        ActionService {
            device,
            event_tx,
            action_rx,
            action_tx,
            cancel_token,
            refresh_interval,
        }
    }

    pub async fn start(&mut self) -> Result<()> {
        // Initial state was fetched before the UI came up, so the
        // first periodic tick lands a full interval from now.
        let mut alarm_timer =
            time::interval_at(Instant::now() + self.refresh_interval, self.refresh_interval);
        alarm_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut task_timer =
            time::interval_at(Instant::now() + self.refresh_interval, self.refresh_interval);
        task_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut alarm_paused = false;
        let mut task_paused = false;
        let mut alarm_seq: u64 = 0;
        let mut task_seq: u64 = 0;

        let mut alarm_read: JoinHandle<()> = tokio::spawn(async {});
        let mut task_read: JoinHandle<()> = tokio::spawn(async {});
        let mut alarm_write: JoinHandle<()> = tokio::spawn(async {});
        let mut task_write: JoinHandle<()> = tokio::spawn(async {});

        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    log::debug!("Action service cancelled");
                    alarm_read.abort();
                    task_read.abort();
                    alarm_write.abort();
                    task_write.abort();
                    return Ok(());
                }

                _ = alarm_timer.tick(), if !alarm_paused => {
                    alarm_read = tokio::spawn(read_alarm(
                        Arc::clone(&self.device),
                        Arc::clone(&self.event_tx),
                    ));
                }

                _ = task_timer.tick(), if !task_paused => {
                    task_read = tokio::spawn(read_task(
                        Arc::clone(&self.device),
                        Arc::clone(&self.event_tx),
                    ));
                }

                action = self.action_rx.recv() => {
                    let Some(action) = action else { continue };
                    match action {
                        Action::RefreshAlarm => {
                            alarm_read = tokio::spawn(read_alarm(
                                Arc::clone(&self.device),
                                Arc::clone(&self.event_tx),
                            ));
                        }

                        Action::RefreshTask => {
                            task_read = tokio::spawn(read_task(
                                Arc::clone(&self.device),
                                Arc::clone(&self.event_tx),
                            ));
                        }

                        Action::SubmitAlarm(alarm) => {
                            alarm_paused = true;
                            alarm_seq += 1;
                            // A newer edit supersedes whatever write is
                            // still in flight.
                            alarm_write.abort();

                            let device = Arc::clone(&self.device);
                            let event_tx = Arc::clone(&self.event_tx);
                            let resume_tx = self.action_tx.clone();
                            let seq = alarm_seq;
                            alarm_write = tokio::spawn(async move {
                                write_alarm(device, event_tx, alarm).await;
                                let _ = resume_tx.send(Action::ResumeAlarmRefresh(seq));
                            });
                        }

                        Action::SubmitTask(req) => {
                            task_paused = true;
                            task_seq += 1;
                            task_write.abort();

                            let device = Arc::clone(&self.device);
                            let event_tx = Arc::clone(&self.event_tx);
                            let resume_tx = self.action_tx.clone();
                            let seq = task_seq;
                            task_write = tokio::spawn(async move {
                                write_task(device, event_tx, req).await;
                                let _ = resume_tx.send(Action::ResumeTaskRefresh(seq));
                            });
                        }

                        Action::ResumeAlarmRefresh(seq) => {
                            if seq == alarm_seq {
                                alarm_timer.reset();
                                alarm_paused = false;
                            }
                        }

                        Action::ResumeTaskRefresh(seq) => {
                            if seq == task_seq {
                                task_timer.reset();
                                task_paused = false;
                            }
                        }
                    }
                }
            }
        }
    }
}

async fn read_alarm(device: ArcDevice, event_tx: ArcEventTx) {
    match device.get_alarm().await {
        Ok(status) => send_event(&event_tx, Event::AlarmSynced(status)).await,
        Err(err) => {
            log::error!("Failed to fetch alarm: {err:?}");
            send_notice(&event_tx, format!("Alarm refresh failed: {err}")).await;
        }
    }
}

async fn read_task(device: ArcDevice, event_tx: ArcEventTx) {
    match device.get_task().await {
        Ok(state) => send_event(&event_tx, Event::TaskSynced(state)).await,
        Err(err) => {
            log::error!("Failed to fetch task: {err:?}");
            send_notice(&event_tx, format!("Task refresh failed: {err}")).await;
        }
    }
}

async fn write_alarm(device: ArcDevice, event_tx: ArcEventTx, alarm: AlarmState) {
    if let Err(err) = device.set_alarm(&alarm).await {
        log::error!("Failed to write alarm: {err:?}");
        send_notice(&event_tx, format!("Alarm update failed: {err}")).await;
        return;
    }
    // Re-render from authoritative state rather than trusting the echo
    read_alarm(device, event_tx).await;
}

async fn write_task(device: ArcDevice, event_tx: ArcEventTx, req: TaskRequest) {
    if let Err(err) = device.set_task(&req).await {
        log::error!("Failed to write task {}: {err:?}", req.task);
        send_notice(&event_tx, format!("Task update failed: {err}")).await;
        return;
    }
    read_task(device, event_tx).await;
}

async fn send_event(event_tx: &ArcEventTx, event: Event) {
    if let Err(err) = event_tx.send(event).await {
        log::error!("Failed to send event: {}", err);
    }
}

async fn send_notice(event_tx: &ArcEventTx, message: impl Into<String>) {
    send_event(event_tx, Event::Notice(NoticeMessage::error(message))).await;
}
