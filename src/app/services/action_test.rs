use std::sync::Mutex;

use super::*;
use crate::device::{Device, MockDevice};
use crate::models::{AlarmStatus, TaskState, TimeUntil};
use async_trait::async_trait;
use mockall::Sequence;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::timeout;

fn alarm(time: &str) -> AlarmState {
    AlarmState {
        time: time.to_string(),
        enabled: true,
        days: vec!["mon".to_string()],
    }
}

fn status(state: &AlarmState) -> AlarmStatus {
    AlarmStatus(
        state.clone(),
        TimeUntil {
            time_until_alarm: 60.0,
        },
    )
}

fn start_service(
    device: ArcDevice,
    refresh_interval: Duration,
) -> (
    mpsc::UnboundedSender<Action>,
    UnboundedReceiver<Event>,
    CancellationToken,
    JoinHandle<Result<()>>,
) {
    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
    let token = CancellationToken::new();

    let mut service = ActionService::new(
        device,
        action_rx,
        action_tx.clone(),
        Arc::new(event_tx),
        token.clone(),
        refresh_interval,
    );
    let handle = tokio::spawn(async move { service.start().await });
    (action_tx, event_rx, token, handle)
}

async fn next_event(rx: &mut UnboundedReceiver<Event>) -> Event {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

#[tokio::test]
async fn test_alarm_write_then_resync() {
    let written = alarm("07:00");

    let mut device = MockDevice::new();
    let mut seq = Sequence::new();
    let expected = written.clone();
    device
        .expect_set_alarm()
        .withf(move |a| *a == expected)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Box::pin(async { Ok(()) }));
    let reread = status(&written);
    device
        .expect_get_alarm()
        .times(1)
        .in_sequence(&mut seq)
        .returning(move || {
            let reread = reread.clone();
            Box::pin(async move { Ok(reread) })
        });

    let (action_tx, mut event_rx, token, handle) =
        start_service(Arc::new(device), Duration::from_secs(60));

    action_tx.send(Action::SubmitAlarm(written.clone())).unwrap();

    match next_event(&mut event_rx).await {
        Event::AlarmSynced(synced) => assert_eq!(synced.state(), &written),
        other => panic!("Unexpected event: {:?}", other),
    }

    token.cancel();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_periodic_refresh_reads_both_resources() {
    let state = alarm("06:30");
    let reread = status(&state);

    let mut device = MockDevice::new();
    device.expect_get_alarm().returning(move || {
        let reread = reread.clone();
        Box::pin(async move { Ok(reread) })
    });
    device.expect_get_task().returning(|| {
        Box::pin(async {
            Ok(TaskState {
                task: Some("rainbow".to_string()),
            })
        })
    });

    let (_action_tx, mut event_rx, token, handle) =
        start_service(Arc::new(device), Duration::from_millis(50));

    let mut saw_alarm = false;
    let mut saw_task = false;
    while !(saw_alarm && saw_task) {
        match next_event(&mut event_rx).await {
            Event::AlarmSynced(_) => saw_alarm = true,
            Event::TaskSynced(state) => {
                assert_eq!(state.task.as_deref(), Some("rainbow"));
                saw_task = true;
            }
            other => panic!("Unexpected event: {:?}", other),
        }
    }

    token.cancel();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_failed_write_notifies_and_rearms_refresh() {
    let state = alarm("06:30");
    let reread = status(&state);

    let mut device = MockDevice::new();
    device
        .expect_set_alarm()
        .times(1)
        .returning(|_| Box::pin(async { Err(eyre::eyre!("boom")) }));
    // Only the resumed periodic timer reads; the failed write must not
    device.expect_get_alarm().returning(move || {
        let reread = reread.clone();
        Box::pin(async move { Ok(reread) })
    });
    // The task timer keeps ticking on its own
    device.expect_get_task().returning(|| {
        Box::pin(async {
            Ok(TaskState {
                task: Some("rainbow".to_string()),
            })
        })
    });

    let (action_tx, mut event_rx, token, handle) =
        start_service(Arc::new(device), Duration::from_millis(50));

    action_tx.send(Action::SubmitAlarm(alarm("07:00"))).unwrap();

    let mut saw_notice = false;
    let mut saw_refresh = false;
    while !(saw_notice && saw_refresh) {
        match next_event(&mut event_rx).await {
            Event::Notice(msg) => {
                assert!(msg.message().contains("Alarm update failed"));
                saw_notice = true;
            }
            Event::AlarmSynced(synced) => {
                // The refresh renders the old state, never the failed write
                assert_eq!(synced.state().time, "06:30");
                saw_refresh = true;
            }
            Event::TaskSynced(_) => {}
            other => panic!("Unexpected event: {:?}", other),
        }
    }

    token.cancel();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_manual_refresh_reads_immediately() {
    let state = alarm("06:30");
    let reread = status(&state);

    let mut device = MockDevice::new();
    device.expect_get_alarm().times(1).returning(move || {
        let reread = reread.clone();
        Box::pin(async move { Ok(reread) })
    });

    // A long interval so only the explicit refresh can trigger the read
    let (action_tx, mut event_rx, token, handle) =
        start_service(Arc::new(device), Duration::from_secs(3600));

    action_tx.send(Action::RefreshAlarm).unwrap();

    match next_event(&mut event_rx).await {
        Event::AlarmSynced(synced) => assert_eq!(synced.state().time, "06:30"),
        other => panic!("Unexpected event: {:?}", other),
    }

    token.cancel();
    handle.await.unwrap().unwrap();
}

/// A device whose write for task "A" never completes. Used to prove
/// that selecting "B" while "A" is in flight converges to "B".
struct StuckWriteDevice {
    calls: Mutex<Vec<String>>,
    current: Mutex<String>,
}

impl StuckWriteDevice {
    fn new() -> Self {
        Self {
            calls: Mutex::new(vec![]),
            current: Mutex::new("blank".to_string()),
        }
    }
}

#[async_trait]
impl Device for StuckWriteDevice {
    fn name(&self) -> &str {
        "stuck"
    }

    async fn get_alarm(&self) -> Result<AlarmStatus> {
        Ok(status(&alarm("06:30")))
    }

    async fn set_alarm(&self, _alarm: &AlarmState) -> Result<()> {
        Ok(())
    }

    async fn get_task(&self) -> Result<TaskState> {
        Ok(TaskState {
            task: Some(self.current.lock().unwrap().clone()),
        })
    }

    async fn set_task(&self, req: &TaskRequest) -> Result<()> {
        self.calls.lock().unwrap().push(req.task.clone());
        if req.task == "A" {
            futures::future::pending::<()>().await;
        }
        *self.current.lock().unwrap() = req.task.clone();
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<String>> {
        Ok(vec!["A".to_string(), "B".to_string()])
    }
}

#[tokio::test]
async fn test_superseded_task_write_converges_to_last_selection() {
    let device = Arc::new(StuckWriteDevice::new());

    let (action_tx, mut event_rx, token, handle) =
        start_service(device.clone(), Duration::from_secs(3600));

    action_tx.send(Action::SubmitTask(TaskRequest::new("A"))).unwrap();
    // Give A's write a chance to get stuck in flight
    tokio::time::sleep(Duration::from_millis(50)).await;
    action_tx.send(Action::SubmitTask(TaskRequest::new("B"))).unwrap();

    match next_event(&mut event_rx).await {
        Event::TaskSynced(state) => assert_eq!(state.task.as_deref(), Some("B")),
        other => panic!("Unexpected event: {:?}", other),
    }

    let calls = device.calls.lock().unwrap().clone();
    assert_eq!(calls, vec!["A", "B"]);

    token.cancel();
    handle.await.unwrap().unwrap();
}
