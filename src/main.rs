use std::sync::Arc;
use std::time::Duration;

use eyre::{Context, Result};
use neoctl::app::services::{ActionService, EventService};
use neoctl::app::{App, InitProps, destruct_terminal_for_panic};
use neoctl::cli::{Command, init_logger, resolve_path};
use neoctl::device::{ArcDevice, HttpDevice};
use neoctl::models::{Action, ArcEventTx};
use neoctl::storage::AuthStore;
use tokio::{sync::mpsc, task};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let config = cmd.get_config()?;
    init_logger(&config.log)?;

    let auth_key = match &config.device.auth_key {
        Some(key) => key.clone(),
        None => {
            let path = resolve_path(&config.device.auth_key_file)
                .wrap_err("resolving auth key file path")?;
            AuthStore::new(path).load_or_prompt()?
        }
    };

    let device: ArcDevice = Arc::new(HttpDevice::from(&config.device).with_auth_key(&auth_key));
    log::info!("Using device at {}", config.device.endpoint);

    let alarm = device.get_alarm().await.wrap_err("fetching alarm")?;
    let catalog = device.list_tasks().await.wrap_err("listing tasks")?;
    let task = device.get_task().await.wrap_err("fetching current task")?;
    log::info!("Device reports {} tasks", catalog.len());

    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
    let mut events = EventService::default();
    let token = CancellationToken::new();

    let mut task_set = task::JoinSet::new();
    {
        let device = Arc::clone(&device);
        let event_tx: ArcEventTx = Arc::new(events.event_tx());
        let action_tx = action_tx.clone();
        let token = token.clone();
        let refresh_interval = Duration::from_secs(config.refresh.interval_secs);
        task_set.spawn(async move {
            let mut service = ActionService::new(
                device,
                action_rx,
                action_tx,
                event_tx,
                token,
                refresh_interval,
            );
            return service.start().await;
        });
    }

    let mut app = App::new(
        action_tx,
        &mut events,
        token.clone(),
        InitProps {
            alarm,
            task,
            catalog,
        },
    );

    if let Err(err) = app.run().await {
        eprintln!("Error: {}", err);
    }

    token.cancel();
    task_set.abort_all();
    while let Some(res) = task_set.join_next().await {
        match res {
            Ok(_) => {}
            Err(err) => log::error!("Task error: {}", err),
        }
    }

    Ok(())
}
