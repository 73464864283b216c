//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, shared state, the notification
//! queue, and the message dispatch loop that listens to frontend bridge
//! requests.

use std::{sync::Arc, thread};

use coolschool_bridge::{MessageFromBackend, MessageToBackend};
use coolschool_forms::DefaultRules;
use coolschool_notifications::{NotificationQueue, QueueSettings};
use tokio::sync::{
    RwLock,
    mpsc::{Receiver, Sender},
};

use crate::app::AppContext;
use crate::config::ConfigError;
use crate::state::State;

/// Errors that prevent the backend from starting.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("failed to build tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Initialize backend state and start processing frontend messages.
async fn setup_backend(
    rx: Receiver<MessageToBackend>,
    tx: Sender<MessageFromBackend>,
) -> Result<(), SetupError> {
    let config = crate::config::load_config().await?;

    let request_client = reqwest::Client::builder()
        .timeout(config.api.request_timeout())
        .build()?;
    let notifications = NotificationQueue::new(QueueSettings::from(&config.notifications));
    log::info!(
        "Using API at {}, showing up to {} notifications",
        config.api.base_url,
        notifications.settings().max_visible
    );

    let state = Arc::new(RwLock::new(State {
        config,
        request_client,
        session: None,
        categories: Vec::new(),
    }));

    let context = Arc::new(AppContext {
        state,
        tx,
        notifications,
        rules: Arc::new(DefaultRules),
    });
    let forwarder = context.spawn_notification_forwarder();
    context.consume_bridge_messages(rx).await;
    forwarder.abort();

    Ok(())
}

/// Spawn the backend runtime and begin processing bridge messages.
///
/// The returned thread finishes once the frontend drops its sender.
pub fn run(
    rx: Receiver<MessageToBackend>,
    tx: Sender<MessageFromBackend>,
) -> thread::JoinHandle<Result<(), SetupError>> {
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(setup_backend(rx, tx)).inspect_err(|err| {
            log::error!("Backend stopped: {err}");
        })
    })
}
