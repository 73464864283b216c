//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and the notification queue, and
//! provides helpers for sending responses back to the frontend bridge.

use std::sync::Arc;

use coolschool_bridge::notification::{NotificationId, NotificationKind};
use coolschool_bridge::{MessageFromBackend, MessageToBackend};
use coolschool_forms::ValidationRuleProvider;
use coolschool_notifications::NotificationQueue;
use tokio::sync::mpsc::{Receiver, Sender};

use crate::services;
use crate::state::SharedState;

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// Mutable runtime application state shared across services.
    pub state: SharedState,
    /// Outbound channel to the frontend bridge.
    pub tx: Sender<MessageFromBackend>,
    /// Transient notifications shown by the frontend.
    pub notifications: NotificationQueue,
    /// Rule sets used by the validation gates of every workflow.
    pub rules: Arc<dyn ValidationRuleProvider + Send + Sync>,
}

impl AppContext {
    /// Read and dispatch messages from the frontend bridge until it closes.
    ///
    /// Each message is handled to completion before the next one is read.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a frontend message: {message:?}");
            self.dispatch_message(message).await;
        }
        log::info!("Frontend bridge closed");
    }

    /// Dispatches the received message from frontend down to individual
    /// service handlers.
    async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::ConfigurationRequest => {
                services::config_service::handle_config_request(self.clone()).await;
            }
            MessageToBackend::CategoriesRequest => {
                services::catalog_service::handle_categories_request(self.clone()).await;
            }
            MessageToBackend::SubmitCourse(form) => {
                services::course_service::handle_submit_course_request(self.clone(), form).await;
            }
            MessageToBackend::Register(form) => {
                services::registration_service::handle_register_request(self.clone(), form).await;
            }
            MessageToBackend::QuizInfoRequest(id) => {
                services::quiz_service::handle_quiz_info_request(self.clone(), id).await;
            }
            MessageToBackend::AddNotification { message, kind } => {
                self.notifications.add(message, kind);
            }
            MessageToBackend::DismissNotification(id) => self.dismiss(&id),
            MessageToBackend::ClearNotifications => self.notifications.clear(),
        }
    }

    /// Send a message to the frontend bridge.
    pub async fn send(&self, message: MessageFromBackend) {
        if let Err(err) = self.tx.send(message).await {
            log::warn!("Frontend is gone, dropping {:?}", err.0);
        }
    }

    /// Push a notification onto the queue. The frontend learns about it
    /// through [`AppContext::spawn_notification_forwarder`].
    pub fn notify(&self, kind: NotificationKind, content: impl Into<String>) -> NotificationId {
        self.notifications.add(content, Some(kind))
    }

    fn dismiss(&self, id: &NotificationId) {
        if self.notifications.remove(id).is_none() {
            log::debug!("Notification {id} was already gone");
        }
    }

    /// Forwards every change of the notification queue to the frontend as a
    /// [`MessageFromBackend::NotificationsChanged`] snapshot.
    pub fn spawn_notification_forwarder(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let context = self.clone();
        let mut changes = self.notifications.subscribe();
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let snapshot = changes.borrow_and_update().clone();
                context
                    .send(MessageFromBackend::NotificationsChanged(snapshot))
                    .await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use coolschool_bridge::config::Config;
    use coolschool_forms::DefaultRules;
    use coolschool_notifications::QueueSettings;
    use tokio::sync::{RwLock, mpsc};

    use super::*;
    use crate::state::State;

    fn context(buffer: usize) -> (Arc<AppContext>, Receiver<MessageFromBackend>) {
        let (tx, rx) = mpsc::channel(buffer);
        let config = Config::default();
        let context = AppContext {
            notifications: NotificationQueue::new(QueueSettings::from(&config.notifications)),
            state: Arc::new(RwLock::new(State {
                config,
                request_client: reqwest::Client::new(),
                session: None,
                categories: Vec::new(),
            })),
            tx,
            rules: Arc::new(DefaultRules),
        };
        (Arc::new(context), rx)
    }

    #[tokio::test]
    async fn notification_commands_reach_the_frontend() {
        let (context, mut rx) = context(8);
        let forwarder = context.spawn_notification_forwarder();

        context
            .dispatch_message(MessageToBackend::AddNotification {
                message: "Upload failed".into(),
                kind: None,
            })
            .await;
        let Some(MessageFromBackend::NotificationsChanged(snapshot)) = rx.recv().await else {
            panic!("expected a notification snapshot");
        };
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].kind, NotificationKind::Exception);

        context
            .dispatch_message(MessageToBackend::DismissNotification(snapshot[0].id.clone()))
            .await;
        let Some(MessageFromBackend::NotificationsChanged(snapshot)) = rx.recv().await else {
            panic!("expected a notification snapshot");
        };
        assert!(snapshot.is_empty());

        forwarder.abort();
    }

    #[tokio::test]
    async fn configuration_request_is_answered() {
        let (context, mut rx) = context(8);

        context
            .dispatch_message(MessageToBackend::ConfigurationRequest)
            .await;

        assert!(matches!(
            rx.recv().await,
            Some(MessageFromBackend::ConfigurationResponse(config))
                if config.notifications.max_visible == 3
        ));
    }

    #[tokio::test]
    async fn invalid_course_is_rejected_before_any_request() {
        let (context, mut rx) = context(8);

        context
            .dispatch_message(MessageToBackend::SubmitCourse(Default::default()))
            .await;

        let Some(MessageFromBackend::ValidationFailed(errors)) = rx.recv().await else {
            panic!("expected validation errors");
        };
        assert!(!errors.is_empty());
    }
}
