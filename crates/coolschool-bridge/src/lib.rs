//! Communication bridge between frontend and backend.
//!
//! This crate defines the types and protocols used to connect a frontend
//! (graphical or console) with an asynchronous backend responsible for talking
//! to the platform's HTTP API, running submission workflows and owning the
//! notification queue.
//!
//! The design is deliberately lightweight and unidirectional:
//! - The frontend sends commands (e.g., submit a course, register, dismiss a
//!   notification).
//! - The backend pushes events (e.g., notification snapshots, created records,
//!   navigation targets).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`], providing back-pressure, async compatibility, and
//! clean separation of concerns.

pub mod auth;
pub mod config;
pub mod course;
pub mod ids;
pub mod notification;
pub mod pagination;
pub mod quiz;
pub mod route;
pub mod validation;

use tokio::sync::mpsc::{self, Receiver, Sender};

/// Messages emitted by the backend to inform the frontend of state updates.
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Current ordered contents of the notification queue. Sent after every
    /// change, including automatic expiry.
    NotificationsChanged(Vec<notification::Notification>),
    /// Response to the configuration request from the frontend.
    ConfigurationResponse(config::Config),
    /// Categories available for the course form's selector.
    CategoriesResponse(Vec<course::Category>),
    /// A form was rejected by the validation gate before any request was made.
    ValidationFailed(validation::FieldErrors),
    /// Both phases of course creation succeeded. The frontend resets its
    /// held course form.
    CourseCreated(course::CreatedCourse),
    /// Course creation failed after validation. The form must stay populated.
    CourseSubmissionFailed { reason: String },
    /// Registration succeeded and the returned session is now active.
    RegistrationCompleted(auth::User),
    /// Quiz information together with its current availability.
    QuizInfoResponse { quiz: quiz::QuizInfo, can_start: bool },
    /// The frontend should navigate to this concrete path.
    Navigate(String),
}

/// Commands issued by the frontend to control or query the backend.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    /// Request for the category catalog.
    CategoriesRequest,
    /// Run the upload-then-create course workflow for this form.
    SubmitCourse(course::CourseForm),
    /// Register a new user account.
    Register(auth::RegistrationForm),
    /// Request information about a quiz.
    QuizInfoRequest(ids::ResourceId),
    /// Push a notification onto the queue.
    AddNotification {
        message: String,
        kind: Option<notification::NotificationKind>,
    },
    /// Dismiss a single notification. Unknown ids are ignored.
    DismissNotification(notification::NotificationId),
    /// Dismiss every notification.
    ClearNotifications,
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// frontend and backend.
pub struct BridgeChannels {
    /// Receiver used by the frontend to get messages from the backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the frontend to send commands to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the frontend.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the frontend.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
