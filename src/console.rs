//! Line-oriented console frontend.
//!
//! Reads commands from stdin, turns them into bridge messages, and logs every
//! message the backend sends back.
//!
//! The last submitted course and registration forms are held until the
//! backend confirms them, so a rejected form can be resubmitted as is.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use coolschool_bridge::auth::RegistrationForm;
use coolschool_bridge::course::{Asset, CourseForm};
use coolschool_bridge::ids::{CategoryId, ResourceId};
use coolschool_bridge::notification::{NotificationId, NotificationKind};
use coolschool_bridge::{MessageFromBackend, MessageToBackend};
use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{Receiver, Sender};

const HELP: &str = "\
commands:
  notify [info|success|validation|exception] <text>
  dismiss <id>
  clear
  config
  categories
  quiz <id>
  course <name> | <objectives> | <eligibility> | <category id> | <picture path>
  register <first> | <last> | <username> | <address> | <email> | <password> | <repeat>
  resubmit course|register
  quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeldForm {
    Course,
    Registration,
}

/// Forms kept across submissions. A form is reset once the backend reports
/// success and stays populated after any failure.
#[derive(Debug, Default)]
struct HeldForms {
    course: CourseForm,
    registration: RegistrationForm,
}

impl HeldForms {
    fn hold_course(&mut self, form: CourseForm) -> MessageToBackend {
        self.course = form.clone();
        MessageToBackend::SubmitCourse(form)
    }

    fn hold_registration(&mut self, form: RegistrationForm) -> MessageToBackend {
        self.registration = form.clone();
        MessageToBackend::Register(form)
    }

    /// Message resubmitting a held form, or `None` if it was reset.
    fn resubmit(&self, form: HeldForm) -> Option<MessageToBackend> {
        match form {
            HeldForm::Course if self.course != CourseForm::default() => {
                Some(MessageToBackend::SubmitCourse(self.course.clone()))
            }
            HeldForm::Registration if self.registration != RegistrationForm::default() => {
                Some(MessageToBackend::Register(self.registration.clone()))
            }
            _ => None,
        }
    }

    fn observe(&mut self, message: &MessageFromBackend) {
        match message {
            MessageFromBackend::CourseCreated(_) => self.course.reset(),
            MessageFromBackend::RegistrationCompleted(_) => self.registration.reset(),
            _ => {}
        }
    }
}

#[derive(Debug)]
enum Command {
    Send(MessageToBackend),
    Course { form: CourseForm, picture: String },
    Register(RegistrationForm),
    Resubmit(HeldForm),
    Help,
    Quit,
}

fn parse_kind(word: &str) -> Option<NotificationKind> {
    match word {
        "info" => Some(NotificationKind::Info),
        "success" => Some(NotificationKind::Success),
        "validation" => Some(NotificationKind::Validation),
        "exception" => Some(NotificationKind::Exception),
        _ => None,
    }
}

fn fields<const N: usize>(rest: &str) -> anyhow::Result<[String; N]> {
    let parts: Vec<String> = rest.split('|').map(|part| part.trim().to_string()).collect();
    let found = parts.len();
    parts
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected {N} fields separated by '|', got {found}"))
}

fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    let (name, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match name {
        "" => return Ok(None),
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "config" => Command::Send(MessageToBackend::ConfigurationRequest),
        "categories" => Command::Send(MessageToBackend::CategoriesRequest),
        "clear" => Command::Send(MessageToBackend::ClearNotifications),
        "dismiss" if !rest.is_empty() => Command::Send(MessageToBackend::DismissNotification(
            NotificationId::from(rest.to_string()),
        )),
        "quiz" if !rest.is_empty() => {
            Command::Send(MessageToBackend::QuizInfoRequest(ResourceId::new(rest)))
        }
        "notify" => {
            let (first, text) = rest.split_once(' ').unwrap_or((rest, ""));
            let (kind, message) = match parse_kind(first) {
                Some(kind) => (Some(kind), text.trim()),
                None => (None, rest),
            };
            if message.is_empty() {
                bail!("notification text is empty");
            }
            Command::Send(MessageToBackend::AddNotification {
                message: message.to_string(),
                kind,
            })
        }
        "course" => {
            let [name, objectives, eligibility, category, picture] = fields(rest)?;
            let category = category
                .parse()
                .with_context(|| format!("invalid category id {category:?}"))?;
            Command::Course {
                form: CourseForm {
                    name,
                    objectives,
                    eligibility,
                    category: Some(CategoryId(category)),
                    files: Vec::new(),
                },
                picture,
            }
        }
        "register" => {
            let [first_name, last_name, username, address, email, password, repeat_password] =
                fields(rest)?;
            Command::Register(RegistrationForm {
                first_name,
                last_name,
                username,
                address,
                email,
                password,
                repeat_password,
            })
        }
        "resubmit" => match rest {
            "course" => Command::Resubmit(HeldForm::Course),
            "register" => Command::Resubmit(HeldForm::Registration),
            _ => bail!("resubmit expects `course` or `register`"),
        },
        other => bail!("unknown command {other:?}, type `help`"),
    };

    Ok(Some(command))
}

async fn load_asset(path: &str) -> anyhow::Result<Asset> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {path}"))?;
    let file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    let content_type = match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some("png") => Some("image/png"),
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        Some("gif") => Some("image/gif"),
        Some("webp") => Some("image/webp"),
        _ => None,
    };

    Ok(Asset {
        file_name,
        content_type: content_type.map(str::to_string),
        bytes,
    })
}

async fn log_backend_messages(
    mut rx: Receiver<MessageFromBackend>,
    held: Arc<Mutex<HeldForms>>,
) {
    while let Some(message) = rx.recv().await {
        held.lock().observe(&message);
        match message {
            MessageFromBackend::NotificationsChanged(notifications) => {
                log::info!("{} notification(s) visible", notifications.len());
                for notification in notifications {
                    log::info!(
                        "  [{:?}] {} ({})",
                        notification.kind,
                        notification.message,
                        notification.id
                    );
                }
            }
            MessageFromBackend::ValidationFailed(errors) => {
                for (field, violations) in errors.iter() {
                    for violation in violations {
                        log::warn!("  {field}: {violation}");
                    }
                }
            }
            MessageFromBackend::Navigate(path) => log::info!("Navigate to {path}"),
            other => log::info!("Got a message from backend: {other:?}"),
        }
    }
}

/// Runs the console until stdin is exhausted or `quit` is entered.
pub fn run(rx: Receiver<MessageFromBackend>, tx: Sender<MessageToBackend>) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let held = Arc::new(Mutex::new(HeldForms::default()));
        let printer = tokio::spawn(log_backend_messages(rx, held.clone()));
        println!("{HELP}");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let message = match parse_command(&line) {
                Ok(Some(Command::Send(message))) => message,
                Ok(Some(Command::Course { mut form, picture })) => match load_asset(&picture).await {
                    Ok(asset) => {
                        form.files.push(asset);
                        held.lock().hold_course(form)
                    }
                    Err(err) => {
                        log::error!("{err:#}");
                        continue;
                    }
                },
                Ok(Some(Command::Register(form))) => held.lock().hold_registration(form),
                Ok(Some(Command::Resubmit(form))) => match held.lock().resubmit(form) {
                    Some(message) => message,
                    None => {
                        log::warn!("No {form:?} form is held, submit a new one");
                        continue;
                    }
                },
                Ok(Some(Command::Help)) => {
                    println!("{HELP}");
                    continue;
                }
                Ok(Some(Command::Quit)) => break,
                Ok(None) => continue,
                Err(err) => {
                    log::warn!("{err:#}");
                    continue;
                }
            };

            if tx.send(message).await.is_err() {
                bail!("backend is not running");
            }
        }

        drop(tx);
        printer.await?;
        Ok(())
    })
}
