use coolschool_bridge::MessageFromBackend;
use coolschool_bridge::auth::RegistrationForm;
use coolschool_bridge::notification::NotificationKind;
use coolschool_bridge::route::Page;

use crate::registration::{self, RegistrationError};

/// Handles an incoming registration request (see
/// [`coolschool_bridge::MessageToBackend::Register`]).
///
/// On success the returned session becomes the authenticated user every
/// later request runs as.
pub async fn handle_register_request(context: super::AppContextHandle, form: RegistrationForm) {
    let api = {
        let state = context.state.read().await;
        state.api()
    };

    let api = match api {
        Ok(api) => api,
        Err(err) => {
            log::error!("Cannot reach the API: {err}");
            context.notify(NotificationKind::Exception, err.to_string());
            return;
        }
    };

    match registration::register(&api, context.rules.as_ref(), &form).await {
        Ok(session) => {
            let user = session.user.clone();
            context.state.write().await.session = Some(session);
            context
                .send(MessageFromBackend::RegistrationCompleted(user))
                .await;
            context
                .send(MessageFromBackend::Navigate(Page::Home.path().to_string()))
                .await;
        }
        Err(RegistrationError::ValidationFailed(errors)) => {
            context
                .send(MessageFromBackend::ValidationFailed(errors))
                .await;
        }
        Err(err) => {
            log::warn!("Registration failed: {err}");
            context.notify(NotificationKind::Exception, err.to_string());
        }
    }
}
