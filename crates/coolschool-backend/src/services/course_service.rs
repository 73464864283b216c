use coolschool_bridge::MessageFromBackend;
use coolschool_bridge::course::CourseForm;
use coolschool_bridge::notification::NotificationKind;

use crate::workflow::{CourseWorkflow, SubmissionError};

/// Handles an incoming course submission (see
/// [`coolschool_bridge::MessageToBackend::SubmitCourse`]).
///
/// The frontend keeps its form populated until it receives
/// [`MessageFromBackend::CourseCreated`].
pub async fn handle_submit_course_request(context: super::AppContextHandle, form: CourseForm) {
    let (api, session) = {
        let state = context.state.read().await;
        (state.api(), state.session.clone())
    };

    let api = match api {
        Ok(api) => api,
        Err(err) => {
            log::error!("Cannot reach the API: {err}");
            context.notify(NotificationKind::Exception, err.to_string());
            return;
        }
    };

    let workflow = CourseWorkflow {
        storage: &api,
        store: &api,
        auth: &session,
        rules: context.rules.as_ref(),
    };

    match workflow.submit(&form).await {
        Ok(submitted) => {
            context
                .send(MessageFromBackend::CourseCreated(submitted.course))
                .await;
            context
                .send(MessageFromBackend::Navigate(submitted.navigate_to))
                .await;
        }
        Err(SubmissionError::ValidationFailed(errors)) => {
            log::debug!("Course form rejected: {errors}");
            context
                .send(MessageFromBackend::ValidationFailed(errors))
                .await;
        }
        Err(err) => {
            log::warn!("Course submission failed: {err}");
            context.notify(NotificationKind::Exception, err.to_string());
            context
                .send(MessageFromBackend::CourseSubmissionFailed {
                    reason: err.to_string(),
                })
                .await;
        }
    }
}
