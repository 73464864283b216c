use coolschool_bridge::ids::ResourceId;
use coolschool_bridge::notification::NotificationKind;

/// Handles an incoming quiz information request (see
/// [`coolschool_bridge::MessageToBackend::QuizInfoRequest`]).
pub async fn handle_quiz_info_request(context: super::AppContextHandle, id: ResourceId) {
    let api = {
        let state = context.state.read().await;
        state.api()
    };

    let quiz = match api {
        Ok(api) => api.quiz_info(&id).await,
        Err(err) => Err(err),
    };

    match quiz {
        Ok(quiz) => {
            let can_start = quiz.can_start(chrono::Local::now().naive_local());
            log::debug!("Quiz {id} can be started: {can_start}");
            context
                .send(coolschool_bridge::MessageFromBackend::QuizInfoResponse { quiz, can_start })
                .await;
        }
        Err(err) => {
            log::error!("Failed to fetch quiz {id}: {err}");
            context.notify(
                NotificationKind::Exception,
                format!("Could not load the quiz: {err}"),
            );
        }
    }
}
