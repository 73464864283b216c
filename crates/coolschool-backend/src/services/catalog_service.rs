use coolschool_bridge::notification::NotificationKind;

/// Handles an incoming categories request (see
/// [`coolschool_bridge::MessageToBackend::CategoriesRequest`]).
pub async fn handle_categories_request(context: super::AppContextHandle) {
    let api = {
        let state = context.state.read().await;
        state.api()
    };

    let categories = match api {
        Ok(api) => api.categories().await,
        Err(err) => Err(err),
    };

    match categories {
        Ok(categories) => {
            log::info!("Fetched {} categories", categories.len());
            context.state.write().await.categories = categories.clone();
            context
                .send(coolschool_bridge::MessageFromBackend::CategoriesResponse(
                    categories,
                ))
                .await;
        }
        Err(err) => {
            log::error!("Failed to fetch categories: {err}");
            context.notify(
                NotificationKind::Exception,
                format!("Could not load categories: {err}"),
            );

            // fall back to the last catalog we managed to fetch
            let cached = context.state.read().await.categories.clone();
            if !cached.is_empty() {
                context
                    .send(coolschool_bridge::MessageFromBackend::CategoriesResponse(
                        cached,
                    ))
                    .await;
            }
        }
    }
}
