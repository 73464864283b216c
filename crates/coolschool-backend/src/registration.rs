//! Account registration: validate the form, create the account, and hand
//! back the session the server opened for it.

use coolschool_bridge::auth::{AuthSession, RegisterRequest, RegistrationForm};
use coolschool_bridge::validation::FieldErrors;
use coolschool_forms::{FormKind, ValidationRuleProvider};

use crate::api::ApiError;

/// Creates user accounts.
pub(crate) trait AccountStore {
    async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, ApiError>;
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum RegistrationError {
    #[error("form is invalid: {0}")]
    ValidationFailed(FieldErrors),
    #[error("registration failed: {0}")]
    Rejected(#[source] ApiError),
}

pub(crate) async fn register<S, P>(
    store: &S,
    rules: &P,
    form: &RegistrationForm,
) -> Result<AuthSession, RegistrationError>
where
    S: AccountStore,
    P: ValidationRuleProvider + ?Sized,
{
    let rules = rules.rules(FormKind::Register);
    coolschool_forms::validate(form, &rules).map_err(RegistrationError::ValidationFailed)?;

    let session = store
        .register(&RegisterRequest::from(form))
        .await
        .map_err(RegistrationError::Rejected)?;
    log::info!("Registered user {}", session.user.username);

    Ok(session)
}

#[cfg(test)]
mod tests {
    use coolschool_bridge::auth::User;
    use coolschool_bridge::ids::UserId;
    use coolschool_forms::DefaultRules;
    use parking_lot::Mutex;
    use reqwest::StatusCode;

    use super::*;

    #[derive(Default)]
    struct MockAccounts {
        conflict: bool,
        requests: Mutex<Vec<RegisterRequest>>,
    }

    impl AccountStore for MockAccounts {
        async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, ApiError> {
            self.requests.lock().push(request.clone());
            if self.conflict {
                return Err(ApiError::Status {
                    status: StatusCode::CONFLICT,
                });
            }
            Ok(AuthSession {
                access_token: "jwt".into(),
                user: User {
                    id: UserId(1),
                    username: request.username.clone(),
                    email: request.email.clone(),
                },
            })
        }
    }

    fn form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Maria".into(),
            last_name: "Ivanova".into(),
            username: "maria".into(),
            address: "Plovdiv, Bulgaria".into(),
            email: "maria@example.com".into(),
            password: "s3cret-pass".into(),
            repeat_password: "s3cret-pass".into(),
        }
    }

    #[tokio::test]
    async fn sends_the_api_field_names() {
        let accounts = MockAccounts::default();

        let session = register(&accounts, &DefaultRules, &form()).await.unwrap();

        assert_eq!(session.user.username, "maria");
        let requests = accounts.requests.lock();
        let json = serde_json::to_value(&requests[0]).unwrap();
        assert_eq!(json["firstname"], "Maria");
        assert_eq!(json["lastname"], "Ivanova");
        assert!(json.get("repeat_password").is_none());
    }

    #[tokio::test]
    async fn mismatched_passwords_are_caught_locally() {
        let accounts = MockAccounts::default();
        let form = RegistrationForm {
            repeat_password: "other".into(),
            ..form()
        };

        let result = register(&accounts, &DefaultRules, &form).await;

        assert!(matches!(result, Err(RegistrationError::ValidationFailed(_))));
        assert!(accounts.requests.lock().is_empty());
    }

    #[tokio::test]
    async fn server_rejection_is_reported() {
        let accounts = MockAccounts {
            conflict: true,
            ..Default::default()
        };

        let result = register(&accounts, &DefaultRules, &form()).await;

        assert!(matches!(
            result,
            Err(RegistrationError::Rejected(ApiError::Status { status })) if status == StatusCode::CONFLICT
        ));
    }
}
