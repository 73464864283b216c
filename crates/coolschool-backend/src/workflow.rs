//! Two-phase course creation: upload the picture, then create the course
//! record referencing it.
//!
//! The phases run strictly in sequence and the second only starts once the
//! first produced an asset id. There is no compensating rollback: if the
//! record cannot be created, the already uploaded asset stays orphaned on the
//! server. Callers retry by running the whole workflow again.

use coolschool_bridge::auth::AuthSession;
use coolschool_bridge::course::{Asset, CourseForm, CreatedCourse, NewCourse, StoredAsset};
use coolschool_bridge::ids::{CategoryId, UserId};
use coolschool_bridge::route::Page;
use coolschool_bridge::validation::{FieldErrors, Violation};
use coolschool_forms::{FormKind, ValidationRuleProvider, course_fields};

use crate::api::ApiError;

/// Stores binary assets and hands back their identifier.
pub(crate) trait AssetStorage {
    async fn upload(&self, asset: &Asset) -> Result<StoredAsset, ApiError>;
}

/// Creates course records.
pub(crate) trait RecordStore {
    async fn create(&self, record: &NewCourse) -> Result<CreatedCourse, ApiError>;
}

/// Read-only view of the authenticated user.
pub(crate) trait AuthContext {
    fn user_id(&self) -> Option<UserId>;
}

impl AuthContext for Option<AuthSession> {
    fn user_id(&self) -> Option<UserId> {
        self.as_ref().map(|session| session.user.id)
    }
}

/// Terminal outcomes of a failed submission attempt.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SubmissionError {
    /// The form did not pass the validation gate. Nothing was sent.
    #[error("form is invalid: {0}")]
    ValidationFailed(FieldErrors),
    /// No authenticated user to own the course. Nothing was sent.
    #[error("you must be signed in to create a course")]
    NotSignedIn,
    /// Phase one failed; the record store was never called.
    #[error("failed to upload the course picture: {0}")]
    AssetUploadFailed(#[source] ApiError),
    /// Phase two failed; the uploaded asset is not cleaned up.
    #[error("failed to create the course: {0}")]
    RecordCreationFailed(#[source] ApiError),
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Submitted {
    pub course: CreatedCourse,
    /// Detail page of the created course.
    pub navigate_to: String,
}

/// Upload-then-create workflow over injected collaborators.
pub(crate) struct CourseWorkflow<'a, S, R, A, P: ?Sized> {
    pub storage: &'a S,
    pub store: &'a R,
    pub auth: &'a A,
    pub rules: &'a P,
}

impl<S, R, A, P> CourseWorkflow<'_, S, R, A, P>
where
    S: AssetStorage,
    R: RecordStore,
    A: AuthContext,
    P: ValidationRuleProvider + ?Sized,
{
    pub async fn submit(&self, form: &CourseForm) -> Result<Submitted, SubmissionError> {
        let rules = self.rules.rules(FormKind::CourseCreate);
        coolschool_forms::validate(form, &rules).map_err(SubmissionError::ValidationFailed)?;
        let (asset, category_id) = required_parts(form).map_err(SubmissionError::ValidationFailed)?;
        let user_id = self.auth.user_id().ok_or(SubmissionError::NotSignedIn)?;

        log::info!("Uploading course picture {:?}", asset.file_name);
        let stored = self
            .storage
            .upload(asset)
            .await
            .map_err(SubmissionError::AssetUploadFailed)?;

        let record = NewCourse::from_form(form, stored.id, category_id, user_id);
        log::debug!("Creating course {record:?}");
        let course = self
            .store
            .create(&record)
            .await
            .map_err(SubmissionError::RecordCreationFailed)?;

        log::info!("Created course {}", course.id);
        Ok(Submitted {
            navigate_to: Page::SingleCourse.with_id(&course.id),
            course,
        })
    }
}

/// The asset and category the record depends on. A rule provider that does
/// not require them must not lead to a record with a missing reference.
fn required_parts(form: &CourseForm) -> Result<(&Asset, CategoryId), FieldErrors> {
    let mut errors = FieldErrors::new();
    if form.files.len() != 1 {
        errors.push(
            course_fields::FILE,
            Violation::FileCount {
                expected: 1,
                actual: form.files.len(),
            },
        );
    }
    let category = form.category.filter(|id| id.0 >= 0);
    if category.is_none() {
        errors.push(course_fields::CATEGORY, Violation::NotSelected);
    }

    match (form.files.first(), category) {
        (Some(asset), Some(category)) if errors.is_empty() => Ok((asset, category)),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use coolschool_bridge::auth::User;
    use coolschool_bridge::ids::ResourceId;
    use coolschool_forms::{DefaultRules, RuleSet};
    use parking_lot::Mutex;
    use reqwest::StatusCode;

    use super::*;

    #[derive(Default)]
    struct MockStorage {
        fail: bool,
        uploads: Mutex<Vec<String>>,
    }

    impl AssetStorage for MockStorage {
        async fn upload(&self, asset: &Asset) -> Result<StoredAsset, ApiError> {
            self.uploads.lock().push(asset.file_name.clone());
            if self.fail {
                return Err(ApiError::Status {
                    status: StatusCode::PAYLOAD_TOO_LARGE,
                });
            }
            Ok(StoredAsset { id: "42".into() })
        }
    }

    #[derive(Default)]
    struct MockStore {
        fail: bool,
        created: Mutex<Vec<NewCourse>>,
    }

    impl RecordStore for MockStore {
        async fn create(&self, record: &NewCourse) -> Result<CreatedCourse, ApiError> {
            self.created.lock().push(record.clone());
            if self.fail {
                return Err(ApiError::Status {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                });
            }
            Ok(CreatedCourse {
                id: ResourceId::from(17),
                name: record.name.clone(),
            })
        }
    }

    struct NoRules;

    impl ValidationRuleProvider for NoRules {
        fn rules(&self, _: FormKind) -> RuleSet {
            RuleSet::new()
        }
    }

    fn signed_in() -> Option<AuthSession> {
        Some(AuthSession {
            access_token: "token".into(),
            user: User {
                id: UserId(7),
                username: "lecturer".into(),
                email: "lecturer@example.com".into(),
            },
        })
    }

    fn form() -> CourseForm {
        CourseForm {
            name: "  Intro to Rust  ".into(),
            objectives: "\tLearn ownership and borrowing ".into(),
            eligibility: " Anyone who can write a loop".into(),
            category: Some(CategoryId(3)),
            files: vec![Asset {
                file_name: "cover.png".into(),
                content_type: Some("image/png".into()),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            }],
        }
    }

    async fn submit_with(
        storage: &MockStorage,
        store: &MockStore,
        auth: &Option<AuthSession>,
        form: &CourseForm,
    ) -> Result<Submitted, SubmissionError> {
        CourseWorkflow {
            storage,
            store,
            auth,
            rules: &DefaultRules,
        }
        .submit(form)
        .await
    }

    #[tokio::test]
    async fn both_phases_succeed() {
        let (storage, store) = (MockStorage::default(), MockStore::default());
        let form = form();

        let submitted = submit_with(&storage, &store, &signed_in(), &form)
            .await
            .unwrap();

        assert_eq!(submitted.navigate_to, "/courses/17");

        let created = store.created.lock();
        assert_eq!(created.len(), 1);
        let json = serde_json::to_value(&created[0]).unwrap();
        assert_eq!(json["pictureId"], "42");
        assert_eq!(json["categoryId"], 3);
        assert_eq!(json["stars"], 0);
        assert_eq!(json["userId"], 7);
        assert_eq!(json["name"], "Intro to Rust");
        assert_eq!(json["objectives"], "Learn ownership and borrowing");
        assert_eq!(json["eligibility"], "Anyone who can write a loop");
    }

    #[tokio::test]
    async fn upload_failure_never_creates_a_record() {
        let storage = MockStorage {
            fail: true,
            ..Default::default()
        };
        let store = MockStore::default();
        let form = form();

        let result = submit_with(&storage, &store, &signed_in(), &form).await;

        assert!(matches!(result, Err(SubmissionError::AssetUploadFailed(_))));
        assert_eq!(storage.uploads.lock().len(), 1);
        assert!(store.created.lock().is_empty());
    }

    #[tokio::test]
    async fn creation_failure_follows_a_successful_upload() {
        let storage = MockStorage::default();
        let store = MockStore {
            fail: true,
            ..Default::default()
        };
        let form = form();

        let result = submit_with(&storage, &store, &signed_in(), &form).await;

        assert!(matches!(
            result,
            Err(SubmissionError::RecordCreationFailed(ApiError::Status { status }))
                if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
        assert_eq!(storage.uploads.lock().len(), 1);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_network() {
        let (storage, store) = (MockStorage::default(), MockStore::default());
        let form = CourseForm {
            name: String::new(),
            ..form()
        };

        let result = submit_with(&storage, &store, &signed_in(), &form).await;

        let errors = match result {
            Err(SubmissionError::ValidationFailed(errors)) => errors,
            other => panic!("expected a validation failure, got {other:?}"),
        };
        assert_eq!(errors.field(course_fields::NAME), [Violation::Required]);
        assert!(storage.uploads.lock().is_empty());
        assert!(store.created.lock().is_empty());
    }

    #[tokio::test]
    async fn anonymous_user_cannot_submit() {
        let (storage, store) = (MockStorage::default(), MockStore::default());
        let form = form();

        let result = submit_with(&storage, &store, &None, &form).await;

        assert!(matches!(result, Err(SubmissionError::NotSignedIn)));
        assert!(storage.uploads.lock().is_empty());
    }

    #[tokio::test]
    async fn missing_asset_is_rejected_even_without_rules() {
        let (storage, store) = (MockStorage::default(), MockStore::default());
        let form = CourseForm {
            files: Vec::new(),
            ..form()
        };

        let result = CourseWorkflow {
            storage: &storage,
            store: &store,
            auth: &signed_in(),
            rules: &NoRules,
        }
        .submit(&form)
        .await;

        assert!(matches!(result, Err(SubmissionError::ValidationFailed(_))));
        assert!(storage.uploads.lock().is_empty());
    }
}
