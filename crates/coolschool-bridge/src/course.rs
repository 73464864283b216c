use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, ResourceId, UserId};

/// Star rating every newly created course starts with.
pub const INITIAL_STARS: u32 = 0;

/// A course category as returned by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A binary file picked by the user, not yet uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct Asset {
    pub file_name: String,
    /// MIME type of the file, if known.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Asset")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Held state of the course creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseForm {
    pub name: String,
    pub objectives: String,
    pub eligibility: String,
    /// Selected category. `None` until the user picks one.
    pub category: Option<CategoryId>,
    /// Attached files. Exactly one is required to submit.
    pub files: Vec<Asset>,
}

impl CourseForm {
    /// Restores every field to its default value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Response of the asset storage after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredAsset {
    pub id: ResourceId,
}

/// Course record sent to the record store. Only ever built after the asset
/// upload succeeded, so `picture_id` always refers to a stored asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub name: String,
    pub objectives: String,
    pub eligibility: String,
    pub stars: u32,
    pub picture_id: ResourceId,
    pub category_id: CategoryId,
    pub user_id: UserId,
}

impl NewCourse {
    /// Merges the form's trimmed text fields with the identifiers resolved by
    /// the previous steps of the workflow.
    pub fn from_form(
        form: &CourseForm,
        picture_id: ResourceId,
        category_id: CategoryId,
        user_id: UserId,
    ) -> Self {
        Self {
            name: form.name.trim().to_string(),
            objectives: form.objectives.trim().to_string(),
            eligibility: form.eligibility.trim().to_string(),
            stars: INITIAL_STARS,
            picture_id,
            category_id,
            user_id,
        }
    }
}

/// Course as returned by the record store after creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedCourse {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
}
