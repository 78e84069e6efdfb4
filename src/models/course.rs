use crate::models::{Reference, Tier};
use chrono::{DateTime, Utc};
use serde_derive::Serialize;
use uuid::Uuid;

#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub tier: Tier,
    pub featured: bool,
    pub category_id: Option<Uuid>,
    pub thumbnail_url: Option<String>,
    pub completed_by: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A course together with its category and ordered module tree.
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct CourseOutline {
    #[serde(flatten)]
    pub course: Course,
    pub category: Option<Reference>,
    pub modules: Vec<super::ModuleWithLessons>,
}

impl CourseOutline {
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|module| module.lessons.len()).sum()
    }
}
