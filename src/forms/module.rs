use crate::models;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ModuleForm {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub title: String,
    #[validate(max_length = 2000)]
    pub description: Option<String>,
    /// Lessons in display order
    #[serde(default)]
    pub lesson_ids: Vec<Uuid>,
}

impl ModuleForm {
    /// Lesson ids in submitted order, first occurrence wins.
    pub fn lesson_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = Vec::with_capacity(self.lesson_ids.len());
        for id in &self.lesson_ids {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }
}

impl Into<models::Module> for &ModuleForm {
    fn into(self) -> models::Module {
        let now = Utc::now();
        models::Module {
            id: Uuid::new_v4(),
            title: self.title.trim().to_string(),
            description: self.description.clone().filter(|d| !d.trim().is_empty()),
            completed_by: vec![],
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_lessons_are_collapsed() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let form = ModuleForm {
            title: "Basics".to_string(),
            description: None,
            lesson_ids: vec![a, b, a],
        };
        assert_eq!(form.lesson_ids(), vec![a, b]);
    }

    #[test]
    fn whitespace_title_is_rejected() {
        let form: ModuleForm = serde_json::from_str("{\"title\": \"  \\t \"}").unwrap();
        assert!(form.validate().is_err());

        let form: ModuleForm = serde_json::from_str(r#"{"title": " Basics "}"#).unwrap();
        assert!(form.validate().is_ok());
        assert_eq!(form.title, "Basics");
    }

    #[test]
    fn lesson_ids_default_to_empty() {
        let form: ModuleForm = serde_json::from_str(r#"{"title": "Basics"}"#).unwrap();
        assert!(form.validate().is_ok());
        assert!(form.lesson_ids.is_empty());
    }
}
