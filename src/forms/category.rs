use crate::models;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct CategoryForm {
    #[serde(deserialize_with = "super::trimmed")]
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub title: String,
    #[validate(max_length = 2000)]
    pub description: Option<String>,
    #[validate(max_length = 64)]
    pub icon: Option<String>,
}

impl Into<models::Category> for CategoryForm {
    fn into(self) -> models::Category {
        let now = Utc::now();
        models::Category {
            id: Uuid::new_v4(),
            title: self.title.trim().to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            icon: self.icon.filter(|i| !i.trim().is_empty()),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_is_rejected() {
        let form: CategoryForm = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert!(form.validate().is_err());
    }

    #[test]
    fn whitespace_title_is_rejected() {
        let form: CategoryForm = serde_json::from_str(r#"{"title": "   "}"#).unwrap();
        assert_eq!(form.title, "");
        assert!(form.validate().is_err());
    }

    #[test]
    fn blank_optionals_are_dropped() {
        let form: CategoryForm =
            serde_json::from_str(r#"{"title": " Web ", "description": " ", "icon": "globe"}"#)
                .unwrap();
        assert!(form.validate().is_ok());

        let category: models::Category = form.into();
        assert_eq!(category.title, "Web");
        assert_eq!(category.description, None);
        assert_eq!(category.icon.as_deref(), Some("globe"));
    }
}
