use crate::helpers::slugify;
use crate::models;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_valid::Validate;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LessonForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub title: String,
    #[validate(max_length = 2000)]
    pub description: Option<String>,
    /// Rich content blocks; must be a JSON array when present
    pub content: Option<Value>,
    pub module_id: Option<Uuid>,
    /// Direct-upload id returned by `/admin/video/upload`
    pub video_upload_id: Option<String>,
}

impl LessonForm {
    pub fn content_blocks(&self) -> Result<Option<Value>, String> {
        match &self.content {
            None | Some(Value::Null) => Ok(None),
            Some(blocks @ Value::Array(_)) => Ok(Some(blocks.clone())),
            Some(_) => Err("content must be an array of blocks".to_string()),
        }
    }

    pub fn video_upload_id(&self) -> Option<&str> {
        self.video_upload_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

impl TryInto<models::Lesson> for &LessonForm {
    type Error = String;

    fn try_into(self) -> Result<models::Lesson, Self::Error> {
        let slug = slugify(&self.title);
        if slug.is_empty() {
            return Err("title must contain letters or digits".to_string());
        }

        let now = Utc::now();
        Ok(models::Lesson {
            id: Uuid::new_v4(),
            title: self.title.trim().to_string(),
            slug,
            description: self.description.clone().filter(|d| !d.trim().is_empty()),
            video_asset_id: None,
            content: self.content_blocks()?,
            completed_by: vec![],
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(content: Value) -> LessonForm {
        serde_json::from_value(json!({"title": "Ownership 101", "content": content})).unwrap()
    }

    #[test]
    fn content_must_be_an_array() {
        assert!(form(json!({"type": "text"})).content_blocks().is_err());
        assert_eq!(form(json!(null)).content_blocks(), Ok(None));

        let blocks = form(json!([{"type": "text", "text": "hi"}])).content_blocks().unwrap();
        assert!(blocks.unwrap().is_array());
    }

    #[test]
    fn lesson_gets_slug_from_title() {
        let lesson: models::Lesson = (&form(json!([]))).try_into().unwrap();
        assert_eq!(lesson.slug, "ownership-101");
        assert!(lesson.completed_by.is_empty());
    }

    #[test]
    fn blank_upload_id_is_ignored() {
        let form: LessonForm =
            serde_json::from_value(json!({"title": "x", "videoUploadId": "  "})).unwrap();
        assert_eq!(form.video_upload_id(), None);
    }
}
