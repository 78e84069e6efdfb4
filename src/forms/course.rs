use crate::helpers::slugify;
use crate::models::{self, Tier};
use actix_multipart::Multipart;
use chrono::Utc;
use futures::TryStreamExt;
use serde_valid::Validate;
use uuid::Uuid;

const MAX_THUMBNAIL_BYTES: usize = 5 * 1024 * 1024;
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Lower-cased extension of the client file name, letters and digits only.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
    }
}

/// Multipart course submission.
#[derive(Debug, Default, Validate)]
pub struct CourseForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub title: String,
    #[validate(min_length = 1)]
    pub description: String,
    #[validate(min_length = 1)]
    pub category: String,
    #[validate(min_length = 1)]
    pub tier: String,
    pub featured: Option<String>,
    /// JSON array of module ids, in display order
    pub module_ids: Option<String>,
    pub thumbnail: Option<UploadedFile>,
}

impl CourseForm {
    pub async fn from_multipart(mut payload: Multipart) -> Result<Self, String> {
        let mut form = CourseForm::default();

        while let Some(mut field) = payload
            .try_next()
            .await
            .map_err(|err| format!("Malformed multipart body: {}", err))?
        {
            let disposition = field.content_disposition().clone();
            let name = disposition.get_name().unwrap_or_default().to_string();
            let filename = disposition.get_filename().map(str::to_string);
            let limit = if name == "thumbnail" {
                MAX_THUMBNAIL_BYTES
            } else {
                MAX_TEXT_FIELD_BYTES
            };

            let mut bytes: Vec<u8> = Vec::new();
            while let Some(chunk) = field
                .try_next()
                .await
                .map_err(|err| format!("Malformed multipart body: {}", err))?
            {
                if bytes.len() + chunk.len() > limit {
                    return Err(format!("Field '{}' is too large", name));
                }
                bytes.extend_from_slice(&chunk);
            }

            if name == "thumbnail" {
                if let Some(filename) = filename.filter(|_| !bytes.is_empty()) {
                    form.thumbnail = Some(UploadedFile { filename, bytes });
                }
                continue;
            }

            let value = String::from_utf8(bytes)
                .map_err(|_| format!("Field '{}' is not valid UTF-8", name))?;
            form.set_text(&name, value);
        }

        Ok(form)
    }

    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "title" => self.title = value.trim().to_string(),
            "description" => self.description = value.trim().to_string(),
            "category" => self.category = value.trim().to_string(),
            "tier" => self.tier = value.trim().to_string(),
            "featured" => self.featured = Some(value),
            "moduleIds" => self.module_ids = Some(value),
            other => tracing::debug!("Ignoring unknown course field '{}'", other),
        }
    }

    pub fn featured(&self) -> bool {
        self.featured.as_deref() == Some("on")
    }

    pub fn tier(&self) -> Result<Tier, String> {
        self.tier.parse::<Tier>().map_err(|err| err.to_string())
    }

    pub fn category_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.category).map_err(|_| "category must be a valid id".to_string())
    }

    /// Module ids in submitted order without repeats. A malformed list counts as empty.
    pub fn module_ids(&self) -> Vec<Uuid> {
        let raw = match self.module_ids.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return vec![],
        };

        let ids: Vec<Uuid> = match serde_json::from_str(raw) {
            Ok(ids) => ids,
            Err(err) => {
                tracing::warn!("Ignoring malformed moduleIds: {}", err);
                return vec![];
            }
        };

        let mut unique: Vec<Uuid> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        unique
    }

    pub fn to_course(&self, thumbnail_url: Option<String>) -> Result<models::Course, String> {
        let slug = slugify(&self.title);
        if slug.is_empty() {
            return Err("title must contain letters or digits".to_string());
        }

        let now = Utc::now();
        Ok(models::Course {
            id: Uuid::new_v4(),
            title: self.title.clone(),
            slug,
            description: Some(self.description.clone()),
            tier: self.tier()?,
            featured: self.featured(),
            category_id: Some(self.category_id()?),
            thumbnail_url,
            completed_by: vec![],
            created_at: now,
            updated_at: now,
        })
    }
}
