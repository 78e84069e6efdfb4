use crate::models;
use crate::views::course::CourseDetail;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoView {
    pub playback_id: String,
    pub status: String,
    pub duration: Option<f64>,
}

/// Lesson page: content, video and the courses it belongs to (free first).
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LessonDetail {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: serde_json::Value,
    pub video: Option<VideoView>,
    pub completed: bool,
    pub completion_count: usize,
    pub courses: Vec<CourseDetail>,
}

impl LessonDetail {
    pub fn new(
        lesson: models::Lesson,
        video: Option<VideoView>,
        courses: Vec<CourseDetail>,
        caller: Option<&str>,
    ) -> Self {
        let completed = caller.map_or(false, |id| lesson.is_completed_by(id));
        Self {
            id: lesson.id,
            title: lesson.title,
            slug: lesson.slug,
            description: lesson.description,
            content: lesson
                .content
                .unwrap_or_else(|| serde_json::Value::Array(vec![])),
            video,
            completed,
            completion_count: lesson.completed_by.len(),
            courses,
        }
    }
}
