use crate::models::{self, Reference, Tier};
use crate::services::{self, CourseProgress, ModuleProgress, UserProgress};
use serde::Serialize;
use std::convert::From;
use uuid::Uuid;

/// Course as listed on catalogue pages.
#[derive(Debug, Serialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseCard {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub tier: Tier,
    pub featured: bool,
    pub thumbnail_url: Option<String>,
    pub category: Option<Reference>,
    pub module_count: usize,
    pub lesson_count: usize,
}

impl From<&models::CourseOutline> for CourseCard {
    fn from(outline: &models::CourseOutline) -> Self {
        let course = &outline.course;
        Self {
            id: course.id,
            title: course.title.clone(),
            slug: course.slug.clone(),
            description: course.description.clone(),
            tier: course.tier,
            featured: course.featured,
            thumbnail_url: course.thumbnail_url.clone(),
            category: outline.category.clone(),
            module_count: outline.module_count(),
            lesson_count: outline.lesson_count(),
        }
    }
}

/// Lesson line inside a module. Other learners' ids are never exposed, only whether the
/// caller finished it.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LessonOutline {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub playback_id: Option<String>,
    pub completed: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOutline {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub lessons: Vec<LessonOutline>,
    pub progress: ModuleProgress,
}

/// Full course page: outline plus the caller's progress.
///
/// A `locked` course still lists its structure, but playback ids are withheld.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    #[serde(flatten)]
    pub card: CourseCard,
    pub locked: bool,
    pub modules: Vec<ModuleOutline>,
    pub progress: CourseProgress,
}

impl CourseDetail {
    pub fn for_caller(outline: &models::CourseOutline, caller: Option<&str>, locked: bool) -> Self {
        let progress = services::course_progress(&outline.modules, caller);
        let modules = outline
            .modules
            .iter()
            .zip(progress.modules.iter())
            .map(|(entry, module_progress)| ModuleOutline {
                id: entry.module.id,
                title: entry.module.title.clone(),
                description: entry.module.description.clone(),
                lessons: entry
                    .lessons
                    .iter()
                    .map(|lesson| LessonOutline {
                        id: lesson.id,
                        title: lesson.title.clone(),
                        slug: lesson.slug.clone(),
                        description: lesson.description.clone(),
                        playback_id: if locked { None } else { lesson.playback_id.clone() },
                        completed: caller.map_or(false, |id| lesson.is_completed_by(id)),
                    })
                    .collect(),
                progress: module_progress.clone(),
            })
            .collect();

        Self {
            card: CourseCard::from(outline),
            locked,
            modules,
            progress,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearnerCourse {
    #[serde(flatten)]
    pub card: CourseCard,
    pub progress: CourseProgress,
}

/// The caller's course list: only accessible courses, with their resolved tier.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearnerDashboard {
    pub tier: Tier,
    pub courses: Vec<LearnerCourse>,
    pub summary: UserProgress,
}

impl LearnerDashboard {
    pub fn new(tier: Tier, outlines: &[models::CourseOutline], caller: Option<&str>) -> Self {
        let courses: Vec<LearnerCourse> = outlines
            .iter()
            .map(|outline| LearnerCourse {
                card: CourseCard::from(outline),
                progress: services::course_progress(&outline.modules, caller),
            })
            .collect();
        let summary = services::user_progress(courses.iter().map(|course| &course.progress));

        Self {
            tier,
            courses,
            summary,
        }
    }
}
