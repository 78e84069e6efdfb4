use crate::models::ModuleWithLessons;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
    pub module_id: Uuid,
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct CourseProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
    pub modules: Vec<ModuleProgress>,
}

/// Progress of one learner across a set of courses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub courses: usize,
    pub courses_started: usize,
    pub courses_completed: usize,
    pub lessons_completed: usize,
    pub lessons_total: usize,
}

/// Share of `completed` in `total`, rounded half away from zero; 0 for an empty total.
pub fn percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 * 100.0 / total as f64).round() as u32
}

pub fn module_progress(module: &ModuleWithLessons, user_id: Option<&str>) -> ModuleProgress {
    let total = module.lessons.len();
    let completed = match user_id {
        Some(user_id) => module
            .lessons
            .iter()
            .filter(|lesson| lesson.is_completed_by(user_id))
            .count(),
        None => 0,
    };

    ModuleProgress {
        module_id: module.module.id,
        completed,
        total,
        percent: percent(completed, total),
    }
}

pub fn course_progress(modules: &[ModuleWithLessons], user_id: Option<&str>) -> CourseProgress {
    let modules: Vec<ModuleProgress> = modules
        .iter()
        .map(|module| module_progress(module, user_id))
        .collect();
    let completed = modules.iter().map(|m| m.completed).sum();
    let total = modules.iter().map(|m| m.total).sum();

    CourseProgress {
        completed,
        total,
        percent: percent(completed, total),
        modules,
    }
}

pub fn user_progress<'a, I>(courses: I) -> UserProgress
where
    I: IntoIterator<Item = &'a CourseProgress>,
{
    courses
        .into_iter()
        .fold(UserProgress::default(), |mut summary, course| {
            summary.courses += 1;
            summary.lessons_completed += course.completed;
            summary.lessons_total += course.total;
            if course.completed > 0 {
                summary.courses_started += 1;
            }
            if course.total > 0 && course.completed == course.total {
                summary.courses_completed += 1;
            }
            summary
        })
}
