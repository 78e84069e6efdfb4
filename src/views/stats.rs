use serde::Serialize;

#[derive(Debug, Serialize, Default, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PublicStats {
    pub courses: i64,
    pub lessons: i64,
}
