mod common;

use common::{TestApp, FREE_TOKEN, PRO_TOKEN};
use serde_json::{json, Value};

async fn completion_count(app: &TestApp, lesson_id: &str) -> i32 {
    let lesson_id = uuid::Uuid::parse_str(lesson_id).unwrap();
    let (count,): (Option<i32>,) =
        sqlx::query_as("SELECT cardinality(completed_by) FROM lesson WHERE id = $1")
            .bind(lesson_id)
            .fetch_one(&app.db_pool)
            .await
            .expect("Failed to read completions");
    count.unwrap_or_default()
}

#[tokio::test]
async fn completing_twice_records_once() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let lesson_id = app.create_lesson("Traits").await;

    let response = app
        .post_json("/lesson/complete", Some(FREE_TOKEN), &json!({"lessonId": lesson_id}))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Lesson completed");
    assert_eq!(body["item"], "recorded");

    let response = app
        .post_json("/lesson/complete", Some(FREE_TOKEN), &json!({"lessonId": lesson_id}))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Lesson already completed");
    assert_eq!(body["item"], "already_recorded");

    assert_eq!(completion_count(&app, &lesson_id).await, 1);

    app.post_json("/lesson/complete", Some(PRO_TOKEN), &json!({"lessonId": lesson_id}))
        .await;
    assert_eq!(completion_count(&app, &lesson_id).await, 2);
}

#[tokio::test]
async fn concurrent_completions_leave_one_entry() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let lesson_id = app.create_lesson("Lifetimes").await;
    let body = json!({"lessonId": lesson_id});

    let (first, second, third) = tokio::join!(
        app.post_json("/lesson/complete", Some(FREE_TOKEN), &body),
        app.post_json("/lesson/complete", Some(FREE_TOKEN), &body),
        app.post_json("/lesson/complete", Some(FREE_TOKEN), &body),
    );
    for response in [first, second, third] {
        assert_eq!(response.status().as_u16(), 200);
    }

    assert_eq!(completion_count(&app, &lesson_id).await, 1);
}

#[tokio::test]
async fn completion_shows_up_in_progress() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let category_id = app.create_category("Basics").await;
    let first = app.create_lesson("Variables").await;
    let second = app.create_lesson("Functions").await;
    let module_id = app.create_module("Start", &[first.clone(), second]).await;
    app.create_course("Basics course", "free", &category_id, &[module_id], false)
        .await;

    app.post_json("/lesson/complete", Some(FREE_TOKEN), &json!({"lessonId": first}))
        .await;

    let body: Value = app
        .get("/course/basics-course", Some(FREE_TOKEN))
        .await
        .json()
        .await
        .unwrap();
    let lessons = &body["item"]["modules"][0]["lessons"];
    assert_eq!(lessons[0]["completed"], true);
    assert_eq!(lessons[1]["completed"], false);

    let body: Value = app
        .get("/course/basics-course", Some(PRO_TOKEN))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["item"]["modules"][0]["lessons"][0]["completed"], false);
}

#[tokio::test]
async fn completion_requires_a_known_caller_and_lesson() {
    let Some(app) = common::spawn_app().await else {
        return;
    };
    let lesson_id = app.create_lesson("Macros").await;

    let response = app
        .post_json("/lesson/complete", None, &json!({"lessonId": lesson_id}))
        .await;
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(completion_count(&app, &lesson_id).await, 0);

    let response = app
        .post_json(
            "/lesson/complete",
            Some(FREE_TOKEN),
            &json!({"lessonId": uuid::Uuid::new_v4()}),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);
}
