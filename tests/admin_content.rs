mod common;

use common::{ADMIN_TOKEN, PRO_TOKEN};
use serde_json::{json, Value};

#[tokio::test]
async fn admin_builds_a_course_tree() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let category_id = app.create_category("Systems").await;
    let first = app.create_lesson("Ownership").await;
    let second = app.create_lesson("Borrowing").await;
    let module_id = app
        .create_module("Memory", &[first.clone(), second.clone(), first.clone()])
        .await;

    let response = app
        .create_course("Intro to Rust!", "free", &category_id, &[module_id.clone()], true)
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["item"]["slug"], "intro-to-rust");
    assert_eq!(body["item"]["featured"], true);

    let outline: Value = app
        .get("/course/intro-to-rust", None)
        .await
        .json()
        .await
        .unwrap();
    let item = &outline["item"];
    assert_eq!(item["category"]["title"], "Systems");
    assert_eq!(item["moduleCount"], 1);
    assert_eq!(item["lessonCount"], 2);
    let lessons = item["modules"][0]["lessons"].as_array().unwrap();
    assert_eq!(lessons[0]["slug"], "ownership");
    assert_eq!(lessons[1]["slug"], "borrowing");

    let stats: Value = app.get("/admin/stats", Some(ADMIN_TOKEN)).await.json().await.unwrap();
    assert_eq!(stats["item"]["courses"], 1);
    assert_eq!(stats["item"]["modules"], 1);
    assert_eq!(stats["item"]["lessons"], 2);
    assert_eq!(stats["item"]["categories"], 1);
    assert_eq!(stats["item"]["recentCourses"][0]["lessonCount"], 2);

    let modules: Value = app.get("/admin/module", Some(ADMIN_TOKEN)).await.json().await.unwrap();
    assert_eq!(modules["list"][0]["lessonTitles"], json!(["Ownership", "Borrowing"]));

    let categories: Value = app.get("/admin/category", Some(ADMIN_TOKEN)).await.json().await.unwrap();
    assert_eq!(categories["list"][0]["courseCount"], 1);

    let options: Value = app
        .get("/admin/lesson/options", Some(ADMIN_TOKEN))
        .await
        .json()
        .await
        .unwrap();
    let options = options["list"].as_array().unwrap();
    assert_eq!(options.len(), 2);
    assert!(options.iter().all(|option| option["moduleId"] == module_id.as_str()));
}

#[tokio::test]
async fn lesson_is_appended_to_module_once() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let module_id = app.create_module("Async", &[]).await;
    let response = app
        .post_json(
            "/admin/lesson",
            Some(ADMIN_TOKEN),
            &json!({"title": "Futures", "moduleId": module_id}),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let modules: Value = app.get("/admin/module", Some(ADMIN_TOKEN)).await.json().await.unwrap();
    assert_eq!(modules["list"][0]["lessonCount"], 1);

    let lessons: Value = app.get("/admin/lesson", Some(ADMIN_TOKEN)).await.json().await.unwrap();
    assert_eq!(lessons["list"][0]["moduleTitle"], "Async");
}

#[tokio::test]
async fn lesson_with_video_upload_records_asset() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let upload: Value = app
        .post_json("/admin/video/upload", Some(ADMIN_TOKEN), &json!({}))
        .await
        .json()
        .await
        .unwrap();
    let upload_id = upload["item"]["uploadId"].as_str().unwrap().to_string();

    let response = app
        .post_json(
            "/admin/lesson",
            Some(ADMIN_TOKEN),
            &json!({"title": "Video lesson", "videoUploadId": upload_id}),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let lesson: Value = app.get("/lesson/video-lesson", None).await.json().await.unwrap();
    assert_eq!(
        lesson["item"]["video"]["playbackId"],
        format!("playback-asset-{}", upload_id)
    );
}

#[tokio::test]
async fn admin_validation_errors() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let response = app
        .post_json("/admin/category", Some(ADMIN_TOKEN), &json!({"title": ""}))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app
        .post_json("/admin/category", Some(ADMIN_TOKEN), &json!({"title": "   "}))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app
        .post_json("/admin/module", Some(ADMIN_TOKEN), &json!({"title": " \t "}))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app
        .post_json(
            "/admin/lesson",
            Some(ADMIN_TOKEN),
            &json!({"title": "Bad", "content": {"type": "text"}}),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app
        .post_json(
            "/admin/module",
            Some(ADMIN_TOKEN),
            &json!({"title": "Ghosts", "lessonIds": [uuid::Uuid::new_v4()]}),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let missing_category = uuid::Uuid::new_v4().to_string();
    let response = app
        .create_course("Orphan", "free", &missing_category, &[], false)
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let category_id = app.create_category("Web").await;
    let response = app.create_course("Twice", "pro", &category_id, &[], false).await;
    assert_eq!(response.status().as_u16(), 200);
    let response = app.create_course("Twice", "pro", &category_id, &[], false).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app.create_course("Gold", "gold", &category_id, &[], false).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn simultaneous_same_title_creates_one_row() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let category_id = app.create_category("Races").await;
    let (first, second) = tokio::join!(
        app.create_course("Same Title", "free", &category_id, &[], false),
        app.create_course("Same Title", "free", &category_id, &[], false),
    );
    let mut statuses = vec![first.status().as_u16(), second.status().as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![200, 400]);

    let lesson = json!({"title": "Same Lesson"});
    let (first, second) = tokio::join!(
        app.post_json("/admin/lesson", Some(ADMIN_TOKEN), &lesson),
        app.post_json("/admin/lesson", Some(ADMIN_TOKEN), &lesson),
    );
    let mut statuses = vec![first.status().as_u16(), second.status().as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![200, 400]);

    let (courses,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM course WHERE slug = 'same-title'")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(courses, 1);
}

#[tokio::test]
async fn course_thumbnail_is_served() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let category_id = app.create_category("Design").await;
    let fields = [
        ("title", "Pixels"),
        ("description", "Art"),
        ("category", category_id.as_str()),
        ("tier", "free"),
        ("moduleIds", "not json"),
    ];
    let png: &[u8] = &[137, 80, 78, 71, 13, 10, 26, 10];
    let response = app
        .post_multipart("/admin/course", ADMIN_TOKEN, &fields, &[("thumbnail", "cover.png", png)])
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    let url = body["item"]["thumbnail_url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/"));

    let served = app.get(&url, None).await;
    assert_eq!(served.status().as_u16(), 200);
    assert_eq!(served.bytes().await.unwrap().as_ref(), png);
}

#[tokio::test]
async fn admin_routes_require_admin_role() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let response = app.get("/admin/stats", Some(PRO_TOKEN)).await;
    assert_eq!(response.status().as_u16(), 403);

    let response = app.get("/admin/stats", None).await;
    assert_eq!(response.status().as_u16(), 403);

    let response = app
        .post_json("/admin/category", Some(PRO_TOKEN), &json!({"title": "Nope"}))
        .await;
    assert_eq!(response.status().as_u16(), 403);
}
