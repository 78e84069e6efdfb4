#![allow(dead_code)]

use academy::configuration::{get_configuration, DatabaseSettings, Settings};
use academy::forms;
use actix_web::{get, web, App, HttpRequest, HttpResponse, HttpServer};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const FREE_TOKEN: &str = "free-token";
pub const PRO_TOKEN: &str = "pro-token";
pub const ULTRA_TOKEN: &str = "ultra-token";
/// Resolves to a user whose plans the provider could not report
pub const UNKNOWN_PLANS_TOKEN: &str = "unknown-plans-token";

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post_json(&self, path: &str, token: Option<&str>, body: &Value) -> reqwest::Response {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    /// `multipart/form-data` POST; `files` are (field, filename, bytes).
    pub async fn post_multipart(
        &self,
        path: &str,
        token: &str,
        fields: &[(&str, &str)],
        files: &[(&str, &str, &[u8])],
    ) -> reqwest::Response {
        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name.to_string(), value.to_string());
        }
        for (name, filename, bytes) in files {
            let part = Part::bytes(bytes.to_vec()).file_name(filename.to_string());
            form = form.part(name.to_string(), part);
        }

        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn create_category(&self, title: &str) -> String {
        let body: Value = self
            .post_json("/admin/category", Some(ADMIN_TOKEN), &serde_json::json!({"title": title}))
            .await
            .json()
            .await
            .unwrap();
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_lesson(&self, title: &str) -> String {
        let body: Value = self
            .post_json(
                "/admin/lesson",
                Some(ADMIN_TOKEN),
                &serde_json::json!({
                    "title": title,
                    "content": [{"type": "text", "text": format!("{title} body")}]
                }),
            )
            .await
            .json()
            .await
            .unwrap();
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_module(&self, title: &str, lesson_ids: &[String]) -> String {
        let body: Value = self
            .post_json(
                "/admin/module",
                Some(ADMIN_TOKEN),
                &serde_json::json!({"title": title, "lessonIds": lesson_ids}),
            )
            .await
            .json()
            .await
            .unwrap();
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_course(
        &self,
        title: &str,
        tier: &str,
        category_id: &str,
        module_ids: &[String],
        featured: bool,
    ) -> reqwest::Response {
        let module_ids = serde_json::to_string(module_ids).unwrap();
        let mut fields = vec![
            ("title", title),
            ("description", "A course"),
            ("category", category_id),
            ("tier", tier),
            ("moduleIds", module_ids.as_str()),
        ];
        if featured {
            fields.push(("featured", "on"));
        }
        self.post_multipart("/admin/course", ADMIN_TOKEN, &fields, &[])
            .await
    }
}

pub async fn spawn_app() -> Option<TestApp> {
    let mut configuration = get_configuration().expect("Failed to get configuration");

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind port for testing auth server");
    configuration.auth_url = format!(
        "http://127.0.0.1:{}/me",
        listener.local_addr().unwrap().port()
    );
    let auth_server = mock_auth_server(listener);
    let _ = tokio::spawn(auth_server);

    configuration.uploads.dir = std::env::temp_dir()
        .join(format!("academy-uploads-{}", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .to_string();

    spawn_app_with_configuration(configuration).await
}

pub async fn spawn_app_with_configuration(mut configuration: Settings) -> Option<TestApp> {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let server = academy::startup::run(listener, connection_pool.clone(), configuration)
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    Some(TestApp {
        address,
        db_pool: connection_pool,
        client: reqwest::Client::new(),
    })
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}

fn test_user(token: &str) -> Option<forms::user::User> {
    let (id, role, plans): (&str, &str, Option<Vec<&str>>) = match token {
        ADMIN_TOKEN => ("admin", "group_admin", Some(vec![])),
        FREE_TOKEN => ("free_user", "group_user", Some(vec!["free"])),
        PRO_TOKEN => ("pro_user", "group_user", Some(vec!["pro"])),
        ULTRA_TOKEN => ("ultra_user", "group_user", Some(vec!["ultra"])),
        UNKNOWN_PLANS_TOKEN => ("unknown_user", "group_user", None),
        _ => return None,
    };

    Some(forms::user::User {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        role: Some(role.to_string()),
        email_confirmed: true,
        plans: plans.map(|plans| plans.into_iter().map(str::to_string).collect()),
        ..Default::default()
    })
}

#[get("")]
async fn mock_auth(req: HttpRequest) -> HttpResponse {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or_default();

    match test_user(token) {
        Some(user) => HttpResponse::Ok().json(forms::user::UserForm { user }),
        None => HttpResponse::Unauthorized().finish(),
    }
}

fn mock_auth_server(listener: TcpListener) -> actix_web::dev::Server {
    HttpServer::new(|| App::new().service(web::scope("/me").service(mock_auth)))
        .listen(listener)
        .unwrap()
        .run()
}
