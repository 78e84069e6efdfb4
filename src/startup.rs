use crate::configuration::Settings;
use crate::connectors;
use crate::helpers::JsonResponse;
use crate::middleware;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    std::fs::create_dir_all(&settings.uploads.dir)?;
    let uploads = settings.uploads.clone();

    let video_connector = connectors::init_video_service(&settings.connectors);

    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let oauth_http_client = reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    let oauth_http_client = web::Data::new(oauth_http_client);

    let oauth_cache = web::Data::new(middleware::authentication::OAuthCache::new(
        Duration::from_secs(60),
    ));

    let authorization = middleware::authorization::try_new().await?;
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match &err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "Invalid JSON at line {}, column {}: {}",
                err.line(),
                err.column(),
                err
            ),
            _ => err.to_string(),
        };
        JsonResponse::<()>::build().bad_request(msg)
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(authorization.clone())
            .wrap(middleware::authentication::Manager::new())
            .wrap(actix_web::middleware::Compress::default())
            .wrap(Cors::permissive())
            .app_data(json_config.clone())
            .app_data(pg_pool.clone())
            .app_data(settings.clone())
            .app_data(video_connector.clone())
            .app_data(oauth_http_client.clone())
            .app_data(oauth_cache.clone())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(web::scope("/stats").service(routes::stats_handler))
            .service(
                web::scope("/course")
                    .service(routes::course::list_handler)
                    .service(routes::course::featured_handler)
                    .service(routes::course::item_handler),
            )
            .service(
                web::scope("/lesson")
                    .service(routes::lesson::complete_handler)
                    .service(routes::lesson::item_handler),
            )
            .service(
                web::scope("/admin")
                    .service(routes::admin::stats_handler)
                    .service(
                        web::scope("/category")
                            .service(routes::admin::list_categories)
                            .service(routes::admin::add_category),
                    )
                    .service(
                        web::scope("/course")
                            .service(routes::admin::list_courses)
                            .service(routes::admin::add_course),
                    )
                    .service(
                        web::scope("/module")
                            .service(routes::admin::module_options)
                            .service(routes::admin::list_modules)
                            .service(routes::admin::add_module),
                    )
                    .service(
                        web::scope("/lesson")
                            .service(routes::admin::lesson_options)
                            .service(routes::admin::list_lessons)
                            .service(routes::admin::add_lesson),
                    )
                    .service(web::scope("/video").service(routes::admin::create_upload)),
            )
            .service(actix_files::Files::new(&uploads.public_path, &uploads.dir))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
