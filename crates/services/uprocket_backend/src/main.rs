// File: crates/services/uprocket_backend/src/main.rs
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;
use uprocket_config::load_config;

#[tokio::main]
async fn main() {
    uprocket_common::logging::init();
    let config = Arc::new(load_config().expect("Failed to load config"));

    let mut api_router = Router::new()
        .route("/", get(|| async { "Welcome to UpRocket API!" }))
        .merge(uprocket_directory::routes(config.clone()));

    if config.use_nylas {
        api_router = api_router.merge(uprocket_nylas::routes(config.clone()));
    }
    if config.use_booking {
        api_router = api_router.merge(uprocket_booking::routes(config.clone()));
    }

    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use uprocket_booking::openapi::BookingApiDoc;
        use uprocket_directory::openapi::DirectoryApiDoc;
        use uprocket_nylas::openapi::NylasApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "UpRocket API",
                version = "0.1.0",
                description = "UpRocket marketplace service API docs"
            ),
            components(),
            tags((name = "UpRocket", description = "Core service endpoints")),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(DirectoryApiDoc::openapi());
        openapi_doc.merge(NylasApiDoc::openapi());
        openapi_doc.merge(BookingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    // Serve the built frontend in dev mode
    if cfg!(debug_assertions) {
        app = app.fallback_service(ServeDir::new("../dist"));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
