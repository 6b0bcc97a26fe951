use actix_cors::Cors;
use actix_web::{error, web, App, HttpResponse, HttpServer, Responder};
use maze_host::{generate_maze, render_layout, MazeConfig, MazeLayout, OutputFormat};
use serde::{Deserialize, Serialize};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Request bodies are a few small numbers or one 25x25 layout
const JSON_LIMIT: usize = 65_536;

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateMazeResponse {
    success: bool,
    layout: MazeLayout,
}

#[derive(Debug, Deserialize)]
struct RenderRequest {
    layout: MazeLayout,
    #[serde(default = "default_render_format")]
    format: OutputFormat,
}

fn default_render_format() -> OutputFormat {
    OutputFormat::Text
}

#[derive(Debug, Serialize)]
struct RenderResponse {
    success: bool,
    format: OutputFormat,
    rendered: String,
}

#[derive(Debug, Serialize)]
struct ValidateResponse {
    success: bool,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

// API Handlers

/// POST /api/generate-maze
/// Generate a maze from a worksheet section's maze settings
async fn generate(req: web::Json<MazeConfig>) -> impl Responder {
    tracing::info!("Received generate-maze request: {:?}", req);

    let layout = generate_maze(&req);

    HttpResponse::Ok().json(GenerateMazeResponse {
        success: true,
        layout,
    })
}

/// POST /api/render
/// Render a previously generated layout as text, binary grid, or JSON
async fn render(req: web::Json<RenderRequest>) -> impl Responder {
    tracing::info!(
        "Received render request for {}x{} maze (seed {}), format: {}",
        req.layout.safe_width,
        req.layout.safe_height,
        req.layout.seed,
        req.format
    );

    match render_layout(&req.layout, req.format) {
        Ok(rendered) => HttpResponse::Ok().json(RenderResponse {
            success: true,
            format: req.format,
            rendered,
        }),
        Err(e) => {
            tracing::warn!("Failed to render layout: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse {
                success: false,
                error: e.to_string(),
            })
        }
    }
}

/// POST /api/validate
/// Check that a layout is a perfect maze
async fn validate(req: web::Json<MazeLayout>) -> impl Responder {
    tracing::info!("Received validate request for seed: {}", req.seed);

    let error = req.validate().err().map(|e| e.to_string());
    if let Some(e) = &error {
        tracing::info!("Layout for seed {} is invalid: {}", req.seed, e);
    }

    HttpResponse::Ok().json(ValidateResponse {
        success: true,
        valid: error.is_none(),
        error,
    })
}

/// GET /health
/// Health check endpoint
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "worksheet-maze-api"
    }))
}

/// Body parsing limit, with decode failures reported in the API's error shape
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            let message = err.to_string();
            tracing::warn!("Rejected request body: {}", message);
            error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ErrorResponse {
                    success: false,
                    error: message,
                }),
            )
            .into()
        })
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health))
        .route("/api/generate-maze", web::post().to(generate))
        .route("/api/render", web::post().to(render))
        .route("/api/validate", web::post().to(validate));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Worksheet Maze API Server");

    let bind_address = std::env::var("MAZE_API_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    tracing::info!("Binding to {}", bind_address);

    HttpServer::new(|| {
        App::new()
            // The worksheet page is served from a different origin
            .wrap(Cors::permissive())
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_rt::test]
    async fn test_health() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
    }

    #[actix_rt::test]
    async fn test_generate_with_defaults() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/generate-maze")
            .set_json(json!({}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["layout"]["safeWidth"], 12);
        assert_eq!(body["layout"]["safeHeight"], 12);
        assert_eq!(body["layout"]["seed"], 12345);
    }

    #[actix_rt::test]
    async fn test_generate_accepts_numeric_strings() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/generate-maze")
            .set_json(json!({ "width": "12", "height": "oops", "seed": "42" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["layout"]["safeWidth"], 12);
        assert_eq!(body["layout"]["safeHeight"], 12);
        assert_eq!(body["layout"]["seed"], 42);
    }

    #[actix_rt::test]
    async fn test_generate_clamps() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/generate-maze")
            .set_json(json!({ "width": 3, "height": 200, "seed": 42 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["layout"]["safeWidth"], 5);
        assert_eq!(body["layout"]["safeHeight"], 25);
        assert_eq!(body["layout"]["grid"].as_array().map(Vec::len), Some(25));
    }

    #[actix_rt::test]
    async fn test_render_text() {
        let app = test::init_service(App::new().configure(configure)).await;
        let layout = generate_maze(&MazeConfig::new(6, 5, 7));
        let req = test::TestRequest::post()
            .uri("/api/render")
            .set_json(json!({ "layout": layout }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["format"], "text");
        let rendered = body["rendered"].as_str().unwrap_or_default();
        assert_eq!(rendered.lines().count(), 11);
        assert!(rendered.contains("OUT"));
    }

    #[actix_rt::test]
    async fn test_render_rejects_tampered_layout() {
        let app = test::init_service(App::new().configure(configure)).await;
        let mut layout = generate_maze(&MazeConfig::new(6, 5, 7));
        layout.grid[0][0] = 0;
        let req = test::TestRequest::post()
            .uri("/api/render")
            .set_json(json!({ "layout": layout, "format": "binary" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(!body.success);
    }

    #[actix_rt::test]
    async fn test_validate() {
        let app = test::init_service(App::new().configure(configure)).await;

        let layout = generate_maze(&MazeConfig::new(9, 9, 3));
        let req = test::TestRequest::post()
            .uri("/api/validate")
            .set_json(&layout)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], true);

        let mut broken = layout.clone();
        broken.grid[4][4] = 15;
        let req = test::TestRequest::post()
            .uri("/api/validate")
            .set_json(&broken)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], false);
        assert!(body["error"].is_string());
    }

    #[actix_rt::test]
    async fn test_malformed_body() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/generate-maze")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"width\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(!body.success);
    }
}
