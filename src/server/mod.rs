//! # HTTP Server for Flyer Rendering
//!
//! Exposes the compositor over HTTP for menu dashboards.
//!
//! ## Usage
//!
//! ```bash
//! menuflyer serve --listen 0.0.0.0:8080 --asset-root public
//! ```
//!
//! | Route | Result |
//! |-------|--------|
//! | `POST /api/flyer/preview` | JSON `{dataUrl, background, logo}` |
//! | `POST /api/flyer/download` | PNG attachment |
//! | `GET /api/menus/:id/qrcode` | PNG QR code for the public menu URL |
//! | `GET /api/backgrounds` | built-in background presets |
//! | `GET /backgrounds/*` | preset image files from the asset root |

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::error::FlyerError;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let backgrounds_dir = state.config.flyer.asset_root.join("backgrounds");

    Router::new()
        .route("/api/flyer/preview", post(handlers::flyer::preview))
        .route("/api/flyer/download", post(handlers::flyer::download))
        .route("/api/backgrounds", get(handlers::flyer::list_backgrounds))
        .route(
            "/api/menus/:id/qrcode",
            get(handlers::qrcode::menu_qrcode),
        )
        .nest_service("/backgrounds", ServeDir::new(backgrounds_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use menuflyer::config::FlyerConfig;
/// use menuflyer::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), menuflyer::FlyerError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     flyer: FlyerConfig::default(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), FlyerError> {
    let app_state = Arc::new(AppState::new(config.clone())?);
    let app = router(app_state);

    tracing::info!(
        listen = %config.listen_addr,
        base_url = %config.flyer.base_url,
        asset_root = %config.flyer.asset_root.display(),
        "menuflyer HTTP server starting"
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            FlyerError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| FlyerError::Server(format!("Server error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlyerConfig;
    use crate::flyer::Compositor;
    use crate::loader::StaticImageLoader;
    use crate::output::DATA_URL_PREFIX;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use image::{DynamicImage, Rgba, RgbaImage};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([200, 0, 0, 255])));
        let loader = StaticImageLoader::new().with("/logo.png", logo);
        let config = ServerConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            flyer: FlyerConfig::default().with_base_url("https://menus.test"),
        };
        let state = AppState::with_compositor(config, Compositor::new(Arc::new(loader)));
        router(Arc::new(state))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    #[tokio::test]
    async fn test_preview_returns_data_url_and_statuses() {
        let response = test_router()
            .oneshot(post_json(
                "/api/flyer/preview",
                json!({
                    "restaurantName": "Joe's Diner",
                    "logoUrl": "/logo.png",
                    "backgroundUrl": "bg-4",
                    "qrPayloadUrl": "https://menus.test/menu/abc123",
                    "width": 400,
                    "height": 600
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(body["dataUrl"].as_str().unwrap().starts_with(DATA_URL_PREFIX));
        assert_eq!(body["logo"], "loaded");
        // Preset resolves to a path the static loader does not know
        assert_eq!(body["background"], "fallback");
    }

    #[tokio::test]
    async fn test_download_sets_filename() {
        let response = test_router()
            .oneshot(post_json(
                "/api/flyer/download",
                json!({
                    "restaurantName": "Joe's Diner",
                    "qrCodeUrl": "https://menus.test/menu/abc123",
                    "width": 400,
                    "height": 600
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"joe's-diner-qr.png\"; filename*=UTF-8''joe%27s-diner-qr.png"
        );

        let png = body_bytes(response).await;
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (400, 600));
    }

    #[tokio::test]
    async fn test_download_keeps_utf8_filename() {
        let response = test_router()
            .oneshot(post_json(
                "/api/flyer/download",
                json!({
                    "restaurantName": "Café",
                    "qrPayloadUrl": "https://menus.test/menu/1",
                    "width": 400,
                    "height": 600
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"caf_-qr.png\""));
        assert!(disposition.ends_with("filename*=UTF-8''caf%C3%A9-qr.png"));
    }

    fn png_file(path: &std::path::Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 200, 255])).save(path).unwrap();
    }

    #[tokio::test]
    async fn test_file_url_outside_asset_root_falls_back() {
        let base = std::env::temp_dir().join(format!("menuflyer-server-{}", std::process::id()));
        let assets = base.join("assets");
        let outside = base.join("private").join("secret.png");
        let inside = assets.join("backgrounds").join("ok.png");
        png_file(&outside);
        png_file(&inside);

        let config = ServerConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            flyer: FlyerConfig::default().with_asset_root(&assets),
        };
        let app = router(Arc::new(AppState::new(config).unwrap()));

        let preview = |background: String| {
            post_json(
                "/api/flyer/preview",
                json!({
                    "restaurantName": "Joe's Diner",
                    "backgroundUrl": background,
                    "qrPayloadUrl": "https://menus.test/menu/abc123",
                    "width": 400,
                    "height": 600
                }),
            )
        };

        let response = app
            .clone()
            .oneshot(preview(format!("file://{}", outside.display())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["background"], "fallback");

        let response = app
            .oneshot(preview(format!("file://{}", inside.display())))
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["background"], "loaded");

        std::fs::remove_dir_all(&base).unwrap();
    }

    #[tokio::test]
    async fn test_oversized_payload_is_bad_request() {
        let response = test_router()
            .oneshot(post_json(
                "/api/flyer/preview",
                json!({
                    "restaurantName": "Joe's Diner",
                    "qrPayloadUrl": "x".repeat(5000)
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(body["error"].as_str().unwrap().contains("capacity"));
    }

    #[tokio::test]
    async fn test_blank_name_is_bad_request() {
        let response = test_router()
            .oneshot(post_json(
                "/api/flyer/download",
                json!({ "restaurantName": "  ", "qrPayloadUrl": "https://menus.test/menu/1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_menu_qrcode() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/menus/abc123/qrcode?size=300")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let png = body_bytes(response).await;
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!(img.width(), 300);
    }

    #[tokio::test]
    async fn test_list_backgrounds() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/backgrounds")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body.as_array().unwrap().len(), 15);
        assert_eq!(body[3]["name"], "Marble");
        assert_eq!(body[3]["path"], "/backgrounds/marble.jpg");
    }
}
