//! Standalone menu QR code handler.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, blocking};
use crate::menu::menu_url;
use crate::qr::{self, QrImageOptions};

use super::super::state::AppState;

/// Bounds on the served image size in pixels.
const MIN_SIZE: u32 = 64;
const MAX_SIZE: u32 = 2048;

/// Query parameters for the QR endpoint.
#[derive(Debug, Deserialize)]
pub struct QrQuery {
    pub size: Option<u32>,
}

/// GET /api/menus/:id/qrcode - PNG QR code linking to the public menu.
pub async fn menu_qrcode(
    State(state): State<Arc<AppState>>,
    Path(menu_id): Path<String>,
    Query(query): Query<QrQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let url = menu_url(&state.config.flyer.base_url, &menu_id);
    let mut options = QrImageOptions::default();
    if let Some(size) = query.size {
        options.size = size.clamp(MIN_SIZE, MAX_SIZE);
    }

    let png_bytes = blocking(move || qr::render_png(&url, options)).await?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes))
}
