//! Flyer preview and download handlers.

use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, api_error, blocking};
use crate::backgrounds::{self, BackgroundPreset};
use crate::flyer::FlyerRequest;
use crate::menu::download_filename;

use super::super::state::AppState;

/// Response from the preview endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub data_url: String,
    /// "loaded", "fallback" or "none"
    pub background: &'static str,
    pub logo: &'static str,
}

/// Expand a background preset id in the request, if one was given.
fn with_resolved_background(mut request: FlyerRequest) -> FlyerRequest {
    let resolved = request.background_location().map(backgrounds::resolve);
    if resolved.is_some() {
        request.background_url = resolved;
    }
    request
}

/// POST /api/flyer/preview - Render a flyer as a PNG data URL.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FlyerRequest>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let request = with_resolved_background(request);
    let composition = state.compositor.composite(&request).await.map_err(api_error)?;
    let background = composition.background.label();
    let logo = composition.logo.label();
    let data_url = blocking(move || composition.to_data_url()).await?;

    Ok(Json(PreviewResponse {
        data_url,
        background,
        logo,
    }))
}

/// POST /api/flyer/download - Render a flyer as a PNG attachment.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FlyerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let request = with_resolved_background(request);
    let composition = state.compositor.composite(&request).await.map_err(api_error)?;
    let png_bytes = blocking(move || composition.to_buffer()).await?;
    let filename = download_filename(&request.restaurant_name);

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        png_bytes,
    ))
}

/// `attachment` disposition with an ASCII `filename` and an RFC 5987
/// `filename*` carrying the exact UTF-8 name.
fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii,
        percent_encode_rfc5987(filename)
    )
}

/// Percent-encode everything outside the RFC 5987 `attr-char` set.
fn percent_encode_rfc5987(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}


/// GET /api/backgrounds - List built-in backgrounds.
pub async fn list_backgrounds() -> Json<&'static [BackgroundPreset]> {
    Json(backgrounds::PRESETS)
}
