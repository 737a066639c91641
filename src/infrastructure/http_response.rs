// HTTP response utilities for SVG output with optional Brotli encoding
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
};
use tokio::io::AsyncReadExt;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// True when the client lists `br` in `Accept-Encoding` with a non-zero
/// quality value.
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').any(accepts_coding_br))
        .unwrap_or(false)
}

fn accepts_coding_br(entry: &str) -> bool {
    let mut parts = entry.split(';').map(str::trim);
    if !parts.next().is_some_and(|coding| coding.eq_ignore_ascii_case("br")) {
        return false;
    }

    let quality = parts
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
        .map(|(_, value)| value.trim().parse::<f32>().unwrap_or(0.0))
        .unwrap_or(1.0);
    quality > 0.0
}

pub async fn brotli_compress(bytes: Vec<u8>) -> std::io::Result<Vec<u8>> {
    let cursor = std::io::Cursor::new(bytes);
    let mut encoder = BrotliEncoder::new(cursor);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Build an SVG response, compressing the body when `compress` is set.
pub async fn svg_response(svg: String, compress: bool) -> Result<Response<Body>, StatusCode> {
    let raw = svg.into_bytes();

    let (body_bytes, content_encoding) = if compress {
        let raw_len = raw.len();
        let compressed = brotli_compress(raw).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!("Compressed SVG: {} -> {} bytes", raw_len, compressed.len());
        (compressed, Some("br"))
    } else {
        (raw, None)
    };

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, SVG_CONTENT_TYPE)
        .header(header::CONTENT_LENGTH, HeaderValue::from(body_bytes.len()));

    if let Some(encoding) = content_encoding {
        response_builder = response_builder.header(header::CONTENT_ENCODING, encoding);
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
