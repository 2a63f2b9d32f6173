use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

// Three-step verification form, embedded at compile time
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct ClientAssets;

/// Serve the client view from embedded assets
pub async fn serve_client(uri: Uri) -> Response {
    serve_embedded::<ClientAssets>(uri).await
}

/// Serve an embedded file; `/` maps to index.html. Unknown paths are 404 so
/// mistyped API calls do not come back as HTML.
async fn serve_embedded<E: RustEmbed>(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    match E::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}
