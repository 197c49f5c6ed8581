//! Image reference rules.
//!
//! Products store a bare filename in `imagen`. Responses expose a derived
//! `imagen_url`, and the fallback differs by endpoint: listings always carry
//! a usable URL (the placeholder), while the detail view reports `null`.

/// Public path prefix under which uploaded files are served.
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Placeholder used by product listings when no image is stored.
pub const PLACEHOLDER_IMAGE: &str = "/img/default.png";

/// Returns the stored filename if it refers to an actual upload.
///
/// Empty strings and the literal `"null"` (written by older admin forms)
/// count as "no image".
fn stored_filename(imagen: Option<&str>) -> Option<&str> {
    imagen.filter(|name| !name.is_empty() && *name != "null")
}

/// Public URL for an uploaded filename.
#[must_use]
pub fn upload_url(filename: &str) -> String {
    format!("{UPLOADS_PREFIX}{filename}")
}

/// Image URL for the product listing. Never empty.
#[must_use]
pub fn listing_image_url(imagen: Option<&str>) -> String {
    stored_filename(imagen).map_or_else(|| PLACEHOLDER_IMAGE.to_owned(), upload_url)
}

/// Image URL for the product detail view, `None` when no image is stored.
#[must_use]
pub fn detail_image_url(imagen: Option<&str>) -> Option<String> {
    stored_filename(imagen).map(upload_url)
}
