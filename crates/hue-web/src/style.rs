#![forbid(unsafe_code)]

//! CSS names and value formatting shared by the DOM binding.
//!
//! Kept free of `web-sys` so the formatting is testable on native targets.

use hue_field::{BlobLayout, Offset};

/// Container the field animates inside.
pub const FIELD_SELECTOR: &str = ".hue-field";
/// Hand-placed blobs adopted at mount.
pub const BLOB_SELECTOR: &str = ".hue-blob";
/// Class list for generated blobs.
pub const DYNAMIC_BLOB_CLASS: &str = "hue-blob dynamic";
/// Custom properties the page's CSS feeds into each blob's transform.
pub const DRIFT_X_PROPERTY: &str = "--drift-x";
pub const DRIFT_Y_PROPERTY: &str = "--drift-y";

/// `{value}px`. Non-finite values render as `0px`.
pub fn px(value: f64) -> String {
    if value.is_finite() {
        format!("{value}px")
    } else {
        "0px".to_string()
    }
}

/// `{value}%`. Non-finite values render as `0%`.
pub fn percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value}%")
    } else {
        "0%".to_string()
    }
}

/// Per-frame declarations for a blob's offset.
pub fn offset_declarations(offset: Offset) -> [(&'static str, String); 2] {
    [
        (DRIFT_X_PROPERTY, px(offset.x)),
        (DRIFT_Y_PROPERTY, px(offset.y)),
    ]
}

/// Inline style for a freshly generated blob.
pub fn layout_declarations(layout: &BlobLayout) -> [(&'static str, String); 5] {
    [
        ("width", px(layout.size)),
        ("height", px(layout.size)),
        ("left", percent(layout.left_percent)),
        ("top", px(layout.top)),
        ("background", layout.color.radial_gradient()),
    ]
}
