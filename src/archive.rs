//! Zip packaging for layout exports: `index.html` referencing `styles.css`.

use crate::error::ServiceError;
use pagesmith_markup::{CompiledLayout, linked_page};
use std::io::{Cursor, Write as _};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Bundle a compiled layout into an archive containing `index.html` and
/// `styles.css`.
pub fn bundle_layout(layout: &CompiledLayout, title: &str) -> Result<Vec<u8>, ServiceError> {
    let page = linked_page(layout, title, "styles.css");

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    writer
        .start_file("index.html", options)
        .map_err(|e| ServiceError::Archive(e.to_string()))?;
    writer
        .write_all(page.as_bytes())
        .map_err(|e| ServiceError::Archive(e.to_string()))?;

    writer
        .start_file("styles.css", options)
        .map_err(|e| ServiceError::Archive(e.to_string()))?;
    writer
        .write_all(layout.css.as_bytes())
        .map_err(|e| ServiceError::Archive(e.to_string()))?;

    let cursor = writer
        .finish()
        .map_err(|e| ServiceError::Archive(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Collapse a layout name to a safe download filename stem.
pub fn download_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if stem.trim_matches('_').is_empty() {
        "layout".to_string()
    } else {
        stem
    }
}
