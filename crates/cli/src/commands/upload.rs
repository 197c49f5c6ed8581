//! Image upload.

use std::path::Path;

/// Upload the image at `path` and print the stored filename and URL.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the upload fails.
pub async fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| format!("Not a file path: {}", path.display()))?;
    let bytes = tokio::fs::read(path).await?;

    tracing::info!(path = %path.display(), size = bytes.len(), "Uploading image");
    let stored = super::client()?.upload(filename, bytes).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("filename: {}", stored.filename);
        println!("url: {}", stored.url);
    }
    Ok(())
}
