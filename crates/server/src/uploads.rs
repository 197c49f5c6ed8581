//! On-disk storage for uploaded product images.
//!
//! Files land flat in a single directory under a generated name:
//! `{unix millis}-{random 0..=1e9}-{original name, whitespace runs as "_"}`.
//! The timestamp plus random suffix keeps concurrent uploads from colliding.
//! Contents are stored as-is; there is no type or size inspection here.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use mercado_core::{UploadedFile, upload_url};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Upper bound (inclusive) of the random filename component.
const RANDOM_SUFFIX_MAX: u64 = 1_000_000_000;

/// Directory-backed upload store.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory files are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write `bytes` under a freshly generated name.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<UploadedFile> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let suffix = rand::rng().random_range(0..=RANDOM_SUFFIX_MAX);
        let filename = generate_filename(original_name, now_ms, suffix);

        tokio::fs::write(self.dir.join(&filename), bytes).await?;
        tracing::info!(filename = %filename, size = bytes.len(), "upload stored");

        Ok(UploadedFile {
            url: upload_url(&filename),
            filename,
        })
    }
}

/// Build the stored filename for an upload.
///
/// Only the final path component of `original_name` is kept so a client
/// cannot write outside the upload directory.
#[must_use]
pub fn generate_filename(original_name: &str, now_ms: i64, suffix: u64) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    let safe = WHITESPACE.replace_all(base, "_");
    format!("{now_ms}-{suffix}-{safe}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_filename_scheme() {
        assert_eq!(
            generate_filename("foto.png", 1_700_000_000_000, 42),
            "1700000000000-42-foto.png"
        );
    }

    #[test]
    fn test_generate_filename_collapses_whitespace_runs() {
        assert_eq!(
            generate_filename("mi  foto\tnueva.jpg", 1, 2),
            "1-2-mi_foto_nueva.jpg"
        );
        assert_eq!(generate_filename(" a.png", 1, 2), "1-2-_a.png");
    }

    #[test]
    fn test_generate_filename_strips_directories() {
        assert_eq!(generate_filename("../../etc/passwd", 1, 2), "1-2-passwd");
        assert_eq!(generate_filename(r"C:\fotos\a b.png", 1, 2), "1-2-a_b.png");
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let stored = store.save("lapiz rojo.png", b"png-bytes").await.unwrap();

        assert!(stored.filename.ends_with("-lapiz_rojo.png"));
        assert_eq!(stored.url, format!("/uploads/{}", stored.filename));
        let written = tokio::fs::read(dir.path().join(&stored.filename)).await.unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn test_ensure_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("a").join("b"));
        store.ensure_dir().await.unwrap();
        assert!(store.dir().is_dir());
    }
}
