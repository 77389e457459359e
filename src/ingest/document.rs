//! Article documents and header images on disk

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Render the markdown of an article document
///
/// `image` is the path of the header image relative to the document.
pub fn render_document(title: &str, body: &str, image: Option<&str>) -> String {
    let mut out = format!("# {}\n\n", title);
    if let Some(image) = image {
        out.push_str(&format!("![{}]({})\n\n", title, image));
    }
    out.push_str(body);
    out.push('\n');
    out
}

/// Writes documents under `articles_dir` and images under `images_dir`
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    articles_dir: PathBuf,
    images_dir: PathBuf,
}

impl DocumentWriter {
    pub fn new(articles_dir: impl Into<PathBuf>, images_dir: impl Into<PathBuf>) -> Self {
        Self {
            articles_dir: articles_dir.into(),
            images_dir: images_dir.into(),
        }
    }

    pub fn articles_dir(&self) -> &Path {
        &self.articles_dir
    }

    /// Path of the document for a slug
    pub fn document_path(&self, slug: &str) -> PathBuf {
        self.articles_dir.join(format!("{}.md", slug))
    }

    /// Path of the header image for a slug
    pub fn image_path(&self, slug: &str) -> PathBuf {
        self.images_dir.join(format!("{}.jpg", slug))
    }

    /// Image reference as written into the document
    pub fn image_link(&self, slug: &str) -> String {
        match self.images_dir.strip_prefix(&self.articles_dir) {
            Ok(relative) => relative.join(format!("{}.jpg", slug)).display().to_string(),
            Err(_) => self.image_path(slug).display().to_string(),
        }
    }

    pub async fn document_exists(&self, slug: &str) -> bool {
        fs::try_exists(self.document_path(slug))
            .await
            .unwrap_or(false)
    }

    /// Create the document, never replacing an existing one
    ///
    /// Fails with `AlreadyExists` if a document for the slug is already there.
    pub async fn create_document(&self, slug: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.document_path(slug);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(contents.as_bytes()).await?;
        file.flush().await?;
        Ok(path)
    }

    /// Write a header image, replacing any previous one for the slug
    pub async fn write_image(&self, slug: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.images_dir).await?;
        let path = self.image_path(slug);
        fs::write(&path, bytes).await?;
        Ok(path)
    }
}
