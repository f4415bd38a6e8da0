/// Image persistence for post attachments.
///
/// Uploads are written to a local file store under the configured
/// media root, keyed by a generated path. The key is what gets stored
/// on `Post.image`; serving the files back is the web tier's job.
use std::path::PathBuf;

use image::ImageFormat;
use uuid::Uuid;

use crate::error::Result;
use crate::forms::ImageUpload;

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Persist a validated image upload and return its store key.
    ///
    /// The payload is sniffed again here so a store can never be
    /// reached with a non-image body, whatever the caller did.
    pub async fn store_image(&self, upload: &ImageUpload) -> Result<String> {
        let format = upload.sniff_format()?;
        let key = format!("posts/{}.{}", Uuid::new_v4(), extension_for(format));

        let path = self.root.join(&key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &upload.data).await?;

        tracing::debug!(key = %key, bytes = upload.data.len(), "stored post image");
        Ok(key)
    }
}

fn extension_for(format: ImageFormat) -> &'static str {
    format.extensions_str().first().copied().unwrap_or("bin")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[tokio::test]
    async fn stores_image_under_generated_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let upload = ImageUpload {
            data: PNG_MAGIC.to_vec(),
            file_name: Some("pic.png".to_string()),
        };
        let key = store.store_image(&upload).await.unwrap();

        assert!(key.starts_with("posts/"));
        assert!(key.ends_with(".png"));
        let written = tokio::fs::read(dir.path().join(&key)).await.unwrap();
        assert_eq!(written, PNG_MAGIC);
    }

    #[tokio::test]
    async fn rejects_non_image_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let upload = ImageUpload {
            data: b"plain text".to_vec(),
            file_name: None,
        };
        let err = store.store_image(&upload).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        // Nothing may land in the store on rejection.
        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }
}
