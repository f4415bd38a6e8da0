/// Form validators for mutating routes.
///
/// A form validates request input and nothing else; persistence is a
/// separate explicit step in the handler. Rejections surface as
/// `AppError::Validation` so the route re-renders the form with field
/// errors instead of failing the request.
use image::ImageFormat;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Input for creating or editing a post.
#[derive(Debug, Default)]
pub struct PostForm {
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image: Option<ImageUpload>,
}

/// Raw upload attached to a post form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub file_name: Option<String>,
}

impl ImageUpload {
    /// Sniff the payload; only decodable image formats are accepted.
    /// Rejection happens here, before anything touches the file store.
    pub fn sniff_format(&self) -> Result<ImageFormat> {
        image::guess_format(&self.data)
            .map_err(|_| AppError::validation("image", "upload is not a valid image"))
    }
}

impl PostForm {
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(AppError::validation("text", "must not be empty"));
        }
        if let Some(image) = &self.image {
            image.sniff_format()?;
        }
        Ok(())
    }
}

/// Input for adding a comment to a post.
#[derive(Debug, Default, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

impl CommentForm {
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(AppError::validation("text", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest valid PNG: signature + empty IHDR is enough for sniffing.
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn post_form_requires_text() {
        let form = PostForm {
            text: "  \n ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            form.validate(),
            Err(AppError::Validation { ref field, .. }) if field == "text"
        ));
    }

    #[test]
    fn post_form_accepts_text_without_group_or_image() {
        let form = PostForm {
            text: "hello".to_string(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn post_form_accepts_png_upload() {
        let form = PostForm {
            text: "with image".to_string(),
            image: Some(ImageUpload {
                data: PNG_MAGIC.to_vec(),
                file_name: Some("pic.png".to_string()),
            }),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn post_form_rejects_non_image_upload() {
        let form = PostForm {
            text: "with attachment".to_string(),
            image: Some(ImageUpload {
                data: b"just some text pretending to be a picture".to_vec(),
                file_name: Some("notes.txt".to_string()),
            }),
            ..Default::default()
        };
        assert!(matches!(
            form.validate(),
            Err(AppError::Validation { ref field, .. }) if field == "image"
        ));
    }

    #[test]
    fn comment_form_requires_text() {
        assert!(CommentForm::default().validate().is_err());
        let ok = CommentForm {
            text: "hello".to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}
