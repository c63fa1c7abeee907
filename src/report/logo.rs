//! Header logo loading
//!
//! A missing or undecodable logo never fails a report; the header is
//! printed without it.

use std::path::Path;

use printpdf::image_crate::{self, DynamicImage};

#[derive(Debug, Clone)]
pub enum LogoAsset {
    Loaded(DynamicImage),
    Unavailable { reason: String },
}

impl LogoAsset {
    pub fn image(&self) -> Option<&DynamicImage> {
        match self {
            LogoAsset::Loaded(image) => Some(image),
            LogoAsset::Unavailable { .. } => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            LogoAsset::Loaded(_) => "embedded",
            LogoAsset::Unavailable { .. } => "unavailable",
        }
    }
}

/// Read and decode the logo at `path`
pub async fn load_logo(path: Option<&Path>) -> LogoAsset {
    let Some(path) = path else {
        return LogoAsset::Unavailable {
            reason: "no logo configured".to_string(),
        };
    };

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Logo could not be read");
            return LogoAsset::Unavailable { reason: e.to_string() };
        }
    };

    match image_crate::load_from_memory(&bytes) {
        Ok(image) => LogoAsset::Loaded(image),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Logo could not be decoded");
            LogoAsset::Unavailable { reason: e.to_string() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printpdf::image_crate::{GenericImageView, ImageFormat, Rgb, RgbImage};

    #[tokio::test]
    async fn test_no_path() {
        let logo = load_logo(None).await;
        assert!(logo.image().is_none());
        assert_eq!(logo.status(), "unavailable");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let logo = load_logo(Some(&dir.path().join("logo.png"))).await;
        assert!(matches!(logo, LogoAsset::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_garbage_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(load_logo(Some(&path)).await.image().is_none());
    }

    #[tokio::test]
    async fn test_valid_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");

        let mut png = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([255, 0, 0])))
            .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        std::fs::write(&path, png).unwrap();

        let logo = load_logo(Some(&path)).await;
        assert_eq!(logo.status(), "embedded");
        assert_eq!(logo.image().map(|i| i.width()), Some(8));
    }
}
