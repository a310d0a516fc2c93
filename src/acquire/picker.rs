use super::{PhotoPicker, PickedPhoto};
use crate::Result;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions the Image Analysis service accepts.
const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "ico", "tif", "tiff", "mpo",
];

/// Picks a photo already chosen on the command line.
pub struct FilePathPicker {
    path: Option<PathBuf>,
}

impl FilePathPicker {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[async_trait]
impl PhotoPicker for FilePathPicker {
    async fn pick_photo(&self) -> Result<Option<PickedPhoto>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        if !is_supported_image(path) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Not a supported photo format: {}", path.display()),
            )
            .into());
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = tokio::fs::File::open(path).await?;
        tracing::debug!("Picked {}", path.display());

        Ok(Some(PickedPhoto::new(file_name, file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_no_path_is_cancelled() {
        let picker = FilePathPicker::new(None);
        assert!(picker.pick_photo().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_picks_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Beach.JPG");
        std::fs::write(&path, b"sand").unwrap();

        let mut photo = FilePathPicker::new(Some(path))
            .pick_photo()
            .await
            .unwrap()
            .unwrap();

        let mut bytes = Vec::new();
        photo.reader.read_to_end(&mut bytes).await.unwrap();
        assert_eq!(photo.file_name, "Beach.JPG");
        assert_eq!(bytes, b"sand");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let picker = FilePathPicker::new(Some(dir.path().join("missing.png")));

        let err = picker.pick_photo().await.err().unwrap();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_rejects_non_image() {
        let picker = FilePathPicker::new(Some(PathBuf::from("notes.txt")));

        let err = picker.pick_photo().await.err().unwrap();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), io::ErrorKind::InvalidInput),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image(Path::new("a.jpeg")));
        assert!(is_supported_image(Path::new("a.PNG")));
        assert!(!is_supported_image(Path::new("a")));
        assert!(!is_supported_image(Path::new("a.heic")));
    }
}
