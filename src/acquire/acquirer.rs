use super::{PhotoPicker, PickedPhoto};
use crate::models::SelectedImage;
use crate::Result;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

pub struct ImageAcquirer {
    data_dir: PathBuf,
}

impl ImageAcquirer {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Ask the picker for a photo and store a copy of it.
    ///
    /// A cancelled pick yields `Ok(None)` and writes nothing.
    pub async fn pick_and_store_image(
        &self,
        picker: &dyn PhotoPicker,
    ) -> Result<Option<SelectedImage>> {
        let Some(photo) = picker.pick_photo().await? else {
            info!("Photo pick cancelled");
            return Ok(None);
        };

        Ok(Some(self.store(photo).await?))
    }

    /// Copy the photo's stream into `<data_dir>/<file_name>`, replacing any
    /// earlier copy of the same name.
    ///
    /// The bytes land in `.<file_name>.part` first and are renamed into place
    /// once fully flushed, so a failed copy never touches the earlier copy.
    pub async fn store(&self, photo: PickedPhoto) -> Result<SelectedImage> {
        let PickedPhoto {
            file_name,
            mut reader,
        } = photo;
        let file_name = local_file_name(&file_name)?;

        tokio::fs::create_dir_all(&self.data_dir).await?;
        let local_path = self.data_dir.join(&file_name);
        let part_path = self.data_dir.join(format!(".{}.part", file_name));

        let mut file = File::create(&part_path).await?;
        let copied = async {
            let bytes = tokio::io::copy(&mut reader, &mut file).await?;
            file.flush().await?;
            Ok::<_, io::Error>(bytes)
        }
        .await;
        drop(file);
        drop(reader);

        let stored = match copied {
            Ok(bytes) => tokio::fs::rename(&part_path, &local_path)
                .await
                .map(|_| bytes),
            Err(e) => Err(e),
        };

        match stored {
            Ok(bytes) => {
                info!(
                    "Stored {} ({} bytes) at {}",
                    file_name,
                    bytes,
                    local_path.display()
                );
                Ok(SelectedImage {
                    file_name,
                    local_path,
                })
            }
            Err(e) => {
                warn!("Copy to {} failed: {}", local_path.display(), e);
                if let Err(remove_err) = tokio::fs::remove_file(&part_path).await {
                    warn!(
                        "Failed to remove partial file {}: {}",
                        part_path.display(),
                        remove_err
                    );
                }
                Err(e.into())
            }
        }
    }
}

/// Keep only the final path component so a picked name stays inside the data dir.
fn local_file_name(name: &str) -> io::Result<String> {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Picked photo has no usable file name: {:?}", name),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquire::MockPhotoPicker;
    use crate::Error;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_store_copies_bytes() {
        let dir = TempDir::new().unwrap();
        let acquirer = ImageAcquirer::new(dir.path());
        let picker = MockPhotoPicker::new().with_photo("cat.jpg", b"jpeg bytes".to_vec());

        let selected = acquirer
            .pick_and_store_image(&picker)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(selected.file_name, "cat.jpg");
        assert_eq!(selected.local_path, dir.path().join("cat.jpg"));
        assert_eq!(std::fs::read(&selected.local_path).unwrap(), b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_cancelled_pick_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let acquirer = ImageAcquirer::new(&dir.path().join("store"));
        let picker = MockPhotoPicker::new();

        let selected = acquirer.pick_and_store_image(&picker).await.unwrap();

        assert!(selected.is_none());
        assert!(!dir.path().join("store").exists());
        assert_eq!(picker.get_pick_count(), 1);
    }

    #[tokio::test]
    async fn test_repeat_pick_overwrites() {
        let dir = TempDir::new().unwrap();
        let acquirer = ImageAcquirer::new(dir.path());

        let first =
            MockPhotoPicker::new().with_photo("cat.jpg", b"a much longer first copy".to_vec());
        acquirer.pick_and_store_image(&first).await.unwrap();

        let second = MockPhotoPicker::new().with_photo("cat.jpg", b"second".to_vec());
        let selected = acquirer
            .pick_and_store_image(&second)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(std::fs::read(&selected.local_path).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_failed_copy_removes_partial_file() {
        let dir = TempDir::new().unwrap();
        let acquirer = ImageAcquirer::new(dir.path());
        let picker = MockPhotoPicker::new().with_failure("broken.png", b"partial".to_vec());

        let err = acquirer.pick_and_store_image(&picker).await.unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(!dir.path().join("broken.png").exists());
    }

    #[tokio::test]
    async fn test_failed_copy_keeps_earlier_copy() {
        let dir = TempDir::new().unwrap();
        let acquirer = ImageAcquirer::new(dir.path());

        let good = MockPhotoPicker::new().with_photo("cat.jpg", b"good bytes".to_vec());
        acquirer.pick_and_store_image(&good).await.unwrap();

        let broken = MockPhotoPicker::new().with_failure("cat.jpg", b"bad".to_vec());
        let err = acquirer.pick_and_store_image(&broken).await.unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert_eq!(std::fs::read(dir.path().join("cat.jpg")).unwrap(), b"good bytes");
        assert!(!dir.path().join(".cat.jpg.part").exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_store_with_scripted_stream_error() {
        let dir = TempDir::new().unwrap();
        let acquirer = ImageAcquirer::new(dir.path());
        let reader = tokio_test::io::Builder::new()
            .read(b"first chunk")
            .read_error(io::Error::new(io::ErrorKind::UnexpectedEof, "stream closed"))
            .build();

        let err = acquirer
            .store(PickedPhoto::new("dog.jpg", reader))
            .await
            .unwrap_err();

        match err {
            Error::Io(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!dir.path().join("dog.jpg").exists());
    }

    #[tokio::test]
    async fn test_picked_name_is_reduced_to_file_name() {
        let dir = TempDir::new().unwrap();
        let acquirer = ImageAcquirer::new(dir.path());
        let picker = MockPhotoPicker::new().with_photo("../../etc/cat.jpg", b"x".to_vec());

        let selected = acquirer
            .pick_and_store_image(&picker)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(selected.local_path, dir.path().join("cat.jpg"));
    }

    #[test]
    fn test_local_file_name_rejects_empty() {
        assert!(local_file_name("").is_err());
        assert!(local_file_name("..").is_err());
        assert_eq!(local_file_name("photos/cat.jpg").unwrap(), "cat.jpg");
    }
}
