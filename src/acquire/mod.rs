//! Photo acquisition and local storage
//!
//! Obtains a photo from a picker and copies it into the application data
//! directory so later analysis reads a stable local file.

pub mod acquirer;
pub mod mock;
pub mod picker;

pub use acquirer::ImageAcquirer;
pub use mock::MockPhotoPicker;
pub use picker::FilePathPicker;

use crate::Result;
use async_trait::async_trait;
use tokio::io::AsyncRead;

/// A photo chosen by the user: its original file name and a stream of its bytes.
pub struct PickedPhoto {
    pub file_name: String,
    pub reader: Box<dyn AsyncRead + Send + Unpin>,
}

impl PickedPhoto {
    pub fn new(
        file_name: impl Into<String>,
        reader: impl AsyncRead + Send + Unpin + 'static,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            reader: Box::new(reader),
        }
    }
}

#[async_trait]
pub trait PhotoPicker: Send + Sync {
    /// Returns `None` when the user cancels the pick.
    async fn pick_photo(&self) -> Result<Option<PickedPhoto>>;
}
