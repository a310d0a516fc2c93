use super::{PhotoPicker, PickedPhoto};
use crate::Result;
use async_trait::async_trait;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

#[derive(Clone)]
enum MockPick {
    Cancel,
    Photo { file_name: String, bytes: Vec<u8> },
    Failure { file_name: String, bytes: Vec<u8> },
}

#[derive(Clone)]
pub struct MockPhotoPicker {
    pick: Arc<Mutex<MockPick>>,
    pick_count: Arc<Mutex<usize>>,
}

impl MockPhotoPicker {
    /// A picker whose user always cancels.
    pub fn new() -> Self {
        Self {
            pick: Arc::new(Mutex::new(MockPick::Cancel)),
            pick_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_photo(self, file_name: &str, bytes: Vec<u8>) -> Self {
        *self.pick.lock().unwrap() = MockPick::Photo {
            file_name: file_name.to_string(),
            bytes,
        };
        self
    }

    /// The stream yields `bytes` and then fails.
    pub fn with_failure(self, file_name: &str, bytes: Vec<u8>) -> Self {
        self.set_failure(file_name, bytes);
        self
    }

    /// Like [`Self::with_failure`], applied to every clone of this picker.
    pub fn set_failure(&self, file_name: &str, bytes: Vec<u8>) {
        *self.pick.lock().unwrap() = MockPick::Failure {
            file_name: file_name.to_string(),
            bytes,
        };
    }

    pub fn get_pick_count(&self) -> usize {
        *self.pick_count.lock().unwrap()
    }
}

impl Default for MockPhotoPicker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PhotoPicker for MockPhotoPicker {
    async fn pick_photo(&self) -> Result<Option<PickedPhoto>> {
        *self.pick_count.lock().unwrap() += 1;

        let pick = self.pick.lock().unwrap().clone();
        Ok(match pick {
            MockPick::Cancel => None,
            MockPick::Photo { file_name, bytes } => {
                Some(PickedPhoto::new(file_name, io::Cursor::new(bytes)))
            }
            MockPick::Failure { file_name, bytes } => {
                Some(PickedPhoto::new(file_name, FailingReader { remaining: bytes }))
            }
        })
    }
}

struct FailingReader {
    remaining: Vec<u8>,
}

impl AsyncRead for FailingReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.remaining.is_empty() {
            return Poll::Ready(Err(io::Error::other("Mock read failure")));
        }

        let n = self.remaining.len().min(buf.remaining());
        buf.put_slice(&self.remaining[..n]);
        self.remaining = self.remaining.split_off(n);
        Poll::Ready(Ok(()))
    }
}
