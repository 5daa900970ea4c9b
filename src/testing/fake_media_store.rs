use std::sync::Mutex;

use crate::domain::{AppError, StagedMedia};
use crate::ports::MediaStore;

pub struct FakeMediaStore {
    pub uploaded: Mutex<Vec<String>>,
    response: Result<String, String>,
}

impl FakeMediaStore {
    pub fn returning(url: impl Into<String>) -> Self {
        Self { uploaded: Mutex::new(Vec::new()), response: Ok(url.into()) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { uploaded: Mutex::new(Vec::new()), response: Err(message.into()) }
    }

    pub fn uploads(&self) -> Vec<String> {
        self.uploaded.lock().unwrap().clone()
    }
}

impl MediaStore for FakeMediaStore {
    fn upload(&self, media: &StagedMedia) -> Result<String, AppError> {
        self.uploaded.lock().unwrap().push(media.file_name().to_string());
        self.response.clone().map_err(AppError::Upload)
    }
}
