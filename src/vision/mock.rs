use super::ImageAnalysisService;
use crate::models::{AnalysisRequest, AnalysisResult, Caption, ImageAnalysis};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub struct MockVisionClient {
    responses: Arc<Mutex<Vec<AnalysisResult>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<AnalysisRequest>>>,
}

impl MockVisionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_response(self, response: AnalysisResult) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_request(&self) -> Option<AnalysisRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Default for MockVisionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageAnalysisService for MockVisionClient {
    async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        *self.last_request.lock().unwrap() = Some(request.clone());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            AnalysisResult::Success(ImageAnalysis {
                caption: Some(Caption {
                    text: "a mock image".to_string(),
                    confidence: 1.0,
                }),
                ..Default::default()
            })
        } else {
            let index = (*count - 1) % responses.len();
            responses[index].clone()
        }
    }
}
