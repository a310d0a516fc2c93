//! Image analysis service integration
//!
//! Provides the capability interface the report is built from, with a
//! client for the Azure AI Vision Image Analysis REST API and a test double.

pub mod client;
pub mod mock;
pub mod types;

pub use client::AzureVisionClient;
pub use mock::MockVisionClient;

use crate::models::{AnalysisRequest, AnalysisResult};
use async_trait::async_trait;

#[async_trait]
pub trait ImageAnalysisService: Send + Sync {
    /// Analyze one image. Every non-success outcome, transport errors
    /// included, comes back as [`AnalysisResult::Failure`].
    async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult;
}
