use super::types::{AnalyzeResponse, ErrorResponse};
use super::ImageAnalysisService;
use crate::models::{AnalysisFailure, AnalysisRequest, AnalysisResult, FailureReason, ImageAnalysis};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};

const API_VERSION: &str = "2023-10-01";
const ANALYZE_PATH: &str = "/computervision/imageanalysis:analyze";

/// REST client for the Azure AI Vision Image Analysis 4.0 API.
pub struct AzureVisionClient {
    client: Client,
    endpoint: String,
    key: String,
}

impl AzureVisionClient {
    pub fn new(endpoint: String, key: String) -> Self {
        Self::new_with_client(endpoint, key, Client::new())
    }

    /// `endpoint` is the resource URL, e.g. `https://<name>.cognitiveservices.azure.com/`.
    pub fn new_with_client(endpoint: String, key: String, client: Client) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            key,
        }
    }

    async fn send(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<ImageAnalysis, AnalysisFailure> {
        let image = tokio::fs::read(&request.image_path).await.map_err(|e| {
            tracing::error!("Failed to read {}: {}", request.image_path.display(), e);
            AnalysisFailure::new(
                FailureReason::InvalidInput,
                "FileReadError",
                format!("Failed to read {}: {}", request.image_path.display(), e),
            )
        })?;

        let url = format!("{}{}", self.endpoint, ANALYZE_PATH);
        let features = request.features_param();
        let gender_neutral = if request.gender_neutral_caption {
            "true"
        } else {
            "false"
        };

        tracing::debug!(
            "Sending {} bytes to {} (features: {})",
            image.len(),
            url,
            features
        );

        let response = self
            .client
            .post(&url)
            .query(&[
                ("api-version", API_VERSION),
                ("features", features.as_str()),
                ("language", request.language.as_str()),
                ("gender-neutral-caption", gender_neutral),
            ])
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Image Analysis: {}", e);
                AnalysisFailure::new(FailureReason::ConnectionFailure, "Transport", e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read Image Analysis response: {}", e);
            AnalysisFailure::new(FailureReason::ConnectionFailure, "Transport", e.to_string())
        })?;

        if !status.is_success() {
            tracing::error!("Image Analysis API error (status {}): {}", status, body);
            return Err(failure_from_status(status, &body));
        }

        let parsed: AnalyzeResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Image Analysis response: {}\nBody: {}", e, body);
            AnalysisFailure::new(
                FailureReason::InvalidResponse,
                "ParseError",
                format!("Failed to parse Image Analysis response: {}", e),
            )
        })?;

        if let Some(version) = &parsed.model_version {
            tracing::debug!("Analyzed with model version {}", version);
        }

        Ok(parsed.into())
    }
}

fn failure_from_status(status: StatusCode, body: &str) -> AnalysisFailure {
    let reason = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FailureReason::AuthenticationFailure,
        s if s.is_client_error() => FailureReason::InvalidInput,
        _ => FailureReason::ServiceError,
    };

    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => AnalysisFailure::new(reason, parsed.error.code, parsed.error.message),
        Err(_) => {
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                body.to_string()
            };
            AnalysisFailure::new(reason, status.as_u16().to_string(), message)
        }
    }
}

#[async_trait]
impl ImageAnalysisService for AzureVisionClient {
    async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        match self.send(request).await {
            Ok(analysis) => {
                tracing::info!("Image analysis succeeded for {}", request.image_path.display());
                AnalysisResult::Success(analysis)
            }
            Err(failure) => {
                tracing::warn!(
                    "Image analysis failed ({}, {}): {}",
                    failure.reason,
                    failure.error_code,
                    failure.message
                );
                AnalysisResult::Failure(failure)
            }
        }
    }
}
