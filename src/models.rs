//! Data models and structures
//!
//! Defines the selected image, the analysis request sent to the vision
//! service, the analysis result it returns, and the runtime configuration.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A photo the user picked, copied into the application data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub local_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisFeature {
    Caption,
    DenseCaptions,
    Text,
    Tags,
    Objects,
    People,
}

impl AnalysisFeature {
    /// Every feature, in the order of the `features` query parameter.
    pub const ALL: [AnalysisFeature; 6] = [
        AnalysisFeature::Caption,
        AnalysisFeature::DenseCaptions,
        AnalysisFeature::Text,
        AnalysisFeature::Tags,
        AnalysisFeature::Objects,
        AnalysisFeature::People,
    ];

    /// Name used in the `features` query parameter.
    pub fn wire_name(self) -> &'static str {
        match self {
            AnalysisFeature::Caption => "caption",
            AnalysisFeature::DenseCaptions => "denseCaptions",
            AnalysisFeature::Text => "read",
            AnalysisFeature::Tags => "tags",
            AnalysisFeature::Objects => "objects",
            AnalysisFeature::People => "people",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub image_path: PathBuf,
    pub features: Vec<AnalysisFeature>,
    pub language: String,
    pub gender_neutral_caption: bool,
}

impl AnalysisRequest {
    pub fn new(image_path: &Path) -> Self {
        Self {
            image_path: image_path.to_path_buf(),
            features: AnalysisFeature::ALL.to_vec(),
            language: "en".to_string(),
            gender_neutral_caption: true,
        }
    }

    /// Comma-joined feature list, e.g. `caption,denseCaptions,read`.
    pub fn features_param(&self) -> String {
        self.features
            .iter()
            .map(|f| f.wire_name())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "w")]
    pub width: i32,
    #[serde(rename = "h")]
    pub height: i32,
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X={},Y={},Width={},Height={}",
            self.x, self.y, self.width, self.height
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{X={},Y={}}}", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DenseCaption {
    pub text: String,
    pub confidence: f64,
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub bounding_polygon: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectedPerson {
    pub confidence: f64,
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectedObject {
    pub name: String,
    pub confidence: f64,
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    pub confidence: f64,
}

/// A successful analysis. Categories the service did not return are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageAnalysis {
    pub caption: Option<Caption>,
    pub dense_captions: Option<Vec<DenseCaption>>,
    pub text: Option<Vec<TextLine>>,
    pub people: Option<Vec<DetectedPerson>>,
    pub objects: Option<Vec<DetectedObject>>,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    ConnectionFailure,
    AuthenticationFailure,
    InvalidInput,
    ServiceError,
    InvalidResponse,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureReason::ConnectionFailure => "ConnectionFailure",
            FailureReason::AuthenticationFailure => "AuthenticationFailure",
            FailureReason::InvalidInput => "InvalidInput",
            FailureReason::ServiceError => "ServiceError",
            FailureReason::InvalidResponse => "InvalidResponse",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisFailure {
    pub reason: FailureReason,
    pub error_code: String,
    pub message: String,
}

impl AnalysisFailure {
    pub fn new(
        reason: FailureReason,
        error_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            reason,
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Success(ImageAnalysis),
    Failure(AnalysisFailure),
}

impl AnalysisResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success(_))
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub vision_endpoint: String,
    pub vision_key: String,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            vision_endpoint: std::env::var("VISION_ENDPOINT")
                .map_err(|_| crate::Error::Config("VISION_ENDPOINT not set".to_string()))?,
            vision_key: std::env::var("VISION_KEY")
                .map_err(|_| crate::Error::Config("VISION_KEY not set".to_string()))?,
            data_dir: std::env::var("VISION_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| Self::default_data_dir()),
        })
    }

    /// Per-user data directory, or `./data` when the platform has none.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|dir| dir.join("vision-report"))
            .unwrap_or_else(|| PathBuf::from("data"))
    }
}
