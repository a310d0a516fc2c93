//! Session state tying photo selection to analysis.

use crate::acquire::{ImageAcquirer, PhotoPicker};
use crate::models::{AnalysisRequest, AnalysisResult, Config, SelectedImage};
use crate::report;
use crate::vision::{AzureVisionClient, ImageAnalysisService};
use crate::{Error, Result};
use tracing::info;

/// Owns the collaborators and the current selection for one run of the app.
pub struct Session {
    picker: Box<dyn PhotoPicker>,
    acquirer: ImageAcquirer,
    analyzer: Box<dyn ImageAnalysisService>,
    selection: Option<SelectedImage>,
}

/// Injectable service bundle used to construct [`Session`] in tests/harnesses.
pub struct SessionServices {
    pub picker: Box<dyn PhotoPicker>,
    pub acquirer: ImageAcquirer,
    pub analyzer: Box<dyn ImageAnalysisService>,
}

impl Session {
    pub fn new(services: SessionServices) -> Self {
        Self {
            picker: services.picker,
            acquirer: services.acquirer,
            analyzer: services.analyzer,
            selection: None,
        }
    }

    /// Build a session backed by the Azure client from configuration.
    pub fn from_config(config: &Config, picker: Box<dyn PhotoPicker>) -> Self {
        info!("Image Analysis endpoint: {}", config.vision_endpoint);
        info!("Data directory: {}", config.data_dir.display());

        Self::new(SessionServices {
            picker,
            acquirer: ImageAcquirer::new(&config.data_dir),
            analyzer: Box::new(AzureVisionClient::new(
                config.vision_endpoint.clone(),
                config.vision_key.clone(),
            )),
        })
    }

    pub fn current_selection(&self) -> Option<&SelectedImage> {
        self.selection.as_ref()
    }

    /// Pick and store a photo. The previous selection is kept when the pick
    /// is cancelled or the copy fails.
    pub async fn select_picture(&mut self) -> Result<Option<SelectedImage>> {
        let selected = self
            .acquirer
            .pick_and_store_image(self.picker.as_ref())
            .await?;

        if let Some(image) = &selected {
            info!("Selected {}", image.local_path.display());
            self.selection = Some(image.clone());
        }

        Ok(selected)
    }

    /// Analyze the current selection and render the report.
    pub async fn analyze(&self) -> Result<String> {
        let result = self.analysis().await?;
        Ok(report::render(&result))
    }

    /// Analyze the current selection, returning the unrendered result.
    pub async fn analysis(&self) -> Result<AnalysisResult> {
        let image = self.selection.as_ref().ok_or(Error::NoSelection)?;
        let request = AnalysisRequest::new(&image.local_path);

        info!("Analyzing {}", image.file_name);
        Ok(self.analyzer.analyze(&request).await)
    }
}
