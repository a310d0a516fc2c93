//! Vision report - pick a photo, analyze it with Azure AI Vision, render the result
//!
//! The picked photo is copied into an application-private directory, sent to
//! the Image Analysis service, and the returned captions, tags, objects,
//! people and text regions are formatted into a plain-text report.

pub mod acquire;
pub mod app;
pub mod error;
pub mod models;
pub mod report;
pub mod vision;

pub use error::{Error, Result};
