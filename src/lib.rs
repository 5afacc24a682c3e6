pub mod cli;
pub mod core;
pub mod environment;
pub mod error;
pub mod image_validator;
pub mod normalizer;
pub mod picture_path;
pub mod render;
pub mod types;
pub mod utils;
pub mod web;

pub use environment::EnvironmentConfig;
pub use error::{ConversionError, FlowError, RenderError, StorageError};
pub use normalizer::{FieldErrors, FormField, Normalizer, PictureUpload, RawSubmission};
pub use picture_path::{safe_profile_picture_path, SafePicturePath};
pub use types::{ResumeRecord, TemplateSelector};
pub use web::{build_rocket, start_web_server};
