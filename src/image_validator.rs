// src/image_validator.rs
use tracing::{info, warn};

/// Upper bound for profile pictures (2 MiB)
pub const MAX_PICTURE_BYTES: u64 = 2 * 1024 * 1024;

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];
const GIF87_SIGNATURE: &[u8] = b"GIF87a";
const GIF89_SIGNATURE: &[u8] = b"GIF89a";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
}

impl ImageFormat {
    /// Identify the format from the leading bytes of the file
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PNG_SIGNATURE) {
            Some(Self::Png)
        } else if bytes.starts_with(JPEG_SIGNATURE) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(GIF87_SIGNATURE) || bytes.starts_with(GIF89_SIGNATURE) {
            Some(Self::Gif)
        } else {
            None
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }

    pub fn accepts_extension(self, extension: &str) -> bool {
        match self {
            Self::Jpeg => matches!(extension, "jpg" | "jpeg"),
            Self::Png => extension == "png",
            Self::Gif => extension == "gif",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageValidationError {
    pub error_type: ImageErrorType,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageErrorType {
    WrongFormat,
    TooLarge,
}

impl ImageErrorType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::WrongFormat => "IMAGE_WRONG_FORMAT",
            Self::TooLarge => "IMAGE_TOO_LARGE",
        }
    }
}

pub struct ImageValidator {
    max_bytes: u64,
}

impl Default for ImageValidator {
    fn default() -> Self {
        Self::new(MAX_PICTURE_BYTES)
    }
}

impl ImageValidator {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Validate an uploaded profile picture. The format check comes first and
    /// looks at the content only, never at the client file name.
    pub fn validate_profile_image(
        &self,
        bytes: &[u8],
    ) -> Result<ImageFormat, ImageValidationError> {
        let Some(format) = ImageFormat::sniff(bytes) else {
            warn!("Rejected profile picture with unrecognized content");
            return Err(ImageValidationError {
                error_type: ImageErrorType::WrongFormat,
                message: "Only JPG, PNG, and GIF images are allowed.".to_string(),
                suggestion: "Please upload a JPEG, PNG or GIF image".to_string(),
            });
        };

        let size = bytes.len() as u64;
        if size > self.max_bytes {
            warn!(
                "Rejected profile picture: {:.1}MB exceeds limit",
                size as f64 / 1024.0 / 1024.0
            );
            return Err(ImageValidationError {
                error_type: ImageErrorType::TooLarge,
                message: format!(
                    "Profile picture must be smaller than {} MB.",
                    format_megabytes(self.max_bytes)
                ),
                suggestion: "Please resize or compress your image and try again".to_string(),
            });
        }

        info!(
            "Profile picture validation passed: {} ({} bytes)",
            format.mime_type(),
            size
        );
        Ok(format)
    }
}

/// `2097152` → `"2"`, `1572864` → `"1.5"`
pub fn format_megabytes(bytes: u64) -> String {
    let megabytes = bytes as f64 / 1024.0 / 1024.0;
    if megabytes.fract() == 0.0 {
        format!("{}", megabytes as u64)
    } else {
        format!("{:.1}", megabytes)
    }
}

#[cfg(test)]
pub(crate) fn png_bytes(len: usize) -> Vec<u8> {
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.resize(len.max(PNG_SIGNATURE.len()), 0);
    bytes
}
