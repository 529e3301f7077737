//! User profile and profile image upload payload.

use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// Largest profile image the service accepts (100 KiB).
pub const MAX_PROFILE_IMAGE_BYTES: usize = 100 * 1024;

/// The signed-in user's profile as returned by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Server-assigned and immutable.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub profile_image: String,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Whether the server holds a real uploaded image.
    ///
    /// Accounts that never uploaded one get an empty string or a URI ending
    /// in a literal `null` segment.
    pub fn has_custom_image(&self) -> bool {
        let uri = self.profile_image.trim();
        !uri.is_empty() && !uri.ends_with("/null") && uri != "null"
    }
}

/// Accepted profile image encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

    /// Detect the format from the leading bytes of the file.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&Self::PNG_MAGIC) {
            Some(Self::Png)
        } else if bytes.starts_with(&Self::JPEG_MAGIC) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// A validated image ready for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileImage {
    format: ImageFormat,
    file_name: String,
    bytes: Vec<u8>,
}

impl ProfileImage {
    /// Validate and wrap raw image bytes.
    ///
    /// The format is taken from the file content, not the name. If
    /// `file_name` is empty a name is derived from the detected format.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if bytes.len() > MAX_PROFILE_IMAGE_BYTES {
            return Err(ImageError::TooLarge {
                size: bytes.len(),
                limit: MAX_PROFILE_IMAGE_BYTES,
            });
        }
        let format = ImageFormat::sniff(&bytes).ok_or(ImageError::UnsupportedFormat)?;
        let mut file_name = file_name.into();
        if file_name.trim().is_empty() {
            file_name = format!("profile.{}", format.extension());
        }
        Ok(Self {
            format,
            file_name,
            bytes,
        })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
