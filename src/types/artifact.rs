// ABOUTME: Desired artifact reference for a release (image repository + tag).
// ABOUTME: Compared against the image found in the currently deployed manifest.

use std::fmt;

/// The `{image, tag}` pair a deploy request pins, taken from the
/// `image.repository` and `image.tag` chart values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifact {
    image: String,
    tag: String,
}

impl Artifact {
    pub fn new(image: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            tag: tag.into(),
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub(crate) fn set_image(&mut self, image: impl Into<String>) {
        self.image = image.into();
    }

    pub(crate) fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    /// True when neither the image nor the tag was pinned.
    pub fn is_empty(&self) -> bool {
        self.image.is_empty() && self.tag.is_empty()
    }

    /// The `image:tag` string as it appears in a rendered manifest,
    /// with surrounding spaces trimmed.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.image, self.tag).trim().to_string()
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference())
    }
}
