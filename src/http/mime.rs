//! MIME type detection based on file extensions.

/// The file types the server knows how to label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeType {
    Jpg,
    Png,
    Ico,
    Css,
    Js,
    Html,
}

impl MimeType {
    pub fn content_type(&self) -> &'static str {
        match self {
            MimeType::Jpg => "image/jpg",
            MimeType::Png => "image/png",
            MimeType::Ico => "image/x-icon",
            MimeType::Css => "text/css",
            MimeType::Js => "application/js",
            MimeType::Html => "text/html",
        }
    }

    fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" => Some(MimeType::Jpg),
            "png" => Some(MimeType::Png),
            "ico" => Some(MimeType::Ico),
            "css" => Some(MimeType::Css),
            "js" => Some(MimeType::Js),
            "html" => Some(MimeType::Html),
            _ => None,
        }
    }

    /// Looks up the type for a file name by the text after its last `.`.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = match name.rfind('.') {
            Some(dot) => &name[dot + 1..],
            None => name,
        };
        let found = Self::from_extension(ext);
        if found.is_none() {
            tracing::debug!(file = name, "unrecognized file type");
        }
        found
    }
}
