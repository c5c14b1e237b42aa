//! Resume upload

use crate::domain::communication::mailer::Attachment;

const DEFAULT_EXTENSION: &str = "pdf";

/// Document formats accepted as resumes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResumeFormat {
    /// Portable Document Format
    Pdf,

    /// Legacy Word document
    Doc,

    /// Office Open XML Word document
    Docx,
}

impl ResumeFormat {
    /// Maps a lowercase file extension to a format. Anything unrecognised is
    /// treated as a PDF.
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "doc" => Self::Doc,
            "docx" => Self::Docx,
            _ => Self::Pdf,
        }
    }

    /// The MIME type sent with the attachment
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Doc => "application/msword",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// An uploaded resume: base64 content plus what we know about the file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resume {
    file_name: Option<String>,
    extension: String,
    content: String,
}

impl Resume {
    /// Creates a resume from the uploaded payload, which may be a
    /// `data:<mime>;base64,<content>` URL or bare base64.
    pub fn new(payload: &str, file_name: Option<&str>) -> Self {
        let file_name = file_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let extension = file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, extension)| extension.trim().to_lowercase())
            .filter(|extension| !extension.is_empty())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        Self {
            file_name,
            extension,
            content: strip_data_url(payload).to_string(),
        }
    }

    /// The lowercased file extension, `pdf` when none could be derived
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The detected document format
    pub fn format(&self) -> ResumeFormat {
        ResumeFormat::from_extension(&self.extension)
    }

    /// The MIME type of the document
    pub fn content_type(&self) -> &'static str {
        self.format().content_type()
    }

    /// Raw base64 content, without any data URL prefix
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The file name as uploaded, if known
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The name of the attachment sent for `candidate`, e.g. `Jane_Doe_resume.pdf`
    pub fn attachment_name(&self, candidate: &str) -> String {
        let candidate = candidate.split_whitespace().collect::<Vec<_>>().join("_");

        format!("{candidate}_resume.{}", self.extension)
    }

    /// Builds the email attachment for `candidate`
    pub fn to_attachment(&self, candidate: &str) -> Attachment {
        Attachment::new(
            &self.attachment_name(candidate),
            &self.content,
            self.content_type(),
        )
    }
}

fn strip_data_url(payload: &str) -> &str {
    let payload = payload.trim();

    match payload.split_once(',') {
        Some((prefix, content)) if prefix.starts_with("data:") => content,
        _ => payload,
    }
}
