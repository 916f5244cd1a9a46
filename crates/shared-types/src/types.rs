use std::fmt;

/// Number of characters shown in the document preview
pub const PREVIEW_CHARS: usize = 2000;

/// Declared media type of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Pdf,
    Docx,
    Plain,
}

impl MediaType {
    pub const PDF_MIME: &'static str = "application/pdf";
    pub const DOCX_MIME: &'static str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    /// Map a declared MIME type. Anything that is not PDF or Word is decoded as text.
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_lowercase().as_str() {
            Self::PDF_MIME => MediaType::Pdf,
            Self::DOCX_MIME => MediaType::Docx,
            _ => MediaType::Plain,
        }
    }

    /// Guess from a file name extension (pdf, docx, txt)
    pub fn from_file_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => MediaType::Pdf,
            "docx" => MediaType::Docx,
            _ => MediaType::Plain,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => Self::PDF_MIME,
            MediaType::Docx => Self::DOCX_MIME,
            MediaType::Plain => "text/plain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    pub name: String,
    pub media_type: MediaType,
    pub raw_text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, media_type: MediaType, raw_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            media_type,
            raw_text: raw_text.into(),
        }
    }

    /// First `chars` characters of the raw text
    pub fn excerpt(&self, chars: usize) -> &str {
        char_prefix(&self.raw_text, chars)
    }

    /// Preview shown right after upload
    pub fn preview(&self) -> String {
        format!("{} ...", self.excerpt(PREVIEW_CHARS))
    }
}

/// Prefix of `text` holding at most `chars` characters, cut on a char boundary
pub fn char_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLabel {
    High,
    Medium,
    Low,
    Unknown,
}

impl RiskLabel {
    /// The three labels a tally reports, in display order
    pub const TALLIED: [RiskLabel; 3] = [RiskLabel::High, RiskLabel::Medium, RiskLabel::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::High => "high",
            RiskLabel::Medium => "medium",
            RiskLabel::Low => "low",
            RiskLabel::Unknown => "unknown",
        }
    }

    pub fn capitalized(&self) -> &'static str {
        match self {
            RiskLabel::High => "High",
            RiskLabel::Medium => "Medium",
            RiskLabel::Low => "Low",
            RiskLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Clause {
    pub text: String,
    pub matched_keyword: String,
    pub risk_label: RiskLabel,
}

impl Clause {
    /// A freshly matched clause, not yet classified
    pub fn unclassified(text: impl Into<String>, matched_keyword: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matched_keyword: matched_keyword.into(),
            risk_label: RiskLabel::Unknown,
        }
    }
}

/// Per-label clause counts. Always reports all three labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RiskTally {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskTally {
    /// Count one label. `Unknown` is ignored.
    pub fn record(&mut self, label: RiskLabel) {
        match label {
            RiskLabel::High => self.high += 1,
            RiskLabel::Medium => self.medium += 1,
            RiskLabel::Low => self.low += 1,
            RiskLabel::Unknown => {}
        }
    }

    pub fn get(&self, label: RiskLabel) -> usize {
        match label {
            RiskLabel::High => self.high,
            RiskLabel::Medium => self.medium,
            RiskLabel::Low => self.low,
            RiskLabel::Unknown => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }

    /// `(label, count)` pairs in high, medium, low order
    pub fn entries(&self) -> [(RiskLabel, usize); 3] {
        RiskLabel::TALLIED.map(|label| (label, self.get(label)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub message: String,
}

impl ChatTurn {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            message: message.into(),
        }
    }

    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct GlossaryEntry {
    pub term: &'static str,
    pub definition: &'static str,
}
