use serde::{Deserialize, Serialize};

/// One piece of retrieved evidence with its backend-assigned relevance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceFragment {
    /// Stable identity used for deduplication. Backends may omit it, in which
    /// case [`EvidenceFragment::normalized`] derives it from the content.
    #[serde(default)]
    pub id: String,
    pub content: String,
    /// Raw relevance in [0, 1] as reported by the backend.
    #[serde(alias = "score")]
    pub relevance: f64,
    /// Regulation identifier this fragment cites, e.g. `30 CFR 75.380`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
}

impl EvidenceFragment {
    /// Build a fragment whose identity is the hash of its content.
    pub fn new(content: impl Into<String>, relevance: f64) -> Self {
        Self {
            id: String::new(),
            content: content.into(),
            relevance,
            citation: None,
        }
        .normalized()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_citation(mut self, citation: impl Into<String>) -> Self {
        self.citation = Some(citation.into());
        self
    }

    /// Fill a missing id from the content hash and clamp relevance to [0, 1].
    pub fn normalized(mut self) -> Self {
        if self.id.trim().is_empty() {
            self.id = content_hash(&self.content);
        }
        self.relevance = if self.relevance.is_finite() {
            self.relevance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }
}

/// blake3 hex digest of fragment content.
pub fn content_hash(content: &str) -> String {
    blake3::hash(content.trim().as_bytes()).to_hex().to_string()
}
