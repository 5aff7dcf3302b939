use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{FusionError, InputError};

/// Algorithm used to combine the two path results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionStrategy {
    WeightedLinear,
    MaxConfidence,
    #[default]
    AdvancedHybrid,
    AdaptiveFusion,
}

impl FusionStrategy {
    pub const ALL: [FusionStrategy; 4] = [
        FusionStrategy::WeightedLinear,
        FusionStrategy::MaxConfidence,
        FusionStrategy::AdvancedHybrid,
        FusionStrategy::AdaptiveFusion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WeightedLinear => "weighted_linear",
            Self::MaxConfidence => "max_confidence",
            Self::AdvancedHybrid => "advanced_hybrid",
            Self::AdaptiveFusion => "adaptive_fusion",
        }
    }
}

impl fmt::Display for FusionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FusionStrategy {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| FusionError::InvalidStrategy { name: s.to_string() })
    }
}

/// Prompt template requested by the caller. Opaque to retrieval and fusion;
/// forwarded to the generation collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    AcademicResearch,
    #[default]
    RegulatoryCompliance,
    BasicHybrid,
    ComparativeAnalysis,
    ConfidenceWeighted,
}

impl TemplateType {
    pub const ALL: [TemplateType; 5] = [
        TemplateType::AcademicResearch,
        TemplateType::RegulatoryCompliance,
        TemplateType::BasicHybrid,
        TemplateType::ComparativeAnalysis,
        TemplateType::ConfidenceWeighted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AcademicResearch => "academic_research",
            Self::RegulatoryCompliance => "regulatory_compliance",
            Self::BasicHybrid => "basic_hybrid",
            Self::ComparativeAnalysis => "comparative_analysis",
            Self::ConfidenceWeighted => "confidence_weighted",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|template| template.as_str() == s)
            .ok_or_else(|| InputError::UnknownTemplate { name: s.to_string() })
    }
}

/// A user question. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    id: Uuid,
    text: String,
    session_id: Option<String>,
    fusion_strategy: FusionStrategy,
    template_type: TemplateType,
}

impl Query {
    /// Create a query. Text is trimmed; blank text is rejected.
    pub fn new(
        text: impl AsRef<str>,
        fusion_strategy: FusionStrategy,
        template_type: TemplateType,
    ) -> Result<Self, InputError> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(InputError::EmptyQuery);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            session_id: None,
            fusion_strategy,
            template_type,
        })
    }

    /// Attach an opaque session correlation key.
    pub fn with_session(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id.filter(|s| !s.trim().is_empty());
        self
    }

    /// Reject text longer than `max_chars` characters.
    pub fn check_length(&self, max_chars: usize) -> Result<(), InputError> {
        let len = self.text.chars().count();
        if len > max_chars {
            return Err(InputError::QueryTooLong {
                len,
                max: max_chars,
            });
        }
        Ok(())
    }

    /// Per-query correlation id for logs.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn fusion_strategy(&self) -> FusionStrategy {
        self.fusion_strategy
    }

    pub fn template_type(&self) -> TemplateType {
        self.template_type
    }
}
