//! Fixed response text produced locally, without the generator.

use lodestone_core::models::PathKind;

/// Served instead of an answer when nothing relevant was retrieved.
/// Never restates or discusses the question itself.
pub const DOMAIN_REDIRECT: &str = "I can only help with questions about U.S. mining safety and \
health regulations enforced by MSHA (Title 30 of the Code of Federal Regulations, 30 CFR). \
No relevant regulatory evidence was found for this question. Try asking about a mining safety \
topic such as ventilation plans, respirable dust limits, escapeways, or electrical equipment \
requirements.";

/// Prefixes the extractive digest when the generator cannot answer.
pub const GENERATION_UNAVAILABLE: &str = "The answer generator is temporarily unavailable. \
The most relevant retrieved regulatory evidence is listed below.";

/// Reason attached to the 503 when neither path produced evidence.
pub const NO_EVIDENCE: &str = "both retrieval paths are unavailable; no regulatory evidence \
could be retrieved. Please retry shortly.";

/// Note appended when exactly one path failed.
pub fn partial_evidence_note(degraded: &[PathKind]) -> Option<String> {
    match degraded {
        [path] => Some(format!(
            "Note: {} search is temporarily unavailable, so this answer is based on limited evidence.",
            describe(*path)
        )),
        _ => None,
    }
}

fn describe(path: PathKind) -> &'static str {
    match path {
        PathKind::Vector => "semantic (vector)",
        PathKind::Graph => "structured regulation (graph)",
    }
}
