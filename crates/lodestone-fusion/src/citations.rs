//! Regulation citation detection.
//!
//! Recognizes `30 CFR 75.380`, `30 C.F.R. § 57.5005`, and bare section
//! references such as `§ 56.12016`, normalized to `30 CFR <part>.<section>`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use lodestone_core::models::EvidenceFragment;
use regex::Regex;

static CITATION_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\b30\s+C\.?\s*F\.?\s*R\.?\s*(?:§{1,2}\s*)?|§{1,2}\s*)(\d{1,3})\.(\d{1,5})\b").ok()
});

/// Normalized citations found in `text`, in order of first appearance.
pub fn extract_citations(text: &str) -> Vec<String> {
    let Some(re) = CITATION_RE.as_ref() else {
        return Vec::new();
    };
    let mut seen = BTreeSet::new();
    re.captures_iter(text)
        .filter_map(|caps| {
            let part = caps.get(1)?.as_str();
            let section = caps.get(2)?.as_str();
            let normalized = format!("30 CFR {part}.{section}");
            seen.insert(normalized.clone()).then_some(normalized)
        })
        .collect()
}

/// Citations carried by a fragment, from its `citation` field and its content.
pub fn fragment_citations(fragment: &EvidenceFragment) -> BTreeSet<String> {
    let mut citations: BTreeSet<String> = extract_citations(&fragment.content).into_iter().collect();
    if let Some(explicit) = &fragment.citation {
        citations.extend(extract_citations(explicit));
    }
    citations
}

/// All citations across a set of fragments.
pub fn citation_set(fragments: &[EvidenceFragment]) -> BTreeSet<String> {
    fragments.iter().flat_map(fragment_citations).collect()
}

/// Whether any fragment cites a specific regulation.
pub fn cites_regulation(fragments: &[EvidenceFragment]) -> bool {
    fragments.iter().any(|f| !fragment_citations(f).is_empty())
}
