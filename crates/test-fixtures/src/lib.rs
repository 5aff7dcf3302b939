//! Test fixtures for Lodestone: JSON evidence sets and mock collaborators.
//!
//! Fault and latency injection is done by handing these mocks to the
//! orchestrator and pipeline in place of the HTTP clients.

pub mod mocks;

use std::path::PathBuf;

use lodestone_core::models::EvidenceFragment;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Evidence one backend returns for one query.
#[derive(Debug, Clone, Deserialize)]
pub struct EvidenceFixture {
    pub query: String,
    pub path: String,
    pub fragments: Vec<EvidenceFragment>,
}

/// Load an evidence set from `data/evidence/<name>.json`.
pub fn load_evidence(name: &str) -> EvidenceFixture {
    load_fixture(&format!("evidence/{name}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVIDENCE: [&str; 4] = [
        "in_domain_vector",
        "in_domain_graph",
        "off_domain_vector",
        "off_domain_graph",
    ];

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "fixture data directory not found");
    }

    #[test]
    fn all_evidence_files_parse() {
        for name in EVIDENCE {
            assert!(fixture_exists(&format!("evidence/{name}.json")), "Missing fixture: {name}");
            let fixture = load_evidence(name);
            assert!(!fixture.query.is_empty());
            assert!(fixture.path == "vector" || fixture.path == "graph");
        }
    }

    #[test]
    fn in_domain_graph_evidence_cites_regulations() {
        let fixture = load_evidence("in_domain_graph");
        assert!(fixture.fragments.iter().all(|f| f.citation.is_some()));
    }

    #[test]
    fn off_domain_evidence_is_low_relevance() {
        for name in ["off_domain_vector", "off_domain_graph"] {
            let fixture = load_evidence(name);
            assert!(fixture.fragments.iter().all(|f| f.relevance < 0.2), "{name}");
        }
    }
}
