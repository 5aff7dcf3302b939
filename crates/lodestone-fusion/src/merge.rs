//! Fused context: fragments from succeeded paths, deduplicated by identity.
//!
//! Score = relevance × path contribution; a fragment returned by both paths
//! keeps one entry listing both sources with the scores summed. Order is by
//! score descending, ties vector-first and then first-seen. Nothing is ever
//! synthesized: every entry is a fragment some backend returned.

use std::cmp::Ordering;
use std::collections::HashMap;

use lodestone_core::models::{FusedFragment, PathKind, ScoredResult};

pub fn merge_context(
    vector: &ScoredResult,
    graph: &ScoredResult,
    vector_contribution: f64,
    graph_contribution: f64,
    max_fragments: usize,
) -> Vec<FusedFragment> {
    let mut merged: Vec<FusedFragment> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (scored, contribution) in [(vector, vector_contribution), (graph, graph_contribution)] {
        if !scored.succeeded() {
            continue;
        }
        let path = scored.source();
        for fragment in scored.items() {
            let score = fragment.relevance * contribution;
            match index.get(&fragment.id) {
                Some(&i) => {
                    let entry = &mut merged[i];
                    entry.score += score;
                    if !entry.sources.contains(&path) {
                        entry.sources.push(path);
                    }
                    if entry.fragment.citation.is_none() {
                        entry.fragment.citation.clone_from(&fragment.citation);
                    }
                }
                None => {
                    index.insert(fragment.id.clone(), merged.len());
                    merged.push(FusedFragment {
                        fragment: fragment.clone(),
                        sources: vec![path],
                        score,
                    });
                }
            }
        }
    }

    // Stable sort keeps first-seen order among equal keys.
    merged.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| vector_rank(a).cmp(&vector_rank(b)))
    });
    merged.truncate(max_fragments);
    merged
}

fn vector_rank(f: &FusedFragment) -> u8 {
    u8::from(!f.sources.contains(&PathKind::Vector))
}
