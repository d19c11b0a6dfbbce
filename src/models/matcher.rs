//! Close-match suggestions for unknown model names.
//!
//! Lookup order: exact catalog key, then substring containment in catalog
//! order, then edit-distance similarity with a cutoff.

use std::cmp::Ordering;

use crate::providers::ModelCatalog;

/// Maximum number of similarity-based suggestions.
const MAX_CLOSE_MATCHES: usize = 3;

/// Minimum similarity ratio for a name to count as a close match.
const SIMILARITY_CUTOFF: f32 = 0.8;

/// Suggest catalog names close to `name`.
///
/// Returns `[name]` for an exact key, otherwise all keys containing `name`
/// in catalog order, otherwise up to three keys within the similarity
/// cutoff, best first.
pub fn fuzzy_match_models(name: &str, catalog: &dyn ModelCatalog) -> Vec<String> {
    let names = catalog.names();

    if names.iter().any(|n| *n == name) {
        return vec![name.to_string()];
    }

    let containing: Vec<String> = names
        .iter()
        .filter(|n| n.contains(name))
        .map(|n| n.to_string())
        .collect();
    if !containing.is_empty() {
        return containing;
    }

    let mut scored: Vec<(f32, &str)> = names
        .iter()
        .map(|n| (similarity_ratio(name, n), *n))
        .filter(|(score, _)| *score >= SIMILARITY_CUTOFF)
        .collect();
    // stable sort keeps catalog order among equal scores
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    scored.truncate(MAX_CLOSE_MATCHES);

    scored.into_iter().map(|(_, n)| n.to_string()).collect()
}

/// Levenshtein edit distance over characters.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let n = a.len();
    let m = b.len();

    if n == 0 {
        return m;
    }
    if m == 0 {
        return n;
    }

    let mut matrix = vec![vec![0usize; m + 1]; n + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        matrix[0][j] = j;
    }

    for i in 1..=n {
        for j in 1..=m {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[n][m]
}

/// Similarity ratio in `0.0..=1.0` derived from edit distance.
pub fn similarity_ratio(a: &str, b: &str) -> f32 {
    let distance = levenshtein_distance(a, b);
    let max_len = a.chars().count().max(b.chars().count());

    if max_len == 0 {
        return 1.0;
    }

    1.0 - (distance as f32 / max_len as f32)
}
