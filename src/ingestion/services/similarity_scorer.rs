use super::identifier_normalizer::IdentifierNormalizer;
use crate::shared::error::IngestError;

/// Default multiplier applied when two identifiers do not share a version
pub const DEFAULT_DAMPENING_WEIGHT: f64 = 0.9;

/// Winkler prefix scale
const PREFIX_SCALE: f64 = 0.1;

/// Longest common prefix that earns the Winkler bonus
const MAX_PREFIX_LENGTH: usize = 4;

/// SimilarityScorer service comparing two identifiers
///
/// The base score is Jaro-Winkler over the normalized forms. The result is
/// multiplied by the dampening weight unless both raw inputs carry the same
/// version token (the first run of ASCII digits). No threshold is applied
/// here; callers decide what counts as a good match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScorer {
    dampening_weight: f64,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self {
            dampening_weight: DEFAULT_DAMPENING_WEIGHT,
        }
    }
}

impl SimilarityScorer {
    /// Creates a scorer with a custom dampening weight in `[0, 1]`.
    pub fn new(dampening_weight: f64) -> Result<Self, IngestError> {
        if !(0.0..=1.0).contains(&dampening_weight) {
            return Err(IngestError::Validation {
                message: format!(
                    "Dampening weight must be between 0 and 1, got {}",
                    dampening_weight
                ),
            });
        }
        Ok(Self { dampening_weight })
    }

    pub fn dampening_weight(&self) -> f64 {
        self.dampening_weight
    }

    /// Scores `a` against `b`. Always within `[0, 1]`.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        let base = Self::base_score(a, b);
        match (Self::version_token(a), Self::version_token(b)) {
            (Some(va), Some(vb)) if va == vb => base,
            _ => base * self.dampening_weight,
        }
    }

    /// Jaro-Winkler over the normalized forms, without version dampening.
    pub fn base_score(a: &str, b: &str) -> f64 {
        jaro_winkler(
            &IdentifierNormalizer::normalize(a),
            &IdentifierNormalizer::normalize(b),
        )
    }

    /// First run of ASCII digits in the raw (non-normalized) input.
    pub fn version_token(raw: &str) -> Option<&str> {
        let start = raw.find(|c: char| c.is_ascii_digit())?;
        let rest = &raw[start..];
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }
}

/// Jaro similarity of two strings.
pub fn jaro(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (len_a, len_b) = (a.len(), b.len());

    if len_a == 0 && len_b == 0 {
        return 1.0;
    }
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let window = (len_a.max(len_b) / 2).saturating_sub(1);
    let mut matched_a = vec![false; len_a];
    let mut matched_b = vec![false; len_b];
    let mut matches = 0usize;

    for (i, ca) in a.iter().enumerate() {
        let lo = i.saturating_sub(window);
        let hi = (i + window + 1).min(len_b);
        for j in lo..hi {
            if !matched_b[j] && b[j] == *ca {
                matched_a[i] = true;
                matched_b[j] = true;
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Half the number of matched characters that appear out of order
    let mut transpositions = 0usize;
    let mut k = 0usize;
    for (i, ca) in a.iter().enumerate() {
        if !matched_a[i] {
            continue;
        }
        while !matched_b[k] {
            k += 1;
        }
        if *ca != b[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    let t = (transpositions / 2) as f64;
    (m / len_a as f64 + m / len_b as f64 + (m - t) / m) / 3.0
}

/// Jaro-Winkler similarity with prefix scale 0.1 and a prefix of at most 4.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
    let base = jaro(a, b);
    let prefix = a
        .chars()
        .zip(b.chars())
        .take(MAX_PREFIX_LENGTH)
        .take_while(|(ca, cb)| ca == cb)
        .count();
    (base + prefix as f64 * PREFIX_SCALE * (1.0 - base)).min(1.0)
}
