use super::similarity_scorer::SimilarityScorer;
use crate::ingestion::domain::LicenseCorpus;

/// Operators that make an expression a boolean combination of licenses.
const EXPRESSION_OPERATORS: [&str; 3] = ["AND", "OR", "WITH"];

/// How a license expression was handled by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    /// Already a corpus member or a compound expression; left unchanged
    PassThrough,
    /// Replaced by the best-scoring corpus member
    Resolved,
    /// The corpus was empty, nothing to match against
    Unresolved,
}

/// Outcome of resolving one license expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    kind: ResolutionKind,
    license: Option<String>,
    score: f64,
}

impl Resolution {
    pub fn kind(&self) -> ResolutionKind {
        self.kind
    }

    /// The identifier to use, or `None` when the corpus was empty.
    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn is_pass_through(&self) -> bool {
        self.kind == ResolutionKind::PassThrough
    }

    /// True when the score reaches `min_confidence`.
    pub fn is_confident(&self, min_confidence: f64) -> bool {
        self.score >= min_confidence
    }
}

/// LicenseResolver service mapping free-text license strings onto the corpus
///
/// Unknown expressions are compared against every corpus member (a linear
/// scan, no index). Ties keep the first member in corpus order, which is
/// lexicographic.
#[derive(Debug, Clone, Copy, Default)]
pub struct LicenseResolver {
    scorer: SimilarityScorer,
}

impl LicenseResolver {
    pub fn new(scorer: SimilarityScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    /// Resolves `expression` against `corpus`.
    ///
    /// # Returns
    /// A pass-through with score 1.0 for corpus members and compound
    /// expressions, the best match and its score otherwise, or an unresolved
    /// result with score 0.0 when the corpus is empty.
    pub fn resolve(&self, expression: &str, corpus: &LicenseCorpus) -> Resolution {
        if corpus.contains(expression) || Self::is_compound(expression) {
            return Resolution {
                kind: ResolutionKind::PassThrough,
                license: Some(expression.to_string()),
                score: 1.0,
            };
        }

        let mut best: Option<(&str, f64)> = None;
        for candidate in corpus.iter() {
            let score = self.scorer.score(expression, candidate.as_str());
            // Strict comparison keeps the earliest member on ties
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((candidate.as_str(), score));
            }
        }

        match best {
            Some((license, score)) => Resolution {
                kind: ResolutionKind::Resolved,
                license: Some(license.to_string()),
                score,
            },
            None => Resolution {
                kind: ResolutionKind::Unresolved,
                license: None,
                score: 0.0,
            },
        }
    }

    /// True when `expression` contains an `AND`, `OR` or `WITH` operator
    /// with an operand on each side. Operators are case sensitive.
    pub fn is_compound(expression: &str) -> bool {
        let tokens: Vec<&str> = expression.split_whitespace().collect();
        tokens.len() >= 3
            && tokens[1..tokens.len() - 1]
                .iter()
                .any(|token| EXPRESSION_OPERATORS.contains(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> LicenseCorpus {
        LicenseCorpus::new([
            "Apache-1.1",
            "Apache-2.0",
            "BSD-3-Clause",
            "GPL-2.0-only",
            "GPL-3.0-only",
            "MIT",
        ])
        .unwrap()
    }

    #[test]
    fn test_members_pass_through() {
        let resolver = LicenseResolver::default();
        let corpus = corpus();
        for member in corpus.iter() {
            let resolution = resolver.resolve(member.as_str(), &corpus);
            assert!(resolution.is_pass_through());
            assert_eq!(resolution.license(), Some(member.as_str()));
            assert_eq!(resolution.score(), 1.0);
        }
    }

    #[test]
    fn test_compound_expression_passes_through() {
        let resolver = LicenseResolver::default();
        let expression = "GPL-2.0-only WITH Classpath-exception-2.0";
        let resolution = resolver.resolve(expression, &corpus());
        assert!(resolution.is_pass_through());
        assert_eq!(resolution.license(), Some(expression));
    }

    #[test]
    fn test_is_compound() {
        assert!(LicenseResolver::is_compound("MIT OR Apache-2.0"));
        assert!(LicenseResolver::is_compound("(MIT AND BSD-3-Clause)"));
        assert!(!LicenseResolver::is_compound("MIT or Apache-2.0"));
        assert!(!LicenseResolver::is_compound("OR MIT"));
        assert!(!LicenseResolver::is_compound("MIT AND"));
        assert!(!LicenseResolver::is_compound("ORACLE"));
        assert!(!LicenseResolver::is_compound("MIT License"));
    }

    #[test]
    fn test_resolves_variant_spelling() {
        let resolver = LicenseResolver::default();
        let resolution = resolver.resolve("MIT License", &corpus());
        assert_eq!(resolution.kind(), ResolutionKind::Resolved);
        assert_eq!(resolution.license(), Some("MIT"));
        assert!(resolution.score() > 0.0 && resolution.score() < 1.0);
    }

    #[test]
    fn test_version_steers_match() {
        let resolver = LicenseResolver::default();
        let resolution = resolver.resolve("Apache 2.0", &corpus());
        assert_eq!(resolution.license(), Some("Apache-2.0"));
        assert_eq!(resolution.score(), 1.0);
    }

    #[test]
    fn test_ties_keep_first_in_corpus_order() {
        let resolver = LicenseResolver::default();
        let corpus = LicenseCorpus::new(["zzz", "aaa"]).unwrap();
        // No common characters, every candidate scores zero
        let resolution = resolver.resolve("qqq", &corpus);
        assert_eq!(resolution.license(), Some("aaa"));
        assert_eq!(resolution.score(), 0.0);
    }

    #[test]
    fn test_empty_corpus_is_unresolved() {
        let resolver = LicenseResolver::default();
        let resolution = resolver.resolve("MIT License", &LicenseCorpus::default());
        assert_eq!(resolution.kind(), ResolutionKind::Unresolved);
        assert_eq!(resolution.license(), None);
        assert_eq!(resolution.score(), 0.0);
    }

    #[test]
    fn test_is_confident() {
        let resolver = LicenseResolver::default();
        let resolution = resolver.resolve("MIT License", &corpus());
        assert!(resolution.is_confident(0.5));
        assert!(!resolution.is_confident(0.99));
    }
}
