use super::license_resolver::LicenseResolver;
use crate::ingestion::domain::{DocumentId, LicenseCorpus, SbomDocument};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// License field rewritten by default
pub const DEFAULT_LICENSE_FIELD: &str = "licenseConcluded";

/// SPDX values that state the absence of license information
const SENTINEL_VALUES: [&str; 2] = ["NOASSERTION", "NONE"];

/// Prefix of document-local custom license references
const LICENSE_REF_PREFIX: &str = "LicenseRef-";

/// One license value replaced during normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseRewrite {
    pub document: DocumentId,
    /// SPDXID of the element holding the field, when it has one
    pub element: Option<String>,
    pub field: String,
    pub original: String,
    pub resolved: String,
    pub score: f64,
}

/// DocumentNormalizer service correcting license fields before conversion
///
/// Walks every mapping and sequence of a document and rewrites string values
/// stored under one of the targeted keys. Values that are already canonical
/// (corpus members or compound expressions) are left alone, and so is
/// everything outside the targeted keys. Normalization never fails; a poor
/// match is still applied and reported through its score.
#[derive(Debug, Clone)]
pub struct DocumentNormalizer {
    resolver: LicenseResolver,
    fields: Vec<String>,
}

impl DocumentNormalizer {
    pub fn new(resolver: LicenseResolver) -> Self {
        Self {
            resolver,
            fields: vec![DEFAULT_LICENSE_FIELD.to_string()],
        }
    }

    /// Replaces the targeted keys (e.g. to also cover `licenseDeclared`).
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Rewrites license fields of `document` in place.
    ///
    /// # Returns
    /// Every rewrite applied, in traversal order
    pub fn normalize(&self, document: &mut SbomDocument, corpus: &LicenseCorpus) -> Vec<LicenseRewrite> {
        let id = document.id().clone();
        let mut rewrites = Vec::new();
        self.visit(document.body_mut(), &id, corpus, &mut rewrites);
        rewrites
    }

    fn visit(
        &self,
        node: &mut JsonValue,
        document: &DocumentId,
        corpus: &LicenseCorpus,
        rewrites: &mut Vec<LicenseRewrite>,
    ) {
        match node {
            JsonValue::Object(map) => self.visit_mapping(map, document, corpus, rewrites),
            JsonValue::Array(items) => {
                for item in items {
                    self.visit(item, document, corpus, rewrites);
                }
            }
            _ => {}
        }
    }

    fn visit_mapping(
        &self,
        map: &mut Map<String, JsonValue>,
        document: &DocumentId,
        corpus: &LicenseCorpus,
        rewrites: &mut Vec<LicenseRewrite>,
    ) {
        let element = map
            .get("SPDXID")
            .and_then(JsonValue::as_str)
            .map(str::to_string);

        for (key, value) in map.iter_mut() {
            let targeted = self.fields.iter().any(|field| field == key);
            match value {
                JsonValue::String(text) if targeted => {
                    if let Some((resolved, score)) = self.resolve(text, corpus) {
                        rewrites.push(LicenseRewrite {
                            document: document.clone(),
                            element: element.clone(),
                            field: key.clone(),
                            original: std::mem::replace(text, resolved.clone()),
                            resolved,
                            score,
                        });
                    }
                }
                _ => self.visit(value, document, corpus, rewrites),
            }
        }
    }

    /// Returns the replacement for `text`, or `None` to keep it.
    fn resolve(&self, text: &str, corpus: &LicenseCorpus) -> Option<(String, f64)> {
        let trimmed = text.trim();
        if trimmed.is_empty()
            || SENTINEL_VALUES.contains(&trimmed)
            || trimmed.starts_with(LICENSE_REF_PREFIX)
        {
            return None;
        }

        let resolution = self.resolver.resolve(text, corpus);
        if resolution.is_pass_through() {
            return None;
        }
        let license = resolution.license()?;
        (license != text).then(|| (license.to_string(), resolution.score()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn corpus() -> LicenseCorpus {
        LicenseCorpus::new(["Apache-2.0", "GPL-2.0-only", "MIT"]).unwrap()
    }

    fn document(body: JsonValue) -> SbomDocument {
        SbomDocument::new(DocumentId::new("acme/widgets"), body)
    }

    #[test]
    fn test_rewrites_nested_concluded_license() {
        let mut doc = document(json!({
            "packages": [
                {"SPDXID": "SPDXRef-a", "licenseConcluded": "MIT License"},
                {"SPDXID": "SPDXRef-b", "licenseConcluded": "Apache-2.0"}
            ]
        }));
        let normalizer = DocumentNormalizer::new(LicenseResolver::default());

        let rewrites = normalizer.normalize(&mut doc, &corpus());

        assert_eq!(doc.body()["packages"][0]["licenseConcluded"], json!("MIT"));
        assert_eq!(doc.body()["packages"][1]["licenseConcluded"], json!("Apache-2.0"));
        assert_eq!(rewrites.len(), 1);
        assert_eq!(rewrites[0].element.as_deref(), Some("SPDXRef-a"));
        assert_eq!(rewrites[0].original, "MIT License");
        assert_eq!(rewrites[0].resolved, "MIT");
        assert_eq!(rewrites[0].field, "licenseConcluded");
    }

    #[test]
    fn test_leaves_other_structure_unchanged() {
        let body = json!({
            "name": "MIT License",
            "licenseDeclared": "MIT License",
            "deep": {"deeper": [{"list": [1, 2, {"licenseConcluded": "GPL-2.0-only OR MIT"}]}]},
            "flag": true,
            "none": null
        });
        let mut doc = document(body.clone());
        let normalizer = DocumentNormalizer::new(LicenseResolver::default());

        let rewrites = normalizer.normalize(&mut doc, &corpus());

        assert!(rewrites.is_empty());
        assert_eq!(doc.body(), &body);
    }

    #[test]
    fn test_reaches_arbitrary_depth() {
        let mut doc = document(json!({"a": [{"b": {"c": [{"licenseConcluded": "apache 2.0"}]}}]}));
        let normalizer = DocumentNormalizer::new(LicenseResolver::default());

        normalizer.normalize(&mut doc, &corpus());

        assert_eq!(doc.body()["a"][0]["b"]["c"][0]["licenseConcluded"], json!("Apache-2.0"));
    }

    #[test]
    fn test_skips_sentinels_and_license_refs() {
        let body = json!({"packages": [
            {"licenseConcluded": "NOASSERTION"},
            {"licenseConcluded": "NONE"},
            {"licenseConcluded": "LicenseRef-Proprietary"},
            {"licenseConcluded": ""}
        ]});
        let mut doc = document(body.clone());
        let normalizer = DocumentNormalizer::new(LicenseResolver::default());

        assert!(normalizer.normalize(&mut doc, &corpus()).is_empty());
        assert_eq!(doc.body(), &body);
    }

    #[test]
    fn test_empty_corpus_keeps_value() {
        let body = json!({"licenseConcluded": "MIT License"});
        let mut doc = document(body.clone());
        let normalizer = DocumentNormalizer::new(LicenseResolver::default());

        assert!(normalizer.normalize(&mut doc, &LicenseCorpus::default()).is_empty());
        assert_eq!(doc.body(), &body);
    }

    #[test]
    fn test_configurable_fields() {
        let mut doc = document(json!({
            "licenseConcluded": "MIT License",
            "licenseDeclared": "Apache License 2.0"
        }));
        let normalizer = DocumentNormalizer::new(LicenseResolver::default())
            .with_fields(["licenseConcluded", "licenseDeclared"]);

        let rewrites = normalizer.normalize(&mut doc, &corpus());

        assert_eq!(rewrites.len(), 2);
        assert_eq!(doc.body()["licenseDeclared"], json!("Apache-2.0"));
        assert_eq!(normalizer.fields().len(), 2);
    }

    #[test]
    fn test_non_string_license_field_is_traversed() {
        let mut doc = document(json!({"licenseConcluded": {"licenseConcluded": "MIT License"}}));
        let normalizer = DocumentNormalizer::new(LicenseResolver::default());

        normalizer.normalize(&mut doc, &corpus());

        assert_eq!(doc.body()["licenseConcluded"]["licenseConcluded"], json!("MIT"));
    }
}
