//! Schema metadata describing how predicates are stored.
//!
//! Entries come from an ontology (a YAML file or the built-in SPDX ontology)
//! and are installed into the [`SchemaRegistry`](crate::ingestion::registry::SchemaRegistry)
//! for the duration of a pipeline run.

use super::statement::{Predicate, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    #[default]
    One,
    Many,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Long,
    Boolean,
    Ref,
}

impl ValueType {
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ValueType::String, Value::String(_))
                | (ValueType::Long, Value::Long(_))
                | (ValueType::Boolean, Value::Boolean(_))
                | (ValueType::Ref, Value::Ref(_))
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Uniqueness {
    #[default]
    None,
    Identity,
}

macro_rules! impl_lowercase_display {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    let text = format!("{:?}", self).to_lowercase();
                    write!(f, "{}", text)
                }
            }
        )*
    };
}

impl_lowercase_display!(Cardinality, ValueType, Uniqueness);

/// One ontology entry. Absent fields install no rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub ident: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,
    #[serde(default, alias = "valueType", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    #[serde(default, alias = "uniqueness", skip_serializing_if = "Option::is_none")]
    pub unique: Option<Uniqueness>,
}

impl SchemaEntry {
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            cardinality: None,
            value_type: None,
            unique: None,
        }
    }

    pub fn cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = Some(cardinality);
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn unique(mut self, unique: Uniqueness) -> Self {
        self.unique = Some(unique);
        self
    }

    pub fn predicate(&self) -> Predicate {
        Predicate::new(self.ident.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.cardinality.is_none() && self.value_type.is_none() && self.unique.is_none()
    }
}

/// Resolved storage metadata for one predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeSchema {
    pub cardinality: Cardinality,
    pub value_type: Option<ValueType>,
    pub unique: Uniqueness,
}

impl AttributeSchema {
    pub fn is_many(&self) -> bool {
        self.cardinality == Cardinality::Many
    }

    pub fn is_identity(&self) -> bool {
        self.unique == Uniqueness::Identity
    }
}

/// Predicates emitted by the SPDX statement converter.
pub mod predicates {
    pub const DOCUMENT_NAMESPACE: &str = "document/namespace";
    pub const DOCUMENT_NAME: &str = "document/name";
    pub const DOCUMENT_SPDX_VERSION: &str = "document/spdx-version";
    pub const DOCUMENT_SOURCE: &str = "document/source";
    pub const ELEMENT_KEY: &str = "element/key";
    pub const ELEMENT_SPDX_ID: &str = "element/spdx-id";
    pub const ELEMENT_KIND: &str = "element/kind";
    pub const ELEMENT_DOCUMENT: &str = "element/document";
    pub const ELEMENT_LICENSE_CONCLUDED: &str = "element/license-concluded";
    pub const ELEMENT_LICENSE_DECLARED: &str = "element/license-declared";
    pub const PACKAGE_NAME: &str = "package/name";
    pub const PACKAGE_VERSION: &str = "package/version";
    pub const PACKAGE_PURL: &str = "package/purl";
    pub const PACKAGE_DOWNLOAD_LOCATION: &str = "package/download-location";
    pub const FILE_NAME: &str = "file/name";
    pub const LICENSE_ID: &str = "license/id";
    pub const LICENSE_COMPOUND: &str = "license/compound";
    pub const LICENSE_MEMBER: &str = "license/member";
    pub const RELATIONSHIP_DEPENDS_ON: &str = "relationship/depends-on";
    pub const RELATIONSHIP_DESCRIBES: &str = "relationship/describes";
    pub const RELATIONSHIP_CONTAINS: &str = "relationship/contains";
}

/// The built-in ontology for SPDX documents.
pub fn spdx_ontology() -> Vec<SchemaEntry> {
    use predicates::*;
    use Cardinality::{Many, One};
    use ValueType::{Boolean, Ref, String as Str};

    let entry = |ident: &str, value_type: ValueType, cardinality: Cardinality| {
        SchemaEntry::new(ident)
            .value_type(value_type)
            .cardinality(cardinality)
    };

    vec![
        entry(DOCUMENT_NAMESPACE, Str, One).unique(Uniqueness::Identity),
        entry(DOCUMENT_NAME, Str, One),
        entry(DOCUMENT_SPDX_VERSION, Str, One),
        entry(DOCUMENT_SOURCE, Str, One),
        entry(ELEMENT_KEY, Str, One).unique(Uniqueness::Identity),
        entry(ELEMENT_SPDX_ID, Str, One),
        entry(ELEMENT_KIND, Str, One),
        entry(ELEMENT_DOCUMENT, Ref, Many),
        entry(ELEMENT_LICENSE_CONCLUDED, Ref, One),
        entry(ELEMENT_LICENSE_DECLARED, Ref, One),
        entry(PACKAGE_NAME, Str, One),
        entry(PACKAGE_VERSION, Str, One),
        entry(PACKAGE_PURL, Str, One),
        entry(PACKAGE_DOWNLOAD_LOCATION, Str, One),
        entry(FILE_NAME, Str, One),
        entry(LICENSE_ID, Str, One).unique(Uniqueness::Identity),
        entry(LICENSE_COMPOUND, Boolean, One),
        entry(LICENSE_MEMBER, Ref, Many),
        entry(RELATIONSHIP_DEPENDS_ON, Ref, Many),
        entry(RELATIONSHIP_DESCRIBES, Ref, Many),
        entry(RELATIONSHIP_CONTAINS, Ref, Many),
    ]
}
