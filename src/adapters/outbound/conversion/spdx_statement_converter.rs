use crate::ingestion::domain::{
    predicates, EntityRef, Predicate, SbomDocument, Statement, Value, ValueType,
};
use crate::ingestion::registry::SchemaRegistry;
use crate::ingestion::services::LicenseResolver;
use crate::ports::outbound::StatementConverter;
use crate::shared::error::IngestError;
use serde_json::{Map, Value as JsonValue};
use std::collections::{HashMap, HashSet};

const DOCUMENT_TEMP_ID: &str = "document";

/// Values meaning "no license information"
const NO_LICENSE: [&str; 2] = ["NOASSERTION", "NONE"];

/// Relationship types that become statements, with the predicate they map to
/// and whether subject and object are swapped.
const RELATIONSHIPS: [(&str, &str, bool); 6] = [
    ("DEPENDS_ON", predicates::RELATIONSHIP_DEPENDS_ON, false),
    ("DEPENDENCY_OF", predicates::RELATIONSHIP_DEPENDS_ON, true),
    ("DESCRIBES", predicates::RELATIONSHIP_DESCRIBES, false),
    ("DESCRIBED_BY", predicates::RELATIONSHIP_DESCRIBES, true),
    ("CONTAINS", predicates::RELATIONSHIP_CONTAINS, false),
    ("CONTAINED_BY", predicates::RELATIONSHIP_CONTAINS, true),
];

/// SPDX 2.x JSON implementation of the StatementConverter port
///
/// Accepts a bare SPDX document or the GitHub dependency graph export, which
/// wraps it as `{"sbom": {...}}`. Predicate multiplicity and value types come
/// from the schema registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpdxStatementConverter;

impl SpdxStatementConverter {
    pub fn new() -> Self {
        Self
    }
}

impl StatementConverter for SpdxStatementConverter {
    fn convert(
        &self,
        document: &SbomDocument,
        registry: &SchemaRegistry,
    ) -> Result<Vec<Statement>, IngestError> {
        let body = document.body();
        let root = body
            .get("sbom")
            .filter(|inner| inner.is_object())
            .unwrap_or(body)
            .as_object()
            .ok_or_else(|| {
                IngestError::format(format!("{}: document is not a JSON object", document.id()))
            })?;

        let mut conversion = Conversion::new(document, registry);
        conversion.document_node(root)?;
        conversion.elements(root, "packages", ElementKind::Package)?;
        conversion.elements(root, "files", ElementKind::File)?;
        conversion.document_describes(root)?;
        conversion.relationships(root)?;
        Ok(conversion.statements)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Package,
    File,
}

impl ElementKind {
    fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Package => "package",
            ElementKind::File => "file",
        }
    }
}

/// State of one document conversion.
struct Conversion<'a> {
    document: &'a SbomDocument,
    registry: &'a SchemaRegistry,
    statements: Vec<Statement>,
    namespace: String,
    /// SPDXID -> temp id of every declared element (the document included)
    elements: HashMap<String, EntityRef>,
    licenses: HashSet<String>,
    /// Cardinality-one (subject, predicate) pairs already given a value
    assigned: HashSet<(EntityRef, Predicate)>,
}

impl<'a> Conversion<'a> {
    fn new(document: &'a SbomDocument, registry: &'a SchemaRegistry) -> Self {
        Self {
            document,
            registry,
            statements: Vec::new(),
            namespace: String::new(),
            elements: HashMap::new(),
            licenses: HashSet::new(),
            assigned: HashSet::new(),
        }
    }

    fn error(&self, details: impl std::fmt::Display) -> IngestError {
        IngestError::format(format!("{}: {}", self.document.id(), details))
    }

    fn required<'j>(&self, object: &'j Map<String, JsonValue>, key: &str, context: &str) -> Result<&'j str, IngestError> {
        object
            .get(key)
            .and_then(JsonValue::as_str)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| self.error(format!("{} is missing '{}'", context, key)))
    }

    /// Adds a statement, coercing `value` to the declared type. A
    /// cardinality-one predicate keeps the first value it receives.
    fn emit(&mut self, subject: &EntityRef, predicate: &str, value: Value) -> Result<(), IngestError> {
        let schema = self.registry.attribute(predicate);
        let predicate = Predicate::new(predicate);

        if !schema.is_many() && !self.assigned.insert((subject.clone(), predicate.clone())) {
            return Ok(());
        }

        let value = match schema.value_type {
            Some(expected) => coerce(value, expected).map_err(|value| {
                self.error(format!(
                    "value {} for '{}' cannot be read as {}",
                    value, predicate, expected
                ))
            })?,
            None => value,
        };

        self.statements.push(Statement {
            subject: subject.clone(),
            predicate,
            value,
        });
        Ok(())
    }

    fn emit_text(&mut self, subject: &EntityRef, predicate: &str, object: &Map<String, JsonValue>, key: &str) -> Result<(), IngestError> {
        match object.get(key) {
            Some(JsonValue::String(text)) if !text.trim().is_empty() => {
                self.emit(subject, predicate, Value::string(text.clone()))
            }
            Some(JsonValue::Number(n)) => self.emit(subject, predicate, Value::string(n.to_string())),
            _ => Ok(()),
        }
    }

    fn document_node(&mut self, root: &Map<String, JsonValue>) -> Result<(), IngestError> {
        let version = self.required(root, "spdxVersion", "document")?.to_string();
        let spdx_id = self.required(root, "SPDXID", "document")?.to_string();
        let name = self.required(root, "name", "document")?.to_string();
        self.namespace = root
            .get("documentNamespace")
            .and_then(JsonValue::as_str)
            .filter(|ns| !ns.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("urn:sbom-ingest:{}", self.document.id()));

        let subject = EntityRef::temp(DOCUMENT_TEMP_ID);
        self.elements.insert(spdx_id, subject.clone());

        let namespace = self.namespace.clone();
        let source = self.document.id().to_string();
        self.emit(&subject, predicates::DOCUMENT_NAMESPACE, Value::string(namespace))?;
        self.emit(&subject, predicates::DOCUMENT_NAME, Value::string(name))?;
        self.emit(&subject, predicates::DOCUMENT_SPDX_VERSION, Value::string(version))?;
        self.emit(&subject, predicates::DOCUMENT_SOURCE, Value::string(source))
    }

    fn elements(&mut self, root: &Map<String, JsonValue>, key: &str, kind: ElementKind) -> Result<(), IngestError> {
        let Some(items) = root.get(key) else {
            return Ok(());
        };
        let items = items
            .as_array()
            .ok_or_else(|| self.error(format!("'{}' must be an array", key)))?;

        for (index, item) in items.iter().enumerate() {
            let context = format!("{}[{}]", key, index);
            let object = item
                .as_object()
                .ok_or_else(|| self.error(format!("{} is not an object", context)))?;
            self.element(object, kind, &context)?;
        }
        Ok(())
    }

    fn element(&mut self, object: &Map<String, JsonValue>, kind: ElementKind, context: &str) -> Result<(), IngestError> {
        let spdx_id = self.required(object, "SPDXID", context)?.to_string();
        let name_key = match kind {
            ElementKind::Package => "name",
            ElementKind::File => "fileName",
        };
        let name = self.required(object, name_key, context)?.to_string();

        if self.elements.contains_key(&spdx_id) {
            return Err(self.error(format!("{} redeclares {}", context, spdx_id)));
        }
        let subject = EntityRef::temp(spdx_id.clone());
        self.elements.insert(spdx_id.clone(), subject.clone());

        let purl = (kind == ElementKind::Package).then(|| purl_of(object)).flatten();
        let key = purl
            .clone()
            .unwrap_or_else(|| format!("{}#{}", self.namespace, spdx_id));
        let document = EntityRef::temp(DOCUMENT_TEMP_ID);

        self.emit(&subject, predicates::ELEMENT_KEY, Value::string(key))?;
        self.emit(&subject, predicates::ELEMENT_SPDX_ID, Value::string(spdx_id))?;
        self.emit(&subject, predicates::ELEMENT_KIND, Value::string(kind.as_str()))?;
        self.emit(&subject, predicates::ELEMENT_DOCUMENT, Value::Ref(document))?;

        match kind {
            ElementKind::Package => {
                self.emit(&subject, predicates::PACKAGE_NAME, Value::string(name))?;
                self.emit_text(&subject, predicates::PACKAGE_VERSION, object, "versionInfo")?;
                if let Some(purl) = purl {
                    self.emit(&subject, predicates::PACKAGE_PURL, Value::string(purl))?;
                }
                self.emit_text(&subject, predicates::PACKAGE_DOWNLOAD_LOCATION, object, "downloadLocation")?;
            }
            ElementKind::File => {
                self.emit(&subject, predicates::FILE_NAME, Value::string(name))?;
            }
        }

        for (field, predicate) in [
            ("licenseConcluded", predicates::ELEMENT_LICENSE_CONCLUDED),
            ("licenseDeclared", predicates::ELEMENT_LICENSE_DECLARED),
        ] {
            let expression = object
                .get(field)
                .and_then(JsonValue::as_str)
                .map(str::trim)
                .filter(|e| !e.is_empty() && !NO_LICENSE.contains(e));
            if let Some(expression) = expression {
                let license = self.license(expression)?;
                self.emit(&subject, predicate, Value::Ref(license))?;
            }
        }
        Ok(())
    }

    /// Emits the license node for `expression` once and returns its temp id.
    /// Compound expressions link to a node per member license.
    fn license(&mut self, expression: &str) -> Result<EntityRef, IngestError> {
        let subject = EntityRef::temp(format!("license:{}", expression));
        if !self.licenses.insert(expression.to_string()) {
            return Ok(subject);
        }

        self.emit(&subject, predicates::LICENSE_ID, Value::string(expression))?;
        if LicenseResolver::is_compound(expression) {
            self.emit(&subject, predicates::LICENSE_COMPOUND, Value::Boolean(true))?;
            for member in license_members(expression) {
                let member_ref = self.license(&member)?;
                self.emit(&subject, predicates::LICENSE_MEMBER, Value::Ref(member_ref))?;
            }
        }
        Ok(subject)
    }

    fn document_describes(&mut self, root: &Map<String, JsonValue>) -> Result<(), IngestError> {
        let Some(described) = root.get("documentDescribes").and_then(JsonValue::as_array) else {
            return Ok(());
        };
        let document = EntityRef::temp(DOCUMENT_TEMP_ID);
        for target in described.iter().filter_map(JsonValue::as_str) {
            let target = self.declared(target, "documentDescribes")?;
            self.emit(&document, predicates::RELATIONSHIP_DESCRIBES, Value::Ref(target))?;
        }
        Ok(())
    }

    fn relationships(&mut self, root: &Map<String, JsonValue>) -> Result<(), IngestError> {
        let Some(items) = root.get("relationships") else {
            return Ok(());
        };
        let items = items
            .as_array()
            .ok_or_else(|| self.error("'relationships' must be an array"))?;

        for (index, item) in items.iter().enumerate() {
            let context = format!("relationships[{}]", index);
            let object = item
                .as_object()
                .ok_or_else(|| self.error(format!("{} is not an object", context)))?;
            let from = self.required(object, "spdxElementId", &context)?;
            let kind = self.required(object, "relationshipType", &context)?;
            let to = self.required(object, "relatedSpdxElement", &context)?;

            let Some(&(_, predicate, inverse)) = RELATIONSHIPS.iter().find(|(t, _, _)| *t == kind) else {
                continue;
            };
            // Nothing to link for external documents or unknown targets
            if [from, to].iter().any(|id| NO_LICENSE.contains(id) || id.starts_with("DocumentRef-")) {
                continue;
            }

            let from = self.declared(from, &context)?;
            let to = self.declared(to, &context)?;
            let (subject, object) = if inverse { (to, from) } else { (from, to) };
            self.emit(&subject, predicate, Value::Ref(object))?;
        }
        Ok(())
    }

    fn declared(&self, spdx_id: &str, context: &str) -> Result<EntityRef, IngestError> {
        self.elements
            .get(spdx_id)
            .cloned()
            .ok_or_else(|| self.error(format!("{} references undeclared element {}", context, spdx_id)))
    }
}

/// The purl of a package from its external references, if any.
fn purl_of(object: &Map<String, JsonValue>) -> Option<String> {
    object
        .get("externalRefs")?
        .as_array()?
        .iter()
        .find(|r| r.get("referenceType").and_then(JsonValue::as_str) == Some("purl"))?
        .get("referenceLocator")?
        .as_str()
        .map(str::to_string)
}

/// Member license identifiers of a compound expression, without operators,
/// parentheses or `WITH` exceptions. An operand may span several words
/// ("MIT License"); it ends at the next operator or parenthesis.
fn license_members(expression: &str) -> Vec<String> {
    let mut members: Vec<String> = Vec::new();
    let mut operand: Vec<&str> = Vec::new();
    let mut in_exception = false;
    for token in expression.split_whitespace() {
        if token.starts_with('(') {
            flush_operand(&mut members, &mut operand);
            in_exception = false;
        }
        match token.trim_matches(|c| c == '(' || c == ')') {
            "" => {}
            "AND" | "OR" => {
                flush_operand(&mut members, &mut operand);
                in_exception = false;
            }
            "WITH" => {
                flush_operand(&mut members, &mut operand);
                in_exception = true;
            }
            _ if in_exception => {}
            word => operand.push(word),
        }
        if token.ends_with(')') {
            flush_operand(&mut members, &mut operand);
            in_exception = false;
        }
    }
    flush_operand(&mut members, &mut operand);
    members
}

fn flush_operand(members: &mut Vec<String>, operand: &mut Vec<&str>) {
    if operand.is_empty() {
        return;
    }
    let member = operand.join(" ");
    operand.clear();
    if !members.contains(&member) {
        members.push(member);
    }
}

/// Coerces a value to `expected`, handing the value back if impossible.
fn coerce(value: Value, expected: ValueType) -> Result<Value, Value> {
    match (expected, value) {
        (ValueType::String, Value::String(s)) => Ok(Value::String(s)),
        (ValueType::String, Value::Long(n)) => Ok(Value::String(n.to_string())),
        (ValueType::String, Value::Boolean(b)) => Ok(Value::String(b.to_string())),
        (ValueType::Long, Value::Long(n)) => Ok(Value::Long(n)),
        (ValueType::Long, Value::String(s)) => match s.trim().parse::<i64>() {
            Ok(n) => Ok(Value::Long(n)),
            Err(_) => Err(Value::String(s)),
        },
        (ValueType::Boolean, Value::Boolean(b)) => Ok(Value::Boolean(b)),
        (ValueType::Boolean, Value::String(s)) => match s.trim() {
            "true" => Ok(Value::Boolean(true)),
            "false" => Ok(Value::Boolean(false)),
            _ => Err(Value::String(s)),
        },
        (ValueType::Ref, Value::Ref(r)) => Ok(Value::Ref(r)),
        (_, other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::domain::{spdx_ontology, Cardinality, DocumentId, SchemaEntry};
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::with_defaults(&spdx_ontology()).unwrap()
    }

    fn spdx() -> JsonValue {
        json!({
            "spdxVersion": "SPDX-2.3",
            "SPDXID": "SPDXRef-DOCUMENT",
            "name": "com.github.acme/widgets",
            "documentNamespace": "https://spdx.org/spdxdocs/acme-widgets",
            "packages": [
                {
                    "SPDXID": "SPDXRef-app",
                    "name": "widgets",
                    "versionInfo": "1.0.0",
                    "licenseConcluded": "MIT",
                    "downloadLocation": "NOASSERTION"
                },
                {
                    "SPDXID": "SPDXRef-npm-left-pad",
                    "name": "left-pad",
                    "versionInfo": "1.3.0",
                    "licenseConcluded": "MIT OR Apache-2.0",
                    "externalRefs": [{
                        "referenceCategory": "PACKAGE-MANAGER",
                        "referenceType": "purl",
                        "referenceLocator": "pkg:npm/left-pad@1.3.0"
                    }]
                }
            ],
            "relationships": [
                {"spdxElementId": "SPDXRef-DOCUMENT", "relationshipType": "DESCRIBES", "relatedSpdxElement": "SPDXRef-app"},
                {"spdxElementId": "SPDXRef-npm-left-pad", "relationshipType": "DEPENDENCY_OF", "relatedSpdxElement": "SPDXRef-app"},
                {"spdxElementId": "SPDXRef-app", "relationshipType": "GENERATED_FROM", "relatedSpdxElement": "SPDXRef-npm-left-pad"}
            ]
        })
    }

    fn convert(body: JsonValue) -> Result<Vec<Statement>, IngestError> {
        let document = SbomDocument::new(DocumentId::new("acme/widgets"), body);
        SpdxStatementConverter::new().convert(&document, &registry())
    }

    fn find<'s>(statements: &'s [Statement], subject: &str, predicate: &str) -> Vec<&'s Value> {
        statements
            .iter()
            .filter(|s| s.subject.name() == subject && s.predicate.as_str() == predicate)
            .map(|s| &s.value)
            .collect()
    }

    #[test]
    fn test_converts_document_and_packages() {
        let statements = convert(spdx()).unwrap();

        assert_eq!(
            find(&statements, "document", predicates::DOCUMENT_NAMESPACE),
            vec![&Value::string("https://spdx.org/spdxdocs/acme-widgets")]
        );
        assert_eq!(
            find(&statements, "SPDXRef-app", predicates::ELEMENT_KEY),
            vec![&Value::string("https://spdx.org/spdxdocs/acme-widgets#SPDXRef-app")]
        );
        assert_eq!(
            find(&statements, "SPDXRef-npm-left-pad", predicates::ELEMENT_KEY),
            vec![&Value::string("pkg:npm/left-pad@1.3.0")]
        );
        assert_eq!(
            find(&statements, "SPDXRef-app", predicates::PACKAGE_VERSION),
            vec![&Value::string("1.0.0")]
        );
    }

    #[test]
    fn test_relationships_and_inverses() {
        let statements = convert(spdx()).unwrap();

        assert_eq!(
            find(&statements, "document", predicates::RELATIONSHIP_DESCRIBES),
            vec![&Value::Ref(EntityRef::temp("SPDXRef-app"))]
        );
        // DEPENDENCY_OF is stored the other way round
        assert_eq!(
            find(&statements, "SPDXRef-app", predicates::RELATIONSHIP_DEPENDS_ON),
            vec![&Value::Ref(EntityRef::temp("SPDXRef-npm-left-pad"))]
        );
        // GENERATED_FROM is skipped
        assert_eq!(
            statements
                .iter()
                .filter(|s| s.predicate.namespace() == Some("relationship"))
                .count(),
            2
        );
    }

    #[test]
    fn test_compound_license_links_members() {
        let statements = convert(spdx()).unwrap();
        let compound = "license:MIT OR Apache-2.0";

        assert_eq!(
            find(&statements, compound, predicates::LICENSE_COMPOUND),
            vec![&Value::Boolean(true)]
        );
        assert_eq!(
            find(&statements, compound, predicates::LICENSE_MEMBER),
            vec![
                &Value::Ref(EntityRef::temp("license:MIT")),
                &Value::Ref(EntityRef::temp("license:Apache-2.0"))
            ]
        );
        // MIT is shared by the app and the compound set, declared once
        assert_eq!(find(&statements, "license:MIT", predicates::LICENSE_ID).len(), 1);
    }

    #[test]
    fn test_license_members_skip_exceptions() {
        assert_eq!(
            license_members("(GPL-2.0-only WITH Classpath-exception-2.0) OR MIT"),
            vec!["GPL-2.0-only".to_string(), "MIT".to_string()]
        );
    }

    #[test]
    fn test_license_members_keep_multi_word_operands() {
        assert_eq!(
            license_members("GPL-2.0-only OR MIT License"),
            vec!["GPL-2.0-only".to_string(), "MIT License".to_string()]
        );
        assert_eq!(
            license_members("(Apache License 2.0 WITH LLVM exception) AND (BSD 3 Clause OR MIT)"),
            vec![
                "Apache License 2.0".to_string(),
                "BSD 3 Clause".to_string(),
                "MIT".to_string()
            ]
        );
    }

    #[test]
    fn test_compound_with_multi_word_operand_has_no_stray_members() {
        let mut body = spdx();
        body["packages"][0]["licenseConcluded"] = json!("GPL-2.0-only OR MIT License");
        let statements = convert(body).unwrap();

        assert_eq!(
            find(&statements, "license:GPL-2.0-only OR MIT License", predicates::LICENSE_MEMBER),
            vec![
                &Value::Ref(EntityRef::temp("license:GPL-2.0-only")),
                &Value::Ref(EntityRef::temp("license:MIT License"))
            ]
        );
        assert!(find(&statements, "license:License", predicates::LICENSE_ID).is_empty());
    }

    #[test]
    fn test_github_wrapper_is_unwrapped() {
        let statements = convert(json!({ "sbom": spdx() })).unwrap();
        assert!(!find(&statements, "document", predicates::DOCUMENT_NAME).is_empty());
    }

    #[test]
    fn test_missing_required_fields_are_format_errors() {
        let mut body = spdx();
        body.as_object_mut().unwrap().remove("spdxVersion");
        let err = convert(body).unwrap_err();
        assert!(matches!(err, IngestError::ConversionFormat { .. }));
        assert!(err.to_string().contains("spdxVersion"));

        let mut body = spdx();
        body["packages"][0].as_object_mut().unwrap().remove("name");
        assert!(convert(body).unwrap_err().to_string().contains("packages[0]"));
    }

    #[test]
    fn test_undeclared_relationship_target_is_format_error() {
        let mut body = spdx();
        body["relationships"][0]["relatedSpdxElement"] = json!("SPDXRef-ghost");
        let err = convert(body).unwrap_err();
        assert!(err.to_string().contains("SPDXRef-ghost"));
    }

    #[test]
    fn test_sentinel_licenses_produce_no_link() {
        let mut body = spdx();
        body["packages"][0]["licenseConcluded"] = json!("NOASSERTION");
        let statements = convert(body).unwrap();
        assert!(find(&statements, "SPDXRef-app", predicates::ELEMENT_LICENSE_CONCLUDED).is_empty());
    }

    /// The SPDX ontology with some entries replaced.
    fn registry_with(overrides: Vec<SchemaEntry>) -> SchemaRegistry {
        let mut entries: Vec<SchemaEntry> = spdx_ontology()
            .into_iter()
            .filter(|e| overrides.iter().all(|o| o.ident != e.ident))
            .collect();
        entries.extend(overrides);
        let registry = SchemaRegistry::new();
        registry.install(&entries).unwrap();
        registry
    }

    fn convert_with(body: JsonValue, registry: &SchemaRegistry) -> Result<Vec<Statement>, IngestError> {
        let document = SbomDocument::new(DocumentId::new("acme/widgets"), body);
        SpdxStatementConverter::new().convert(&document, registry)
    }

    #[test]
    fn test_numbers_are_coerced_to_declared_string() {
        let mut body = spdx();
        body["packages"][0]["versionInfo"] = json!(2);
        let statements = convert(body).unwrap();
        assert_eq!(
            find(&statements, "SPDXRef-app", predicates::PACKAGE_VERSION),
            vec![&Value::string("2")]
        );
    }

    #[test]
    fn test_registry_drives_coercion() {
        let registry = registry_with(vec![SchemaEntry::new(predicates::PACKAGE_VERSION)
            .value_type(ValueType::Long)
            .cardinality(Cardinality::One)]);

        let mut body = spdx();
        body["packages"][0]["versionInfo"] = json!("7");
        body["packages"][1]["versionInfo"] = json!("8");
        let statements = convert_with(body, &registry).unwrap();
        assert_eq!(
            find(&statements, "SPDXRef-app", predicates::PACKAGE_VERSION),
            vec![&Value::Long(7)]
        );

        let err = convert_with(spdx(), &registry).unwrap_err();
        assert!(matches!(err, IngestError::ConversionFormat { .. }));
        assert!(err.to_string().contains("cannot be read as long"));
    }

    #[test]
    fn test_cardinality_one_keeps_first_value() {
        let registry = registry_with(vec![SchemaEntry::new(predicates::RELATIONSHIP_DEPENDS_ON)
            .value_type(ValueType::Ref)
            .cardinality(Cardinality::One)]);
        let mut body = spdx();
        body["relationships"].as_array_mut().unwrap().push(json!({
            "spdxElementId": "SPDXRef-app",
            "relationshipType": "DEPENDS_ON",
            "relatedSpdxElement": "SPDXRef-DOCUMENT"
        }));

        let statements = convert_with(body, &registry).unwrap();

        assert_eq!(
            find(&statements, "SPDXRef-app", predicates::RELATIONSHIP_DEPENDS_ON),
            vec![&Value::Ref(EntityRef::temp("SPDXRef-npm-left-pad"))]
        );
    }

    #[test]
    fn test_coerce() {
        assert_eq!(coerce(Value::string("42"), ValueType::Long), Ok(Value::Long(42)));
        assert_eq!(coerce(Value::string("true"), ValueType::Boolean), Ok(Value::Boolean(true)));
        assert!(coerce(Value::string("x"), ValueType::Ref).is_err());
        assert!(coerce(Value::Ref(EntityRef::temp("a")), ValueType::String).is_err());
    }
}
