use crate::ingestion::domain::{predicates, EntityId, GraphSnapshot, StoredValue};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Element as returned by the read queries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ElementView {
    pub id: EntityId,
    pub key: String,
    pub name: Option<String>,
    pub version: Option<String>,
}

/// GraphQueries service holding the fixed read-only queries over a snapshot
pub struct GraphQueries;

impl GraphQueries {
    /// Elements whose concluded license is `license_id`, either directly or
    /// through a compound license set that has it as a member.
    pub fn packages_with_license(snapshot: &GraphSnapshot, license_id: &str) -> Vec<ElementView> {
        let Some(license) =
            snapshot.lookup(predicates::LICENSE_ID, &StoredValue::string(license_id))
        else {
            return Vec::new();
        };

        let mut licenses = vec![license];
        licenses.extend(snapshot.referrers(license, predicates::LICENSE_MEMBER));

        let elements: BTreeSet<EntityId> = licenses
            .into_iter()
            .flat_map(|l| snapshot.referrers(l, predicates::ELEMENT_LICENSE_CONCLUDED))
            .collect();

        Self::views(snapshot, elements)
    }

    /// All elements that depend on the element keyed `element_key`,
    /// directly or transitively. Cycles are followed once.
    pub fn dependents_of(snapshot: &GraphSnapshot, element_key: &str) -> Vec<ElementView> {
        let Some(start) = snapshot.lookup(predicates::ELEMENT_KEY, &StoredValue::string(element_key))
        else {
            return Vec::new();
        };

        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for dependent in snapshot.referrers(current, predicates::RELATIONSHIP_DEPENDS_ON) {
                if seen.insert(dependent) {
                    queue.push_back(dependent);
                }
            }
        }
        seen.remove(&start);

        Self::views(snapshot, seen)
    }

    /// Number of elements per concluded license identifier.
    pub fn license_summary(snapshot: &GraphSnapshot) -> BTreeMap<String, usize> {
        let mut summary = BTreeMap::new();
        for id in snapshot.entity_ids() {
            let license = snapshot
                .value(id, predicates::ELEMENT_LICENSE_CONCLUDED)
                .and_then(StoredValue::as_ref_id)
                .and_then(|l| snapshot.value(l, predicates::LICENSE_ID))
                .and_then(StoredValue::as_str);
            if let Some(license) = license {
                *summary.entry(license.to_string()).or_insert(0) += 1;
            }
        }
        summary
    }

    /// Looks up an element by its key.
    pub fn element(snapshot: &GraphSnapshot, element_key: &str) -> Option<ElementView> {
        let id = snapshot.lookup(predicates::ELEMENT_KEY, &StoredValue::string(element_key))?;
        Self::view(snapshot, id)
    }

    fn views(snapshot: &GraphSnapshot, ids: impl IntoIterator<Item = EntityId>) -> Vec<ElementView> {
        ids.into_iter()
            .filter_map(|id| Self::view(snapshot, id))
            .collect()
    }

    fn view(snapshot: &GraphSnapshot, id: EntityId) -> Option<ElementView> {
        let text = |predicate: &str| {
            snapshot
                .value(id, predicate)
                .and_then(StoredValue::as_str)
                .map(str::to_string)
        };
        Some(ElementView {
            id,
            key: text(predicates::ELEMENT_KEY)?,
            name: text(predicates::PACKAGE_NAME).or_else(|| text(predicates::FILE_NAME)),
            version: text(predicates::PACKAGE_VERSION),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::domain::{
        AttributeSchema, Cardinality, Predicate, SnapshotBuilder, Uniqueness,
    };

    fn schema(predicate: &str) -> AttributeSchema {
        let many = [
            predicates::LICENSE_MEMBER,
            predicates::RELATIONSHIP_DEPENDS_ON,
        ]
        .contains(&predicate);
        let identity = [predicates::LICENSE_ID, predicates::ELEMENT_KEY].contains(&predicate);
        AttributeSchema {
            cardinality: if many { Cardinality::Many } else { Cardinality::One },
            value_type: None,
            unique: if identity { Uniqueness::Identity } else { Uniqueness::None },
        }
    }

    fn put(builder: &mut SnapshotBuilder, id: EntityId, predicate: &str, value: StoredValue) {
        builder.assert_value(id, &Predicate::new(predicate), value, &schema(predicate));
    }

    fn element(builder: &mut SnapshotBuilder, key: &str, license: Option<EntityId>) -> EntityId {
        let id = builder.allocate();
        put(builder, id, predicates::ELEMENT_KEY, StoredValue::string(key));
        put(builder, id, predicates::PACKAGE_NAME, StoredValue::string(key));
        if let Some(license) = license {
            put(builder, id, predicates::ELEMENT_LICENSE_CONCLUDED, StoredValue::Ref(license));
        }
        id
    }

    fn license(builder: &mut SnapshotBuilder, id_text: &str) -> EntityId {
        let id = builder.allocate();
        put(builder, id, predicates::LICENSE_ID, StoredValue::string(id_text));
        id
    }

    /// app -> lib -> core, tool -> core; core is MIT, lib is "MIT OR Apache-2.0"
    fn sample() -> GraphSnapshot {
        let mut b = GraphSnapshot::empty().builder();
        let mit = license(&mut b, "MIT");
        let apache = license(&mut b, "Apache-2.0");
        let dual = license(&mut b, "MIT OR Apache-2.0");
        put(&mut b, dual, predicates::LICENSE_COMPOUND, StoredValue::Boolean(true));
        put(&mut b, dual, predicates::LICENSE_MEMBER, StoredValue::Ref(mit));
        put(&mut b, dual, predicates::LICENSE_MEMBER, StoredValue::Ref(apache));

        let core = element(&mut b, "pkg:cargo/core@1.0.0", Some(mit));
        let lib = element(&mut b, "pkg:cargo/lib@2.0.0", Some(dual));
        let app = element(&mut b, "pkg:cargo/app@0.1.0", Some(apache));
        let tool = element(&mut b, "pkg:cargo/tool@0.1.0", None);
        put(&mut b, lib, predicates::RELATIONSHIP_DEPENDS_ON, StoredValue::Ref(core));
        put(&mut b, app, predicates::RELATIONSHIP_DEPENDS_ON, StoredValue::Ref(lib));
        put(&mut b, tool, predicates::RELATIONSHIP_DEPENDS_ON, StoredValue::Ref(core));
        b.build()
    }

    fn keys(views: &[ElementView]) -> Vec<&str> {
        views.iter().map(|v| v.key.as_str()).collect()
    }

    #[test]
    fn test_packages_with_license_includes_license_sets() {
        let snapshot = sample();
        let views = GraphQueries::packages_with_license(&snapshot, "MIT");
        assert_eq!(keys(&views), vec!["pkg:cargo/core@1.0.0", "pkg:cargo/lib@2.0.0"]);
    }

    #[test]
    fn test_packages_with_unknown_license() {
        assert!(GraphQueries::packages_with_license(&sample(), "ISC").is_empty());
    }

    #[test]
    fn test_dependents_are_transitive() {
        let snapshot = sample();
        let views = GraphQueries::dependents_of(&snapshot, "pkg:cargo/core@1.0.0");
        assert_eq!(
            keys(&views),
            vec!["pkg:cargo/lib@2.0.0", "pkg:cargo/app@0.1.0", "pkg:cargo/tool@0.1.0"]
        );
        assert!(GraphQueries::dependents_of(&snapshot, "pkg:cargo/app@0.1.0").is_empty());
        assert!(GraphQueries::dependents_of(&snapshot, "missing").is_empty());
    }

    #[test]
    fn test_dependents_survive_cycles() {
        let mut b = GraphSnapshot::empty().builder();
        let a = element(&mut b, "a", None);
        let c = element(&mut b, "c", None);
        put(&mut b, a, predicates::RELATIONSHIP_DEPENDS_ON, StoredValue::Ref(c));
        put(&mut b, c, predicates::RELATIONSHIP_DEPENDS_ON, StoredValue::Ref(a));
        let snapshot = b.build();

        assert_eq!(keys(&GraphQueries::dependents_of(&snapshot, "a")), vec!["c"]);
    }

    #[test]
    fn test_license_summary() {
        let summary = GraphQueries::license_summary(&sample());
        assert_eq!(summary.get("MIT"), Some(&1));
        assert_eq!(summary.get("Apache-2.0"), Some(&1));
        assert_eq!(summary.get("MIT OR Apache-2.0"), Some(&1));
        assert_eq!(summary.values().sum::<usize>(), 3);
    }

    #[test]
    fn test_element_lookup() {
        let view = GraphQueries::element(&sample(), "pkg:cargo/lib@2.0.0").unwrap();
        assert_eq!(view.name.as_deref(), Some("pkg:cargo/lib@2.0.0"));
        assert_eq!(view.version, None);
    }
}
