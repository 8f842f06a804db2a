use crate::ingestion::domain::{
    AttributeSchema, EntityId, EntityRef, GraphSnapshot, Predicate, SnapshotBuilder, Statement,
    StoredValue, Value,
};
use crate::ingestion::registry::SchemaRegistry;
use crate::ports::outbound::GraphStore;
use crate::shared::error::IngestError;
use std::collections::HashMap;

/// In-memory implementation of the GraphStore port
///
/// A merge copies the input snapshot, binds every temp id to an entity
/// (upserting through identity-unique predicates), checks the statements
/// against the registry and returns the next snapshot. Nothing is persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryGraphStore;

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self
    }

    fn scalar(value: &Value) -> Option<StoredValue> {
        match value {
            Value::String(s) => Some(StoredValue::String(s.clone())),
            Value::Long(n) => Some(StoredValue::Long(*n)),
            Value::Boolean(b) => Some(StoredValue::Boolean(*b)),
            Value::Ref(_) => None,
        }
    }

    /// Rejects every statement whose value does not match the declared type.
    fn check_types(
        statements: &[Statement],
        schemas: &HashMap<&Predicate, AttributeSchema>,
    ) -> Result<(), IngestError> {
        let mismatched: Vec<Statement> = statements
            .iter()
            .filter(|s| {
                schemas
                    .get(&s.predicate)
                    .and_then(|schema| schema.value_type)
                    .is_some_and(|expected| !expected.accepts(&s.value))
            })
            .cloned()
            .collect();

        if mismatched.is_empty() {
            return Ok(());
        }
        let first = &mismatched[0];
        let expected = schemas
            .get(&first.predicate)
            .and_then(|schema| schema.value_type)
            .map(|t| t.to_string())
            .unwrap_or_default();
        Err(IngestError::conflict(
            format!(
                "value type mismatch on '{}': expected {}, got {}",
                first.predicate,
                expected,
                first.value.type_name()
            ),
            mismatched,
        ))
    }

    /// Binds each subject to an existing entity through its identity values,
    /// or to a freshly allocated one.
    fn bind_subjects<'s>(
        builder: &mut SnapshotBuilder,
        statements: &'s [Statement],
        schemas: &HashMap<&Predicate, AttributeSchema>,
    ) -> Result<HashMap<&'s EntityRef, EntityId>, IngestError> {
        let mut order: Vec<&EntityRef> = Vec::new();
        let mut identities: HashMap<&EntityRef, Vec<(&Statement, StoredValue)>> = HashMap::new();

        for statement in statements {
            let entry = identities.entry(&statement.subject).or_insert_with(|| {
                order.push(&statement.subject);
                Vec::new()
            });
            let is_identity = schemas
                .get(&statement.predicate)
                .is_some_and(AttributeSchema::is_identity);
            if is_identity {
                if let Some(value) = Self::scalar(&statement.value) {
                    entry.push((statement, value));
                }
            }
        }

        // Identity values claimed earlier in this transaction
        let mut pending: HashMap<(Predicate, StoredValue), EntityId> = HashMap::new();
        let mut bindings = HashMap::new();

        for subject in order {
            let claims = identities.get(subject).map(Vec::as_slice).unwrap_or(&[]);
            let found: Vec<(EntityId, &Statement)> = claims
                .iter()
                .filter_map(|(statement, value)| {
                    pending
                        .get(&(statement.predicate.clone(), value.clone()))
                        .copied()
                        .or_else(|| builder.lookup(&statement.predicate, value))
                        .map(|id| (id, *statement))
                })
                .collect();

            let id = match found.first() {
                Some(&(id, _)) => {
                    if found.iter().any(|(other, _)| *other != id) {
                        return Err(IngestError::conflict(
                            format!("{} resolves to more than one existing entity", subject),
                            found.iter().map(|(_, s)| (*s).clone()).collect(),
                        ));
                    }
                    id
                }
                None => builder.allocate(),
            };

            for (statement, value) in claims {
                pending.insert((statement.predicate.clone(), value.clone()), id);
            }
            bindings.insert(subject, id);
        }

        Ok(bindings)
    }
}

impl GraphStore for InMemoryGraphStore {
    fn merge(
        &self,
        snapshot: &GraphSnapshot,
        statements: &[Statement],
        registry: &SchemaRegistry,
    ) -> Result<GraphSnapshot, IngestError> {
        let schemas: HashMap<&Predicate, AttributeSchema> = statements
            .iter()
            .map(|s| (&s.predicate, registry.attribute(s.predicate.as_str())))
            .collect();

        Self::check_types(statements, &schemas)?;

        let mut builder = snapshot.builder();
        let bindings = Self::bind_subjects(&mut builder, statements, &schemas)?;

        // Cardinality-one values asserted in this transaction
        let mut asserted: HashMap<(EntityId, &Predicate), (&Statement, StoredValue)> =
            HashMap::new();

        for statement in statements {
            let schema = schemas
                .get(&statement.predicate)
                .copied()
                .unwrap_or_default();
            let Some(&id) = bindings.get(&statement.subject) else {
                continue;
            };

            let value = match &statement.value {
                Value::Ref(target) => {
                    let Some(&target_id) = bindings.get(target) else {
                        return Err(IngestError::conflict(
                            format!("reference to undefined {}", target),
                            vec![statement.clone()],
                        ));
                    };
                    StoredValue::Ref(target_id)
                }
                Value::String(s) => StoredValue::String(s.clone()),
                Value::Long(n) => StoredValue::Long(*n),
                Value::Boolean(b) => StoredValue::Boolean(*b),
            };

            if !schema.is_many() {
                if let Some((previous, previous_value)) = asserted.get(&(id, &statement.predicate)) {
                    if *previous_value != value {
                        return Err(IngestError::conflict(
                            format!(
                                "two values for cardinality-one predicate '{}' on {}",
                                statement.predicate, id
                            ),
                            vec![(*previous).clone(), statement.clone()],
                        ));
                    }
                    continue;
                }
                asserted.insert((id, &statement.predicate), (statement, value.clone()));
            }

            if schema.is_identity() {
                if let Some(holder) = builder.lookup(&statement.predicate, &value) {
                    if holder != id {
                        return Err(IngestError::conflict(
                            format!(
                                "identity value {} for '{}' already belongs to {}",
                                statement.value, statement.predicate, holder
                            ),
                            vec![statement.clone()],
                        ));
                    }
                }
            }

            builder.assert_value(id, &statement.predicate, value, &schema);
        }

        Ok(builder.build())
    }
}
