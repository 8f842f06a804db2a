use super::schema::AttributeSchema;
use super::statement::Predicate;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Identifier of an entity (node) in the graph store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A value as stored in a snapshot, with references bound to entity ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoredValue {
    String(String),
    Long(i64),
    Boolean(bool),
    Ref(EntityId),
}

impl StoredValue {
    pub fn string(value: impl Into<String>) -> Self {
        StoredValue::String(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StoredValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ref_id(&self) -> Option<EntityId> {
        match self {
            StoredValue::Ref(id) => Some(*id),
            _ => None,
        }
    }
}

type Attributes = BTreeMap<Predicate, Vec<StoredValue>>;

#[derive(Debug, Clone, Default)]
struct SnapshotData {
    tx: u64,
    next_id: u64,
    entities: BTreeMap<EntityId, Attributes>,
    identity_index: BTreeMap<(Predicate, StoredValue), EntityId>,
}

/// An immutable point-in-time view of the graph.
///
/// Cloning is cheap (reference counted). A snapshot has no mutating API; a
/// merge stages changes in a [`SnapshotBuilder`] working on a private copy
/// and produces a new snapshot with the next transaction number.
#[derive(Debug, Clone, Default)]
pub struct GraphSnapshot {
    data: Arc<SnapshotData>,
}

impl GraphSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of transactions applied to reach this snapshot.
    pub fn tx(&self) -> u64 {
        self.data.tx
    }

    pub fn entity_count(&self) -> usize {
        self.data.entities.len()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.data.entities.contains_key(&id)
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.data.entities.keys().copied()
    }

    pub fn attributes(&self, id: EntityId) -> Option<&BTreeMap<Predicate, Vec<StoredValue>>> {
        self.data.entities.get(&id)
    }

    pub fn values(&self, id: EntityId, predicate: &str) -> &[StoredValue] {
        self.data
            .entities
            .get(&id)
            .and_then(|attrs| attrs.get(predicate))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn value(&self, id: EntityId, predicate: &str) -> Option<&StoredValue> {
        self.values(id, predicate).first()
    }

    /// Resolves an entity through an identity-unique predicate.
    pub fn lookup(&self, predicate: &str, value: &StoredValue) -> Option<EntityId> {
        self.data
            .identity_index
            .get(&(Predicate::new(predicate), value.clone()))
            .copied()
    }

    /// All entities holding `value` for `predicate` (full scan).
    pub fn entities_with(&self, predicate: &str, value: &StoredValue) -> Vec<EntityId> {
        self.data
            .entities
            .iter()
            .filter(|(_, attrs)| {
                attrs
                    .get(predicate)
                    .is_some_and(|values| values.contains(value))
            })
            .map(|(id, _)| *id)
            .collect()
    }

    /// Entities referring to `target` through `predicate`.
    pub fn referrers(&self, target: EntityId, predicate: &str) -> Vec<EntityId> {
        self.entities_with(predicate, &StoredValue::Ref(target))
    }

    /// Total number of stored (entity, predicate, value) facts.
    pub fn fact_count(&self) -> usize {
        self.data
            .entities
            .values()
            .flat_map(|attrs| attrs.values())
            .map(Vec::len)
            .sum()
    }

    pub(crate) fn builder(&self) -> SnapshotBuilder {
        SnapshotBuilder {
            data: (*self.data).clone(),
        }
    }

    /// True when both handles point at the same underlying state.
    pub fn same_state(&self, other: &GraphSnapshot) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl Serialize for GraphSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Export<'a> {
            tx: u64,
            entity_count: usize,
            entities: &'a BTreeMap<EntityId, Attributes>,
        }

        Export {
            tx: self.data.tx,
            entity_count: self.data.entities.len(),
            entities: &self.data.entities,
        }
        .serialize(serializer)
    }
}

/// Staging area for one transaction. Consumed by [`SnapshotBuilder::build`].
#[derive(Debug)]
pub(crate) struct SnapshotBuilder {
    data: SnapshotData,
}

impl SnapshotBuilder {
    pub(crate) fn allocate(&mut self) -> EntityId {
        self.data.next_id += 1;
        let id = EntityId(self.data.next_id);
        self.data.entities.insert(id, Attributes::new());
        id
    }

    pub(crate) fn lookup(&self, predicate: &Predicate, value: &StoredValue) -> Option<EntityId> {
        self.data
            .identity_index
            .get(&(predicate.clone(), value.clone()))
            .copied()
    }

    pub(crate) fn values(&self, id: EntityId, predicate: &Predicate) -> &[StoredValue] {
        self.data
            .entities
            .get(&id)
            .and_then(|attrs| attrs.get(predicate))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Asserts a value. Cardinality-one predicates replace the previous
    /// value; identity-unique predicates keep the index in step.
    pub(crate) fn assert_value(
        &mut self,
        id: EntityId,
        predicate: &Predicate,
        value: StoredValue,
        schema: &AttributeSchema,
    ) {
        let attrs = self.data.entities.entry(id).or_default();
        let slot = attrs.entry(predicate.clone()).or_default();

        if schema.is_many() {
            if slot.contains(&value) {
                return;
            }
            slot.push(value.clone());
        } else {
            let previous = std::mem::replace(slot, vec![value.clone()]);
            if schema.is_identity() {
                for old in previous {
                    if old != value {
                        self.data.identity_index.remove(&(predicate.clone(), old));
                    }
                }
            }
        }

        if schema.is_identity() {
            self.data
                .identity_index
                .insert((predicate.clone(), value), id);
        }
    }

    pub(crate) fn build(mut self) -> GraphSnapshot {
        self.data.tx += 1;
        GraphSnapshot {
            data: Arc::new(self.data),
        }
    }
}
