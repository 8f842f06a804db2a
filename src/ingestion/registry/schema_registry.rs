use crate::ingestion::domain::{
    AttributeSchema, Cardinality, Predicate, SchemaEntry, Uniqueness, ValueType,
};
use crate::shared::error::IngestError;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Facet {
    Cardinality,
    ValueType,
    Uniqueness,
}

impl Facet {
    fn name(&self) -> &'static str {
        match self {
            Facet::Cardinality => "cardinality",
            Facet::ValueType => "value type",
            Facet::Uniqueness => "uniqueness",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FacetValue {
    Cardinality(Cardinality),
    ValueType(ValueType),
    Uniqueness(Uniqueness),
}

impl std::fmt::Display for FacetValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacetValue::Cardinality(c) => write!(f, "{}", c),
            FacetValue::ValueType(t) => write!(f, "{}", t),
            FacetValue::Uniqueness(u) => write!(f, "{}", u),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Default,
    Installed,
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    value: FacetValue,
    origin: Origin,
}

type RuleKey = (Predicate, Facet);

/// Splits entries into one (predicate, facet, value) triple per present field.
fn rules_of(entries: &[SchemaEntry]) -> Vec<(RuleKey, FacetValue)> {
    let mut rules = Vec::new();
    for entry in entries {
        let predicate = entry.predicate();
        if let Some(c) = entry.cardinality {
            rules.push(((predicate.clone(), Facet::Cardinality), FacetValue::Cardinality(c)));
        }
        if let Some(t) = entry.value_type {
            rules.push(((predicate.clone(), Facet::ValueType), FacetValue::ValueType(t)));
        }
        if let Some(u) = entry.unique {
            rules.push(((predicate, Facet::Uniqueness), FacetValue::Uniqueness(u)));
        }
    }
    rules
}

#[derive(Debug, Default)]
struct RegistryState {
    // Each key holds a stack of rules; the top one is in effect.
    rules: HashMap<RuleKey, Vec<Rule>>,
}

impl RegistryState {
    fn effective(&self, key: &RuleKey) -> Option<FacetValue> {
        self.rules
            .get(key)
            .and_then(|stack| stack.last())
            .map(|rule| rule.value)
    }

    /// Checks a batch against the current state and against itself.
    fn check(&self, rules: &[(RuleKey, FacetValue)]) -> Result<(), IngestError> {
        let mut pending: HashMap<&RuleKey, FacetValue> = HashMap::new();
        for (key, value) in rules {
            let existing = pending.get(key).copied().or_else(|| self.effective(key));
            if let Some(existing) = existing {
                if existing != *value {
                    return Err(IngestError::RegistryConflict {
                        predicate: key.0.to_string(),
                        field: key.1.name(),
                        existing: existing.to_string(),
                        requested: value.to_string(),
                    });
                }
            }
            pending.insert(key, *value);
        }
        Ok(())
    }

    fn push(&mut self, rules: Vec<(RuleKey, FacetValue)>, origin: Origin) {
        for (key, value) in rules {
            self.rules.entry(key).or_default().push(Rule { value, origin });
        }
    }
}

/// Predicate storage metadata consulted by statement conversion and merges.
///
/// Rules are kept as per-predicate stacks so that repeated or nested
/// installs of the same entries balance out with their uninstalls, and
/// built-in defaults are never removed. Installs are validated in full
/// before any rule is applied, under the write lock, so readers never see a
/// half-installed batch.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    state: RwLock<RegistryState>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry whose rules survive every uninstall.
    pub fn with_defaults(defaults: &[SchemaEntry]) -> Result<Self, IngestError> {
        let rules = rules_of(defaults);
        let mut state = RegistryState::default();
        state.check(&rules)?;
        state.push(rules, Origin::Default);
        Ok(Self {
            state: RwLock::new(state),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Installs one rule per present field of every entry.
    ///
    /// Installing a value a predicate already has is re-entrant (it stacks);
    /// a different value is a [`IngestError::RegistryConflict`] and leaves the
    /// registry unchanged.
    pub fn install(&self, entries: &[SchemaEntry]) -> Result<(), IngestError> {
        let rules = rules_of(entries);
        let mut state = self.write();
        state.check(&rules)?;
        state.push(rules, Origin::Installed);
        Ok(())
    }

    /// Removes the rules a matching `install` added. Rules that were never
    /// installed, and built-in defaults, are left alone.
    pub fn uninstall(&self, entries: &[SchemaEntry]) {
        let mut state = self.write();
        for (key, value) in rules_of(entries) {
            let Some(stack) = state.rules.get_mut(&key) else {
                continue;
            };
            if let Some(pos) = stack
                .iter()
                .rposition(|rule| rule.origin == Origin::Installed && rule.value == value)
            {
                stack.remove(pos);
            }
            if stack.is_empty() {
                state.rules.remove(&key);
            }
        }
    }

    /// Installs `entries` and returns a guard that uninstalls them on drop.
    pub fn install_scoped(&self, entries: Vec<SchemaEntry>) -> Result<InstallGuard<'_>, IngestError> {
        self.install(&entries)?;
        Ok(InstallGuard {
            registry: self,
            entries,
        })
    }

    pub fn cardinality(&self, predicate: &str) -> Cardinality {
        match self
            .read()
            .effective(&(Predicate::new(predicate), Facet::Cardinality))
        {
            Some(FacetValue::Cardinality(c)) => c,
            _ => Cardinality::One,
        }
    }

    pub fn value_type(&self, predicate: &str) -> Option<ValueType> {
        match self
            .read()
            .effective(&(Predicate::new(predicate), Facet::ValueType))
        {
            Some(FacetValue::ValueType(t)) => Some(t),
            _ => None,
        }
    }

    pub fn uniqueness(&self, predicate: &str) -> Uniqueness {
        match self
            .read()
            .effective(&(Predicate::new(predicate), Facet::Uniqueness))
        {
            Some(FacetValue::Uniqueness(u)) => u,
            _ => Uniqueness::None,
        }
    }

    /// All three facets for `predicate`, read under a single lock.
    pub fn attribute(&self, predicate: &str) -> AttributeSchema {
        let state = self.read();
        let predicate = Predicate::new(predicate);
        let mut schema = AttributeSchema::default();
        if let Some(FacetValue::Cardinality(c)) =
            state.effective(&(predicate.clone(), Facet::Cardinality))
        {
            schema.cardinality = c;
        }
        if let Some(FacetValue::ValueType(t)) =
            state.effective(&(predicate.clone(), Facet::ValueType))
        {
            schema.value_type = Some(t);
        }
        if let Some(FacetValue::Uniqueness(u)) = state.effective(&(predicate, Facet::Uniqueness)) {
            schema.unique = u;
        }
        schema
    }

    /// True when at least one rule mentions `predicate`.
    pub fn is_installed(&self, predicate: &str) -> bool {
        self.read()
            .rules
            .keys()
            .any(|(p, _)| p.as_str() == predicate)
    }

    /// Number of rules currently stacked, defaults included.
    pub fn rule_count(&self) -> usize {
        self.read().rules.values().map(Vec::len).sum()
    }
}

/// Keeps a set of schema entries installed for as long as it lives.
///
/// Dropping the guard (normal completion, an early `?` return, a panic or a
/// cancelled future) uninstalls exactly the entries it installed.
#[derive(Debug)]
pub struct InstallGuard<'a> {
    registry: &'a SchemaRegistry,
    entries: Vec<SchemaEntry>,
}

impl<'a> InstallGuard<'a> {
    pub fn registry(&self) -> &'a SchemaRegistry {
        self.registry
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }
}

impl Drop for InstallGuard<'_> {
    fn drop(&mut self) {
        self.registry.uninstall(&self.entries);
    }
}
