use serde::Serialize;

/// NewType wrapper for a predicate identifier such as `package/name`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Predicate(String);

impl Predicate {
    pub fn new(ident: impl Into<String>) -> Self {
        Self(ident.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the `/`, e.g. `package` for `package/name`.
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once('/').map(|(ns, _)| ns)
    }
}

impl From<&str> for Predicate {
    fn from(ident: &str) -> Self {
        Self::new(ident)
    }
}

impl std::borrow::Borrow<str> for Predicate {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Subject or reference target of a statement.
///
/// Temp ids are local to one merge; the graph store binds them to entity ids,
/// upserting through identity-unique predicates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum EntityRef {
    Temp(String),
}

impl EntityRef {
    pub fn temp(name: impl Into<String>) -> Self {
        EntityRef::Temp(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            EntityRef::Temp(name) => name,
        }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityRef::Temp(name) => write!(f, "#{}", name),
        }
    }
}

/// Object position of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Long(i64),
    Boolean(bool),
    Ref(EntityRef),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ref_target(&self) -> Option<&EntityRef> {
        match self {
            Value::Ref(target) => Some(target),
            _ => None,
        }
    }

    /// Name of the variant, used in conflict messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Long(_) => "long",
            Value::Boolean(_) => "boolean",
            Value::Ref(_) => "ref",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Long(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Ref(target) => write!(f, "{}", target),
        }
    }
}

/// A single (subject, predicate, value) fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Statement {
    pub subject: EntityRef,
    pub predicate: Predicate,
    pub value: Value,
}

impl Statement {
    pub fn new(subject: EntityRef, predicate: impl Into<Predicate>, value: Value) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            value,
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} {} {}]", self.subject, self.predicate, self.value)
    }
}
