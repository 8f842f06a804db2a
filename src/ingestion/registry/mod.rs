mod schema_registry;

pub use schema_registry::{InstallGuard, SchemaRegistry};
