pub mod builtin;
pub mod classifier;
pub mod consistency;
pub mod store;
pub mod types;

pub use classifier::CategoryType;
pub use consistency::{ConsistencyWarning, WarningReason};
pub use store::SchemaStore;
pub use types::{
    CategorySchema, ConditionValue, Conditional, GroupLayout, SchemaFieldRef, SchemaGroup,
    SchemaStep,
};
