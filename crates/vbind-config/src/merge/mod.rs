//! Deep merge of TOML values with per-field provenance.
//!
//! The merge operates on raw [`toml::Value`] trees rather than deserialized
//! structs, so a key missing from an upper layer never resets the value set
//! by a lower one.

mod deep;
mod types;

pub use deep::deep_merge_tracking;
pub(crate) use deep::record_leaves;
pub use types::{ConfigLayer, FieldSources};
