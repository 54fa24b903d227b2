//! Configuration for event prediction.
//!
//! Event policies (house sets, focus bonuses, age ranges) and engine
//! settings come built in; an optional `kp.toml` overrides or extends them.

pub mod error;
pub mod policy;
pub mod settings;
pub mod store;

pub use error::ConfigError;
pub use policy::{DEFAULT_POLICY, EventPolicy, builtin_policies};
pub use settings::EngineSettings;
pub use store::{KpConfig, PolicyEntry, PolicyStore};
