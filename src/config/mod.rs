pub mod audit;
pub mod file;
pub mod snapshot;

pub use audit::{audit_config, discarded_paths, ConfigAudit};

pub use file::{load_snapshot, resolve_config_path, save_snapshot, ConfigFormat};
pub use snapshot::{
    AgentDefaults, AgentsConfig, AuthConfig, AuthMode, AuthProfile, ConfigSnapshot, Entry, InputModality,
    ModelAlias, ModelApi, ModelCost, ModelDefinition, ModelSelection, ModelSelectionConfig,
    ModelsConfig, ModelsMode, ProviderConfig,
};
