// -
// Configuration defaults

/// Default capacity for the refresh completion channel between background
/// fetch tasks and the update coordinator.
pub const DEFAULT_COMPLETION_CHANNEL_CAPACITY: usize = 64;

/// Prefix for environment-variable configuration overrides,
/// e.g. `ACCOUNT_CACHE_COMPLETION_CHANNEL_CAPACITY=128`.
pub const CONFIG_ENV_PREFIX: &str = "ACCOUNT_CACHE";

/// Separator between nested keys in environment overrides.
pub const CONFIG_ENV_SEPARATOR: &str = "__";
