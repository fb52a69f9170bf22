/// Name of the environment variable containing the path to the emitter configuration.
/// If not set, defaults to
///  (1) on Linux and macOS: `$XDG_CONFIG_HOME/hyaccess/emitter.toml` or `$HOME/.config/hyaccess/emitter.toml`
///  (2) on Windows: `%APPDATA%\hyaccess\emitter.toml`
pub const ENV_EMITTER_CONFIG_PATH: &str = "HYACCESS_EMITTER_CONFIG";

/// Intrinsic printed by the trace emitter for annotated loads.
pub const DEFAULT_LOAD_INTRINSIC: &str = "__spirv_load";

/// Intrinsic printed by the trace emitter for annotated stores.
pub const DEFAULT_STORE_INTRINSIC: &str = "__spirv_store";
