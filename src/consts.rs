/// Prefix of the environment variables read into tool [`Settings`](crate::Settings).
/// Nested keys are separated by `__`, e.g. `TRUFFLE_CONFIG__DEFINITION__PATH`.
pub const ENV_PREFIX: &str = "TRUFFLE_CONFIG";

pub const DEFAULT_DEFINITION_PATH: &str = "truffle-config.toml";

/// `network_id` value accepting any network.
pub const NETWORK_ID_WILDCARD: &str = "*";
