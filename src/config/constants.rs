// Project-wide constants
//
// Centralised here so port numbers and other magic values have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Default bind address when neither config nor `PORT` say otherwise.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default maximum tokens for generation requests.
pub const DEFAULT_MAX_TOKENS: u32 = 8000;

/// Token budget for the one-word template classification.
pub const CLASSIFY_MAX_TOKENS: u32 = 16;

/// Default deadline for a single provider call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Upper bound on inbound request bodies (histories plus file trees).
pub const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "SCAFFOLD_CONFIG";
