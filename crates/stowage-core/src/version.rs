/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema version for JSON output envelopes.
/// Bump this when changing formats that would break compatibility.
pub const SCHEMA_VERSION: u32 = 1;

/// Returns a formatted version string.
#[must_use]
pub fn version_string() -> String {
    format!("stowage {VERSION}")
}
