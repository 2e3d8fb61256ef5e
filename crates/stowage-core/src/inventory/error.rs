//! Inventory error types.
//!
//! Only filesystem *access* failures surface here; a manifest whose content
//! fails to parse is recorded as data (`InvalidManifest`) and never raised.

use std::fmt;
use std::io;
use std::path::Path;

/// Inventory error codes.
pub mod codes {
    pub const INVENTORY_SCAN_FAILED: &str = "INVENTORY_SCAN_FAILED";
    pub const INVENTORY_MANIFEST_READ_FAILED: &str = "INVENTORY_MANIFEST_READ_FAILED";
}

/// Hard failure during inventory collection.
#[derive(Debug)]
pub struct InventoryError {
    code: &'static str,
    message: String,
}

impl InventoryError {
    /// Create a new error with the given code and message.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create a scan failure error for a module root that could not be traversed.
    #[must_use]
    pub fn scan_failed(root: &Path, source: &walkdir::Error) -> Self {
        Self::new(
            codes::INVENTORY_SCAN_FAILED,
            format!("Failed to scan {}: {source}", root.display()),
        )
    }

    /// Create a read failure error for a manifest file that could not be read.
    #[must_use]
    pub fn manifest_read_failed(path: &Path, source: &io::Error) -> Self {
        Self::new(
            codes::INVENTORY_MANIFEST_READ_FAILED,
            format!("Failed to read {}: {source}", path.display()),
        )
    }
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for InventoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_contains_code() {
        let err = InventoryError::new(codes::INVENTORY_SCAN_FAILED, "boom");
        assert!(err.to_string().contains(codes::INVENTORY_SCAN_FAILED));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_error_codes_uppercase() {
        for code in [
            codes::INVENTORY_SCAN_FAILED,
            codes::INVENTORY_MANIFEST_READ_FAILED,
        ] {
            assert!(
                code.chars().all(|c| c.is_uppercase() || c == '_'),
                "Error code '{code}' should be SCREAMING_SNAKE_CASE"
            );
        }
    }
}
