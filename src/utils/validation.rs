//! Input validation utilities
//!
//! Rejects command arguments that would break control-line framing.

/// An argument is sendable when it is non-empty and carries no line breaks or NULs.
pub fn is_valid_argument(input: &str) -> bool {
    !input.is_empty() && !input.contains(['\r', '\n', '\0'])
}
