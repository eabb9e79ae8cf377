//! FTP transfer types
//!
//! Representation types negotiated with `TYPE`.

use serde::Deserialize;
use std::fmt;

/// Transfer representation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum TransferType {
    /// `TYPE A`
    Ascii,
    /// `TYPE I`, binary
    #[default]
    Image,
}

impl TransferType {
    /// Wire code sent as the `TYPE` argument
    pub fn code(&self) -> &'static str {
        match self {
            TransferType::Ascii => "A",
            TransferType::Image => "I",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransferType::Ascii => "ASCII",
            TransferType::Image => "Binary",
        }
    }

    /// Lenient parse for interactive input: anything not starting with `a` is binary.
    pub fn from_user_input(input: &str) -> Self {
        match input.chars().next() {
            Some('a') | Some('A') => TransferType::Ascii,
            _ => TransferType::Image,
        }
    }
}

impl TryFrom<String> for TransferType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase().as_str() {
            "A" | "ASCII" => Ok(TransferType::Ascii),
            "I" | "IMAGE" | "BINARY" => Ok(TransferType::Image),
            other => Err(format!("unknown transfer type: {}", other)),
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
