// Copyright (c) 2025 - Cowboy AI, Inc.
//! Switch-Local Port Addressing
//!
//! A linecard carries a template such as `GigabitEthernet%LINECARD%/%PORT%`.
//! The address of a port is that template with the zero-based linecard and port
//! positions substituted in. The result is what the switch itself reports in
//! `IF-MIB::ifDescr`, which is how inventory ports are matched to live interfaces.
//!
//! Only the first occurrence of each placeholder is replaced. Templates with a
//! repeated placeholder keep the later copies verbatim.

use serde_json::Value;
use thiserror::Error;

/// Placeholder for the zero-based linecard position
pub const LINECARD_PLACEHOLDER: &str = "%LINECARD%";

/// Placeholder for the zero-based port position
pub const PORT_PLACEHOLDER: &str = "%PORT%";

/// Address template error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address template is not a string: {0}")]
    NotAString(String),
}

/// Substitute linecard and port positions into a template
///
/// # Examples
///
/// ```rust
/// use switchmap::domain::address;
///
/// assert_eq!(address("slot%LINECARD%/%PORT%", 1, 12), "slot1/12");
/// assert_eq!(address("%PORT%-%PORT%", 0, 3), "3-%PORT%");
/// ```
pub fn address(template: &str, linecard: usize, port: usize) -> String {
    template
        .replacen(LINECARD_PLACEHOLDER, &linecard.to_string(), 1)
        .replacen(PORT_PLACEHOLDER, &port.to_string(), 1)
}

/// A validated linecard address template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressTemplate(String);

impl AddressTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Accept the raw inventory value, which must be a JSON string
    pub fn from_value(value: &Value) -> Result<Self, AddressError> {
        value
            .as_str()
            .map(Self::new)
            .ok_or_else(|| AddressError::NotAString(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Address of port `port` on linecard `linecard`
    pub fn address(&self, linecard: usize, port: usize) -> String {
        address(&self.0, linecard, port)
    }
}
