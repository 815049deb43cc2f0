//! Customer-entered checkout fields.

use serde::{Deserialize, Serialize};

use super::email::{Email, EmailError};

/// Errors produced by checkout field validation.
///
/// All of these are caller-side rejections: validation happens before any
/// network call is made.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The customer name is empty or whitespace.
    #[error("customer name is required")]
    NameRequired,
    /// The delivery address is empty or whitespace.
    #[error("delivery address is required")]
    AddressRequired,
    /// The optional email was supplied but is malformed.
    #[error(transparent)]
    Email(#[from] EmailError),
}

/// Validated customer fields for an order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
}

impl CustomerInfo {
    /// Build validated customer info.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` or `address` is blank.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        email: Option<Email>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let address = address.into();

        if name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if address.trim().is_empty() {
            return Err(ValidationError::AddressRequired);
        }

        Ok(Self {
            name,
            address,
            email,
        })
    }
}
