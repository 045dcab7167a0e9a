//! Crew members attached to a production.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named participant in a production.
///
/// Crew members carry no identifier beyond their name and duplicates are
/// allowed. Contact fields are empty strings when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    /// Role in the production, e.g. "gaffer" or "lead actor".
    pub role: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl CrewMember {
    /// Creates a crew member without contact details.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            email: String::new(),
            phone: String::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }
}

impl fmt::Display for CrewMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.role)
    }
}
