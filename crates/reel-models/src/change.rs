//! Enumerated field changes for project updates.

use chrono::NaiveDate;

use crate::error::{ModelError, Result};
use crate::project::ProjectState;

/// One updatable project attribute and its new value.
///
/// Scenes, crew, spend and the identifier are not updatable this way;
/// they have dedicated operations or are owned by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Name(String),
    Director(String),
    Budget(f64),
    StartDate(NaiveDate),
    /// `None` clears the end date.
    EndDate(Option<NaiveDate>),
    State(ProjectState),
}

impl FieldChange {
    /// Names accepted by [`FieldChange::parse`].
    pub const FIELDS: [&'static str; 6] =
        ["name", "director", "budget", "start_date", "end_date", "state"];

    /// Builds a change from a textual field name and value.
    ///
    /// An empty value (or `none`) for `end_date` clears it. Dates use the
    /// `YYYY-MM-DD` format.
    ///
    /// # Errors
    /// [`ModelError::UnknownField`] for a name outside [`Self::FIELDS`],
    /// [`ModelError::InvalidValue`] when the value does not parse, and
    /// [`ModelError::InvalidState`] for an unrecognized state.
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        let value = value.trim();
        match field.trim() {
            "name" => Ok(FieldChange::Name(value.to_string())),
            "director" => Ok(FieldChange::Director(value.to_string())),
            "budget" => value
                .parse::<f64>()
                .ok()
                .filter(|b| b.is_finite())
                .map(FieldChange::Budget)
                .ok_or_else(|| invalid("budget", value)),
            "start_date" => parse_date("start_date", value).map(FieldChange::StartDate),
            "end_date" => {
                if value.is_empty() || value.eq_ignore_ascii_case("none") {
                    Ok(FieldChange::EndDate(None))
                } else {
                    parse_date("end_date", value).map(|d| FieldChange::EndDate(Some(d)))
                }
            }
            "state" => value.parse().map(FieldChange::State),
            other => Err(ModelError::UnknownField(other.to_string())),
        }
    }

    /// Returns the field name this change targets.
    pub fn field(&self) -> &'static str {
        match self {
            FieldChange::Name(_) => "name",
            FieldChange::Director(_) => "director",
            FieldChange::Budget(_) => "budget",
            FieldChange::StartDate(_) => "start_date",
            FieldChange::EndDate(_) => "end_date",
            FieldChange::State(_) => "state",
        }
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid(field, value))
}

fn invalid(field: &'static str, value: &str) -> ModelError {
    ModelError::InvalidValue {
        field,
        value: value.to_string(),
    }
}
