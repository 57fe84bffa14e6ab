use std::{fmt, str::FromStr};

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::apperror::ApplicationError;

/**
 * Filter selection for an enumerated field: either every value or exactly one.
 *
 * Parsed from the literal `all` or from any spelling the value type accepts.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /**
     * Returns true if the value passes this selection.
     */
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => selected == value,
        }
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr<Err = ApplicationError>,
{
    type Err = ApplicationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }
        value.parse().map(Selection::Only)
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: FromStr<Err = ApplicationError>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/**
 * How mutations treat an identifier that matches no record.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LookupMode {
    /**
     * Unknown identifiers are silently ignored.
     */
    #[default]
    Lenient,
    /**
     * Unknown identifiers fail with a not found error.
     */
    Strict,
}

/**
 * Top level sections of the back office.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    #[default]
    Dashboard,
    Customers,
    Map,
    Tickets,
}

impl Section {
    /**
     * Resolves a section by name. Unknown names fall back to the dashboard.
     */
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "customers" => Section::Customers,
            "map" => Section::Map,
            "tickets" => Section::Tickets,
            _ => Section::Dashboard,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Customers => "Manajemen Pelanggan",
            Section::Map => "Peta Pelanggan",
            Section::Tickets => "Tiket Gangguan",
        }
    }
}

/**
 * Reporting period of the dashboard summary.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatsPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl StatsPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            StatsPeriod::Daily => "Harian",
            StatsPeriod::Weekly => "Mingguan",
            StatsPeriod::Monthly => "Bulanan",
        }
    }

    /**
     * Number of trend buckets and the width of each bucket.
     */
    pub fn buckets(&self) -> (usize, Duration) {
        match self {
            StatsPeriod::Daily => (7, Duration::days(1)),
            StatsPeriod::Weekly => (4, Duration::days(7)),
            StatsPeriod::Monthly => (6, Duration::days(30)),
        }
    }
}

impl FromStr for StatsPeriod {
    type Err = ApplicationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "daily" | "harian" => Ok(StatsPeriod::Daily),
            "weekly" | "mingguan" => Ok(StatsPeriod::Weekly),
            "monthly" | "bulanan" => Ok(StatsPeriod::Monthly),
            other => Err(ApplicationError::validation(format!("Unknown period: {other}"))),
        }
    }
}

impl<'de> Deserialize<'de> for StatsPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            StatsPeriod::Daily => "daily",
            StatsPeriod::Weekly => "weekly",
            StatsPeriod::Monthly => "monthly",
        };
        write!(f, "{name}")
    }
}

/**
 * Case-insensitive free text query. An empty query matches every record.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextQuery {
    needle: String,
}

impl TextQuery {
    pub fn new(query: &str) -> Self {
        TextQuery { needle: query.to_lowercase() }
    }

    /**
     * Returns true if any of the fields contains the query.
     */
    pub fn matches_any(&self, fields: &[&str]) -> bool {
        self.needle.is_empty() || fields.iter().any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/**
 * Checks that a required text field has content after trimming.
 *
 * # Arguments
 * `field`: Name of the field, used in the error message.
 * `value`: Value to check.
 */
pub fn require_text(field: &str, value: &str) -> Result<(), ApplicationError> {
    if value.trim().is_empty() {
        return Err(ApplicationError::validation(format!("Field {field} is required")));
    }
    Ok(())
}
