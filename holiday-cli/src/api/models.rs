//! Wire models for the holiday plans API and the locally persisted state

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One of the six fixed plan categories.
///
/// The canonical wire form is lowercase (`option1`). Any casing is accepted
/// when parsing, so records written as `Option1` still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanOption {
    Option1,
    Option2,
    Option3,
    Option4,
    Option5,
    Option6,
}

impl PlanOption {
    pub const ALL: [PlanOption; 6] = [
        PlanOption::Option1,
        PlanOption::Option2,
        PlanOption::Option3,
        PlanOption::Option4,
        PlanOption::Option5,
        PlanOption::Option6,
    ];

    /// Wire key, e.g. `option3`
    pub fn key(self) -> &'static str {
        match self {
            PlanOption::Option1 => "option1",
            PlanOption::Option2 => "option2",
            PlanOption::Option3 => "option3",
            PlanOption::Option4 => "option4",
            PlanOption::Option5 => "option5",
            PlanOption::Option6 => "option6",
        }
    }

    /// Human label, e.g. `Option 3`
    pub fn label(self) -> String {
        format!("Option {}", self.number())
    }

    fn number(self) -> u8 {
        match self {
            PlanOption::Option1 => 1,
            PlanOption::Option2 => 2,
            PlanOption::Option3 => 3,
            PlanOption::Option4 => 4,
            PlanOption::Option5 => 5,
            PlanOption::Option6 => 6,
        }
    }
}

impl fmt::Display for PlanOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PlanOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        PlanOption::ALL
            .into_iter()
            .find(|option| option.key() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown plan option '{}' (expected one of option1..option6)",
                    s
                )
            })
    }
}

impl<'de> Deserialize<'de> for PlanOption {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A location-scoped record a plan option can be assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: i64,
    pub organisation_id: String,
    pub location: String,
    #[serde(default)]
    pub sublocation: Option<String>,
    #[serde(default)]
    pub subsublocation: Option<String>,
}

/// Payload for `POST /api/holidays`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewHoliday {
    pub organisation_id: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sublocation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsublocation: Option<String>,
}

/// One dated row of a plan category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayPlanEntry {
    pub sr_no: i64,
    #[serde(deserialize_with = "crate::dates::deserialize_calendar_date")]
    pub date: NaiveDate,
    pub day: String,
    pub name: String,
    #[serde(default)]
    pub details: Option<String>,
    pub option: PlanOption,
}

/// Payload for `POST /api/holidayplans`. `date` is always `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewHolidayPlan {
    pub date: String,
    pub day: String,
    pub name: String,
    pub details: String,
    pub option: PlanOption,
}

/// Payload for `POST /api/holidayplan`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRequest {
    pub options: PlanOption,
    #[serde(rename = "holidayId")]
    pub holiday_id: i64,
}

/// Response body of the assign call, kept verbatim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sublocation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsublocation: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The plan option currently attached to a holiday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub option: PlanOption,
    pub details: AssignmentDetails,
}

/// Holiday id -> current assignment. At most one entry per holiday.
pub type AssignmentMap = BTreeMap<i64, Assignment>;

/// Plan option -> entries fetched for that option
pub type PlanCache = BTreeMap<PlanOption, Vec<HolidayPlanEntry>>;
