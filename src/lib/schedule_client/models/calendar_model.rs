//! Module with calendar model compatible with the schedule API's JSON contract
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Subject {
    pub time_from: String,
    pub time_to: String,
    pub subject_type: String,
    pub subject_name: String,
    #[serde(default)]
    pub teacher_name: String,
    /// `"0"` means the session is for every subgroup.
    pub subgroup: String,
    pub building: String,
    pub auditory: String,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ScheduleDay {
    pub date: String,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Calendar {
    pub full_university_name: String,
    #[serde(default)]
    pub short_university_name: Option<String>,
    pub group_name: String,
    #[serde(default)]
    pub days: Vec<ScheduleDay>,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CalendarResponse {
    pub calendar: Calendar,
}

/// Body of the POST request. Dates are `YYYY-MM-DD HH:MM:SS`.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CalendarRequest {
    pub full_university_name: String,
    pub group_name: String,
    pub dt_from: String,
    pub dt_to: String,
}
