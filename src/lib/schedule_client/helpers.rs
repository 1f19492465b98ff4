use chrono::{Locale, NaiveDate, NaiveTime};
use log::debug;

use crate::schedule_client::models::{calendar_model::CalendarRequest, FormState};

const START_OF_DAY: &str = "00:00:00";
const END_OF_DAY: &str = "23:59:59";
const LABEL_LOCALE: Locale = Locale::ru_RU;

/// Display category of a session, derived from its free-text type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectClass {
    Lecture,
    Lab,
    Practice,
}

impl SubjectClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectClass::Lecture => "lecture",
            SubjectClass::Lab => "lab",
            SubjectClass::Practice => "practice",
        }
    }
}

/// Turns an ISO date into the backend's `YYYY-MM-DD HH:MM:SS`, pinned to the first
/// or the last second of that day.
pub fn format_date_for_backend(date: &str, end_of_day: bool) -> String {
    let time = if end_of_day { END_OF_DAY } else { START_OF_DAY };
    format!("{} {}", date, time)
}

/* keep only HH:MM of both ends; shorter strings are taken as is */
pub fn time_range(from: &str, to: &str) -> String {
    format!("{}–{}", hh_mm(from), hh_mm(to))
}

fn hh_mm(time: &str) -> String {
    time.chars().take(5).collect()
}

/// Lectures win over labs, anything else is practice.
pub fn subject_class(subject_type: &str) -> SubjectClass {
    let subject_type = subject_type.to_lowercase();
    if subject_type.contains("лекц") {
        SubjectClass::Lecture
    } else if subject_type.contains("лаб") {
        SubjectClass::Lab
    } else {
        SubjectClass::Practice
    }
}

/// Long weekday, day and month in Russian with the first letter capitalised,
/// e.g. `Среда, 1 мая`. The date is read as UTC midnight, so the local timezone
/// never shifts it. Anything that is not an ISO date is returned untouched.
pub fn date_label(date: &str) -> String {
    let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        debug!("Cannot build a label for {:?}, showing it as is", date);
        return date.to_owned();
    };
    let label = parsed
        .and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized("%A, %-d %B", LABEL_LOCALE)
        .to_string();
    capitalize_first(&label)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Gate for submitting: a university name of at least two characters, a non-blank
/// group and both ends of the range picked.
pub fn form_valid(form: &FormState) -> bool {
    form.full_university_name.trim().chars().count() > 1
        && !form.group_name.trim().is_empty()
        && !form.date_from.is_empty()
        && !form.date_to.is_empty()
}

/// Builds the request body: trimmed names and a range covering both end days fully.
pub fn build_calendar_request(form: &FormState) -> CalendarRequest {
    CalendarRequest {
        full_university_name: form.full_university_name.trim().to_owned(),
        group_name: form.group_name.trim().to_owned(),
        dt_from: format_date_for_backend(&form.date_from, false),
        dt_to: format_date_for_backend(&form.date_to, true),
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
