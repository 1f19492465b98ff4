use std::path::PathBuf;

use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub mod calendar_model;

pub const DEFAULT_TITLE: &str = "Расписание";

/// A model for describing ARGS of the tool.
/// Consists of:
/// 1. Path to config.json, that contains the schedule API address and the display title.
/// 2. Path to storage.json, a small key/value file where the last query is kept between launches.
/// 3. Whether to talk to an embedding host over stdin/stdout instead of running interactively.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    #[arg(long, value_name = "FILE", default_value = "storage.json")]
    pub storage_json_path: PathBuf,
    #[arg(long)]
    pub bridge: bool,
}

/// A model for describing configuration of the tool.
/// Consists of:
/// 1. Schedule API endpoint. May be absent, then every submit fails with a configuration error
/// 2. Title shown above the form and the schedule
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_owned()
}

impl Config {
    /// Endpoint to post to, with blank values treated as not configured.
    pub fn endpoint(&self) -> Option<&str> {
        self.api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: None,
            title: default_title(),
        }
    }
}

/// Query the user is building. Dates are ISO `YYYY-MM-DD` strings and may be empty
/// while the user is still picking them.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FormState {
    pub full_university_name: String,
    pub group_name: String,
    pub date_from: String,
    pub date_to: String,
}

impl FormState {
    /// Empty names and a week-long range starting at `today`.
    pub fn starting_at(today: NaiveDate) -> Self {
        let week_end = today.checked_add_days(Days::new(6)).unwrap_or(today);
        FormState {
            full_university_name: String::new(),
            group_name: String::new(),
            date_from: today.format("%Y-%m-%d").to_string(),
            date_to: week_end.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::University => self.full_university_name = value,
            FormField::Group => self.group_name = value,
            FormField::DateFrom => self.date_from = value,
            FormField::DateTo => self.date_to = value,
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        FormState::starting_at(Local::now().date_naive())
    }
}

#[derive(Deserialize, Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    University,
    Group,
    DateFrom,
    DateTo,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Form,
    Schedule,
}
