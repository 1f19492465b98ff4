use std::{
    collections::BTreeMap,
    error::Error,
    fs::File,
    io::BufReader,
    path::PathBuf,
};

use log::{info, warn};
use serde_json::Value;

use super::models::FormState;

/// Key the form lives under inside the storage file.
pub const FORM_STORAGE_KEY: &str = "schedule_form";

/// A trait, necessary for every entity that keeps the form between launches.
pub trait FormStore {
    /// Last saved form, or the default week-from-today form when nothing usable is stored.
    fn load(&self) -> FormState;
    /// Overwrites the stored form as a whole.
    fn save(&self, form: &FormState) -> Result<(), Box<dyn Error>>;
}

/// Key/value JSON file. Only [`FORM_STORAGE_KEY`] is touched, other keys survive writes.
pub struct JsonFormStore {
    pub path: PathBuf,
}

impl JsonFormStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFormStore { path: path.into() }
    }

    fn read_items(&self) -> Result<BTreeMap<String, Value>, Box<dyn Error>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let storage_file = BufReader::new(File::open(&self.path)?);
        Ok(serde_json::from_reader(storage_file)?)
    }
}

impl FormStore for JsonFormStore {
    fn load(&self) -> FormState {
        let items = match self.read_items() {
            Ok(items) => items,
            Err(err) => {
                warn!("Cannot read {}: {}", self.path.display(), err);
                return FormState::default();
            }
        };
        let Some(stored) = items.get(FORM_STORAGE_KEY) else {
            info!("No saved form in {}, starting fresh", self.path.display());
            return FormState::default();
        };
        match serde_json::from_value::<FormState>(stored.clone()) {
            Ok(form) => {
                info!("Restored form from {}", self.path.display());
                form
            }
            Err(err) => {
                warn!("Saved form is unusable ({}), starting fresh", err);
                FormState::default()
            }
        }
    }

    fn save(&self, form: &FormState) -> Result<(), Box<dyn Error>> {
        /* a broken file is replaced rather than blocking every later save */
        let mut items = self.read_items().unwrap_or_default();
        items.insert(FORM_STORAGE_KEY.to_owned(), serde_json::to_value(form)?);
        let storage_file = File::create(&self.path)?;
        Ok(serde_json::to_writer_pretty(storage_file, &items)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{Days, Local, NaiveDate};

    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonFormStore {
        JsonFormStore::new(dir.path().join("storage.json"))
    }

    #[test]
    fn load_without_file_gives_week_from_today() {
        let dir = tempfile::tempdir().unwrap();
        let form = store_in(&dir).load();

        let today = Local::now().date_naive();
        assert_eq!(form.full_university_name, "");
        assert_eq!(form.group_name, "");
        assert_eq!(form.date_from, today.format("%Y-%m-%d").to_string());
        assert_eq!(
            form.date_to,
            (today + Days::new(6)).format("%Y-%m-%d").to_string()
        );
    }

    #[test]
    fn save_then_load_restores_form() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let form = FormState {
            full_university_name: "Санкт-Петербургский государственный университет".to_owned(),
            group_name: "23.Б10-мм".to_owned(),
            date_from: "2024-05-01".to_owned(),
            date_to: "2024-05-07".to_owned(),
        };

        store.save(&form).unwrap();

        assert_eq!(store.load(), form);
    }

    #[test]
    fn save_keeps_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(&store.path, r#"{"theme": "dark"}"#).unwrap();

        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        store.save(&FormState::starting_at(today)).unwrap();

        let items: BTreeMap<String, Value> =
            serde_json::from_str(&fs::read_to_string(&store.path).unwrap()).unwrap();
        assert_eq!(items["theme"], Value::from("dark"));
        assert!(items.contains_key(FORM_STORAGE_KEY));
    }

    #[test]
    fn load_falls_back_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(&store.path, r#"{"schedule_form": {"group_name": 5}}"#).unwrap();

        let form = store.load();

        assert_eq!(form.group_name, "");
        assert!(!form.date_from.is_empty());
    }
}
