use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::io::recovery;
use crate::io::store::{FileStore, KeyValueStore, MACROS_KEY, StoreError, TEMPLATES_KEY};
use crate::model::macro_item::{Library, MacroItem, MacroRecord};
use crate::model::template::BuilderTemplate;

const SEED_MACROS: &str = include_str!("../seeds/macros.json");
const SEED_TEMPLATES: &str = include_str!("../seeds/builders.json");

/// Both persisted collections plus the store they live in.
///
/// Every mutation is followed by a full rewrite of the affected collection.
/// Saves never fail the caller: errors are logged and the unsaved payload
/// goes to the recovery log.
pub struct Workspace {
    store: Box<dyn KeyValueStore>,
    recovery_dir: Option<PathBuf>,
    pub library: Library,
    pub templates: Vec<BuilderTemplate>,
}

impl Workspace {
    /// Open the file-backed workspace in `dir`, seeding on first run.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        Workspace::load(Box::new(FileStore::new(dir)), Some(dir.to_path_buf()))
    }

    /// Load both collections from `store`.
    ///
    /// The sample macros are written when the macro list is missing or
    /// empty; the sample templates only when the template list is missing.
    /// A failed seed write is reported like any other save and the seeded
    /// collections are still returned.
    pub fn load(
        store: Box<dyn KeyValueStore>,
        recovery_dir: Option<PathBuf>,
    ) -> Result<Self, StoreError> {
        let stored_macros: Option<Vec<MacroRecord>> = read_key(store.as_ref(), MACROS_KEY)?;
        let stored_templates: Option<Vec<BuilderTemplate>> =
            read_key(store.as_ref(), TEMPLATES_KEY)?;

        let seed_macros = stored_macros.as_ref().is_none_or(|m| m.is_empty());
        let seed_templates = stored_templates.is_none();

        let macros = match stored_macros {
            Some(macros) if !macros.is_empty() => macros,
            _ => parse_seed(MACROS_KEY, SEED_MACROS)?,
        };
        let templates = match stored_templates {
            Some(templates) => templates,
            None => parse_seed(TEMPLATES_KEY, SEED_TEMPLATES)?,
        };

        let mut ws = Workspace {
            store,
            recovery_dir,
            library: Library::from_records(macros),
            templates,
        };
        if seed_macros {
            log::debug!("seeding sample macros");
            ws.save_macros();
        }
        if seed_templates {
            log::debug!("seeding sample builder templates");
            ws.save_templates();
        }
        Ok(ws)
    }

    /// Rewrite the whole macro collection.
    pub fn save_macros(&mut self) {
        let result = write_key(self.store.as_mut(), MACROS_KEY, &self.library.records);
        if let Err(e) = result {
            let payload = serde_json::to_string_pretty(&self.library.records).unwrap_or_default();
            self.report_failure(MACROS_KEY, &e, payload);
        }
    }

    /// Rewrite the whole template collection.
    pub fn save_templates(&mut self) {
        let result = write_key(self.store.as_mut(), TEMPLATES_KEY, &self.templates);
        if let Err(e) = result {
            let payload = serde_json::to_string_pretty(&self.templates).unwrap_or_default();
            self.report_failure(TEMPLATES_KEY, &e, payload);
        }
    }

    /// Keep a copy of a deleted macro in the recovery log.
    pub fn record_deletion(&self, item: &MacroItem) {
        let Some(dir) = &self.recovery_dir else {
            return;
        };
        let record = serde_json::to_string_pretty(item).unwrap_or_default();
        recovery::log_macro_deletion(dir, &item.id, &item.title, record);
    }

    pub fn recovery_dir(&self) -> Option<&Path> {
        self.recovery_dir.as_deref()
    }

    fn report_failure(&self, key: &str, error: &StoreError, payload: String) {
        log::warn!("could not save {}: {}", key, error);
        if let Some(dir) = &self.recovery_dir {
            recovery::log_write_failure(dir, key, &error.to_string(), payload);
        }
    }
}

fn read_key<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            }),
    }
}

fn write_key<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(value).map_err(|source| StoreError::Corrupt {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &value)
}

fn parse_seed<T: DeserializeOwned>(key: &str, text: &str) -> Result<T, StoreError> {
    serde_json::from_str(text).map_err(|source| StoreError::Corrupt {
        key: key.to_string(),
        source,
    })
}
