use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::settings::Settings;

use super::encryption::KdfParams;
#[cfg(not(target_arch = "wasm32"))]
use super::manager::StorageManager;
use super::records::{self, Entity};
use super::traits::{Collection, Record, RecordStore};

/// Route a helper call to the ledger vector backing `collection`.
macro_rules! on_collection {
    ($collection:expr, ref $ledger:expr, $f:ident($($arg:expr),*)) => {
        match $collection {
            Collection::Funds => $f(&$ledger.funds $(, $arg)*),
            Collection::Transactions => $f(&$ledger.transactions $(, $arg)*),
            Collection::Sips => $f(&$ledger.sips $(, $arg)*),
            Collection::Deposits => $f(&$ledger.deposits $(, $arg)*),
            Collection::FinancialPlans => $f(&$ledger.plans $(, $arg)*),
            Collection::MonthlyInvestments => $f(&$ledger.monthly_investments $(, $arg)*),
        }
    };
    ($collection:expr, mut $ledger:expr, $f:ident($($arg:expr),*)) => {
        match $collection {
            Collection::Funds => $f(&mut $ledger.funds $(, $arg)*),
            Collection::Transactions => $f(&mut $ledger.transactions $(, $arg)*),
            Collection::Sips => $f(&mut $ledger.sips $(, $arg)*),
            Collection::Deposits => $f(&mut $ledger.deposits $(, $arg)*),
            Collection::FinancialPlans => $f(&mut $ledger.plans $(, $arg)*),
            Collection::MonthlyInvestments => $f(&mut $ledger.monthly_investments $(, $arg)*),
        }
    };
}

/// Encrypted-file location and credentials of a persisted local store.
#[derive(Clone)]
struct LedgerFile {
    path: std::path::PathBuf,
    password: String,
    kdf_params: KdfParams,
}

/// Record store backed by an in-memory `Ledger`, optionally persisted to an
/// encrypted `.optv` file after every write.
///
/// Records are decoded into their entity types on write, so a record that
/// does not fit its collection's schema is rejected instead of stored.
pub struct LocalStore {
    ledger: RwLock<Ledger>,
    file: Option<LedgerFile>,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore")
            .field("path", &self.file.as_ref().map(|file| &file.path))
            .finish()
    }
}

impl LocalStore {
    /// A store that lives only in memory.
    pub fn in_memory() -> Self {
        Self::from_ledger(Ledger::default())
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: RwLock::new(ledger),
            file: None,
        }
    }

    /// Open (or start) an encrypted ledger file. A missing file yields an
    /// empty ledger that is created on the first write.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(path: impl Into<std::path::PathBuf>, password: impl Into<String>) -> Result<Self, CoreError> {
        let path = path.into();
        let password = password.into();
        let ledger = if path.exists() {
            let ledger = StorageManager::load_from_file(&path, &password)?;
            log::info!("Loaded {} records from {}", ledger.record_count(), path.display());
            ledger
        } else {
            log::info!("No ledger at {}, starting empty", path.display());
            Ledger::default()
        };

        Ok(Self {
            ledger: RwLock::new(ledger),
            file: Some(LedgerFile {
                path,
                password,
                kdf_params: KdfParams::default(),
            }),
        })
    }

    /// Use different Argon2id costs for subsequent saves.
    pub fn with_kdf_params(mut self, kdf_params: KdfParams) -> Self {
        if let Some(file) = self.file.as_mut() {
            file.kdf_params = kdf_params;
        }
        self
    }

    /// A copy of the current ledger.
    pub fn snapshot(&self) -> Result<Ledger, CoreError> {
        Ok(self.read_guard()?.clone())
    }

    pub fn settings(&self) -> Result<Settings, CoreError> {
        Ok(self.read_guard()?.settings.clone())
    }

    pub fn set_settings(&self, settings: Settings) -> Result<(), CoreError> {
        self.mutate(|ledger| {
            ledger.settings = settings;
            Ok(())
        })
    }

    /// The whole ledger as pretty JSON (unencrypted, for export/debugging).
    pub fn export_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&*self.read_guard()?)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger to JSON: {e}")))
    }

    /// Replace the ledger with one exported by `export_json`.
    pub fn import_json(&self, json: &str) -> Result<usize, CoreError> {
        let imported: Ledger = serde_json::from_str(json)?;
        let count = imported.record_count();
        self.mutate(|ledger| {
            *ledger = imported;
            Ok(())
        })?;
        Ok(count)
    }

    fn records(&self, collection: Collection) -> Result<Vec<Record>, CoreError> {
        let ledger = self.read_guard()?;
        on_collection!(collection, ref ledger, read_items())
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Ledger>, CoreError> {
        self.ledger
            .read()
            .map_err(|_| CoreError::StoreUnavailable("local ledger lock poisoned".into()))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Ledger>, CoreError> {
        self.ledger
            .write()
            .map_err(|_| CoreError::StoreUnavailable("local ledger lock poisoned".into()))
    }

    /// Apply a change and persist it; the change is rolled back if it fails
    /// or the file cannot be written.
    fn mutate<F>(&self, change: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Ledger) -> Result<(), CoreError>,
    {
        let mut guard = self.write_guard()?;
        let before = guard.clone();

        let result = change(&mut guard).and_then(|()| self.persist(&guard));
        if result.is_err() {
            *guard = before;
        }
        result
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn persist(&self, ledger: &Ledger) -> Result<(), CoreError> {
        match &self.file {
            Some(file) => {
                StorageManager::save_to_file(ledger, &file.path, &file.password, &file.kdf_params)?;
                log::debug!("Saved ledger to {}", file.path.display());
                Ok(())
            }
            None => Ok(()),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn persist(&self, _ledger: &Ledger) -> Result<(), CoreError> {
        Ok(())
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn read_items<T: Entity>(items: &[T]) -> Result<Vec<Record>, CoreError> {
    items.iter().map(records::to_record).collect()
}

fn append_item<T: Entity>(items: &mut Vec<T>, record: Record) -> Result<(), CoreError> {
    let entity: T = records::from_record(record)?;
    if items.iter().any(|existing| existing.id() == entity.id()) {
        return Err(CoreError::ValidationError(format!(
            "A {} record with id {} already exists",
            T::COLLECTION,
            entity.id()
        )));
    }
    items.push(entity);
    Ok(())
}

fn update_item<T: Entity>(items: &mut [T], id: &str, fields: Record) -> Result<(), CoreError> {
    let slot = items
        .iter_mut()
        .find(|item| item.id().to_string() == id)
        .ok_or_else(|| CoreError::not_found(T::COLLECTION, id))?;

    let mut record = records::to_record(&*slot)?;
    records::merge_fields(&mut record, fields);
    *slot = records::from_record(record)?;
    Ok(())
}

fn delete_item<T: Entity>(items: &mut Vec<T>, id: &str) -> Result<(), CoreError> {
    let idx = items
        .iter()
        .position(|item| item.id().to_string() == id)
        .ok_or_else(|| CoreError::not_found(T::COLLECTION, id))?;
    items.remove(idx);
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RecordStore for LocalStore {
    fn name(&self) -> &str {
        "LocalStore"
    }

    async fn read_all(&self, collection: Collection) -> Result<Vec<Record>, CoreError> {
        self.records(collection)
    }

    async fn append_record(&self, collection: Collection, record: Record) -> Result<(), CoreError> {
        self.mutate(|ledger| on_collection!(collection, mut ledger, append_item(record)))
    }

    async fn update_record(
        &self,
        collection: Collection,
        id: &str,
        fields: Record,
    ) -> Result<(), CoreError> {
        self.mutate(|ledger| on_collection!(collection, mut ledger, update_item(id, fields)))
    }

    async fn delete_record(&self, collection: Collection, id: &str) -> Result<(), CoreError> {
        self.mutate(|ledger| on_collection!(collection, mut ledger, delete_item(id)))
    }
}
