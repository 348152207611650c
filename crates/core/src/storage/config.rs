use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

#[cfg(not(target_arch = "wasm32"))]
use super::local::LocalStore;
use super::sheets::SheetStore;
use super::traits::RecordStore;

/// Which record store to use and how to reach it.
///
/// ```json
/// { "backend": "sheets", "spreadsheet_id": "1AbC...", "access_token": "ya29..." }
/// { "backend": "local", "path": "ledger.optv", "password": "secret" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Encrypted ledger file on disk. An empty `path` keeps records in memory.
    Local {
        #[serde(default)]
        path: String,
        #[serde(default)]
        password: String,
    },
    Sheets {
        spreadsheet_id: String,
        #[serde(default)]
        access_token: Option<String>,
        #[serde(default)]
        base_url: Option<String>,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Local {
            path: String::new(),
            password: String::new(),
        }
    }
}

impl StoreConfig {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Construct the configured store.
    pub fn build(&self) -> Result<Box<dyn RecordStore>, CoreError> {
        match self {
            StoreConfig::Local { path, password } => Self::build_local(path, password),
            StoreConfig::Sheets {
                spreadsheet_id,
                access_token,
                base_url,
            } => {
                if spreadsheet_id.trim().is_empty() {
                    return Err(CoreError::invalid("spreadsheet_id must not be empty"));
                }
                let mut store = SheetStore::new(spreadsheet_id.trim(), access_token.clone());
                if let Some(url) = base_url {
                    store = store.with_base_url(url.as_str());
                }
                log::info!("Using Google Sheets store for spreadsheet {}", spreadsheet_id.trim());
                Ok(Box::new(store))
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn build_local(path: &str, password: &str) -> Result<Box<dyn RecordStore>, CoreError> {
        if path.is_empty() {
            return Ok(Box::new(LocalStore::in_memory()));
        }
        if password.is_empty() {
            return Err(CoreError::invalid("a password is required for a local ledger file"));
        }
        Ok(Box::new(LocalStore::open(path, password)?))
    }

    #[cfg(target_arch = "wasm32")]
    fn build_local(path: &str, _password: &str) -> Result<Box<dyn RecordStore>, CoreError> {
        if path.is_empty() {
            return Ok(Box::new(super::local::LocalStore::in_memory()));
        }
        Err(CoreError::StoreUnavailable(
            "local ledger files are not available on this target".into(),
        ))
    }
}
