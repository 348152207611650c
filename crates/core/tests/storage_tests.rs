// ═══════════════════════════════════════════════════════════════════
// Storage Tests: encryption, file format, StorageManager, LocalStore,
// SheetStore (grid conversion, HTTP against a local server), StoreConfig
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use serde_json::json;

use optivest_core::errors::CoreError;
use optivest_core::models::fund::{Fund, FundCategory, RiskLevel};
use optivest_core::models::ledger::Ledger;
use optivest_core::models::transaction::Transaction;
use optivest_core::storage::config::StoreConfig;
use optivest_core::storage::encryption::{decrypt, derive_key, encrypt, random_bytes, KdfParams};
use optivest_core::storage::format::{self, CURRENT_VERSION, HEADER_SIZE, MAGIC};
use optivest_core::storage::local::LocalStore;
use optivest_core::storage::manager::StorageManager;
use optivest_core::storage::records::{self, Entity};
use optivest_core::storage::sheets::{self, SheetStore};
use optivest_core::storage::traits::{Collection, Record, RecordStore};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_fund() -> Fund {
    Fund::new("Parag Parikh Flexi Cap", FundCategory::MultiCap, "PPFAS", 75.5, RiskLevel::High)
}

fn sample_ledger() -> Ledger {
    let mut fund = sample_fund();
    fund.units = 10.0;
    let txn = Transaction::buy(fund.id, 755.0, 10.0, d(2024, 1, 5));
    Ledger {
        funds: vec![fund],
        transactions: vec![txn],
        ..Ledger::default()
    }
}

// ═══════════════════════════════════════════════════════════════════
// Encryption
// ═══════════════════════════════════════════════════════════════════

mod encryption {
    use super::*;

    #[test]
    fn default_kdf_params() {
        let p = KdfParams::default();
        assert_eq!(p.memory_cost, 65_536);
        assert_eq!(p.time_cost, 3);
        assert_eq!(p.parallelism, 4);
    }

    #[test]
    fn same_inputs_same_key() {
        let salt = [7u8; 16];
        let a = derive_key("hunter2", &salt, &KdfParams::fast()).unwrap();
        let b = derive_key("hunter2", &salt, &KdfParams::fast()).unwrap();
        let c = derive_key("hunter3", &salt, &KdfParams::fast()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn encrypt_then_decrypt() {
        let key = derive_key("pw", &[1u8; 16], &KdfParams::fast()).unwrap();
        let nonce = random_bytes::<12>().unwrap();
        let ciphertext = encrypt(b"ledger bytes", &key, &nonce).unwrap();
        assert_ne!(&ciphertext[..], b"ledger bytes");
        assert_eq!(decrypt(&ciphertext, &key, &nonce).unwrap(), b"ledger bytes");
    }

    #[test]
    fn wrong_key_fails_with_decryption() {
        let key = derive_key("pw", &[1u8; 16], &KdfParams::fast()).unwrap();
        let other = derive_key("other", &[1u8; 16], &KdfParams::fast()).unwrap();
        let nonce = [0u8; 12];
        let ciphertext = encrypt(b"secret", &key, &nonce).unwrap();
        assert!(matches!(
            decrypt(&ciphertext, &other, &nonce),
            Err(CoreError::Decryption)
        ));
    }

    #[test]
    fn random_bytes_differ() {
        let a = random_bytes::<16>().unwrap();
        let b = random_bytes::<16>().unwrap();
        assert_ne!(a, b);
    }
}

// ═══════════════════════════════════════════════════════════════════
// File format
// ═══════════════════════════════════════════════════════════════════

mod file_format {
    use super::*;

    #[test]
    fn header_layout() {
        let bytes = format::write_file(CURRENT_VERSION, &KdfParams::fast(), &[2u8; 16], &[3u8; 12], b"");
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[..4], MAGIC);
    }

    #[test]
    fn read_back_header_and_payload() {
        let bytes = format::write_file(CURRENT_VERSION, &KdfParams::fast(), &[2u8; 16], &[3u8; 12], b"payload");
        let (header, payload) = format::read_file(&bytes).unwrap();
        assert_eq!(header.version, CURRENT_VERSION);
        assert_eq!(header.kdf_params, KdfParams::fast());
        assert_eq!(header.salt, [2u8; 16]);
        assert_eq!(header.nonce, [3u8; 12]);
        assert_eq!(header.payload_len, 7);
        assert_eq!(payload, b"payload");
    }

    #[test]
    fn too_small() {
        assert!(matches!(
            format::read_file(b"OPTV"),
            Err(CoreError::InvalidFileFormat(_))
        ));
    }

    #[test]
    fn bad_magic() {
        let mut bytes = format::write_file(CURRENT_VERSION, &KdfParams::fast(), &[0u8; 16], &[0u8; 12], b"x");
        bytes[0] = b'X';
        assert!(matches!(
            format::read_file(&bytes),
            Err(CoreError::InvalidFileFormat(_))
        ));
    }

    #[test]
    fn future_version() {
        let bytes = format::write_file(CURRENT_VERSION + 1, &KdfParams::fast(), &[0u8; 16], &[0u8; 12], b"x");
        assert!(matches!(
            format::read_file(&bytes),
            Err(CoreError::UnsupportedVersion(v)) if v == CURRENT_VERSION + 1
        ));
    }

    #[test]
    fn kdf_params_out_of_range() {
        let params = KdfParams {
            memory_cost: 1,
            time_cost: 1,
            parallelism: 1,
        };
        let bytes = format::write_file(CURRENT_VERSION, &params, &[0u8; 16], &[0u8; 12], b"x");
        assert!(matches!(
            format::read_file(&bytes),
            Err(CoreError::InvalidFileFormat(_))
        ));
    }

    #[test]
    fn truncated_payload() {
        let mut bytes = format::write_file(CURRENT_VERSION, &KdfParams::fast(), &[0u8; 16], &[0u8; 12], b"0123456789");
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            format::read_file(&bytes),
            Err(CoreError::InvalidFileFormat(_))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// StorageManager
// ═══════════════════════════════════════════════════════════════════

mod storage_manager {
    use super::*;

    #[test]
    fn bytes_round_trip() {
        let ledger = sample_ledger();
        let bytes = StorageManager::save_to_bytes_with(&ledger, "pw", &KdfParams::fast()).unwrap();
        let loaded = StorageManager::load_from_bytes(&bytes, "pw").unwrap();
        assert_eq!(loaded, ledger);
    }

    #[test]
    fn wrong_password() {
        let bytes = StorageManager::save_to_bytes_with(&sample_ledger(), "pw", &KdfParams::fast()).unwrap();
        assert!(matches!(
            StorageManager::load_from_bytes(&bytes, "nope"),
            Err(CoreError::Decryption)
        ));
    }

    #[test]
    fn fresh_salt_every_save() {
        let ledger = sample_ledger();
        let a = StorageManager::save_to_bytes_with(&ledger, "pw", &KdfParams::fast()).unwrap();
        let b = StorageManager::save_to_bytes_with(&ledger, "pw", &KdfParams::fast()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.optv");
        let ledger = sample_ledger();

        StorageManager::save_to_file(&ledger, &path, "pw", &KdfParams::fast()).unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("ledger.optv.tmp").exists());
        assert_eq!(StorageManager::load_from_file(&path, "pw").unwrap(), ledger);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            StorageManager::load_from_file(&dir.path().join("none.optv"), "pw"),
            Err(CoreError::FileIO(_))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// LocalStore
// ═══════════════════════════════════════════════════════════════════

mod local_store {
    use super::*;

    #[tokio::test]
    async fn empty_collections_read_empty() {
        let store = LocalStore::in_memory();
        for collection in Collection::ALL {
            assert!(store.read_all(collection).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn append_update_delete() {
        let store = LocalStore::in_memory();
        let fund = sample_fund();
        let id = fund.id.to_string();

        store
            .append_record(Collection::Funds, records::to_record(&fund).unwrap())
            .await
            .unwrap();
        store
            .update_record(Collection::Funds, &id, records::fields([("current_nav", json!(80.0))]))
            .await
            .unwrap();

        let funds: Vec<Fund> = records::decode_all(store.read_all(Collection::Funds).await.unwrap());
        assert_eq!(funds.len(), 1);
        assert_eq!(funds[0].current_nav, 80.0);
        assert_eq!(funds[0].name, fund.name);

        store.delete_record(Collection::Funds, &id).await.unwrap();
        assert!(store.read_all(Collection::Funds).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_id_rejected() {
        let store = LocalStore::in_memory();
        let record = records::to_record(&sample_fund()).unwrap();
        store.append_record(Collection::Funds, record.clone()).await.unwrap();
        assert!(matches!(
            store.append_record(Collection::Funds, record).await,
            Err(CoreError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn malformed_record_rejected_and_nothing_stored() {
        let store = LocalStore::in_memory();
        let bad = records::fields([("name", json!("no id"))]);
        assert!(store.append_record(Collection::Funds, bad).await.is_err());
        assert!(store.read_all(Collection::Funds).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_update_rolls_back() {
        let store = LocalStore::in_memory();
        let fund = sample_fund();
        store
            .append_record(Collection::Funds, records::to_record(&fund).unwrap())
            .await
            .unwrap();

        let result = store
            .update_record(
                Collection::Funds,
                &fund.id.to_string(),
                records::fields([("current_nav", json!("not a number"))]),
            )
            .await;
        assert!(result.is_err());
        assert_eq!(store.snapshot().unwrap().funds, vec![fund]);
    }

    #[tokio::test]
    async fn missing_record_not_found() {
        let store = LocalStore::in_memory();
        assert!(matches!(
            store.delete_record(Collection::Sips, "missing").await,
            Err(CoreError::RecordNotFound { .. })
        ));
        assert!(matches!(
            store
                .update_record(Collection::Deposits, "missing", records::fields([("status", json!("Matured"))]))
                .await,
            Err(CoreError::RecordNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn persists_to_encrypted_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.optv");
        let fund = sample_fund();

        {
            let store = LocalStore::open(&path, "pw").unwrap().with_kdf_params(KdfParams::fast());
            assert!(!path.exists());
            store
                .append_record(Collection::Funds, records::to_record(&fund).unwrap())
                .await
                .unwrap();
            assert!(path.exists());
        }

        let reopened = LocalStore::open(&path, "pw").unwrap();
        let funds: Vec<Fund> = records::decode_all(reopened.read_all(Collection::Funds).await.unwrap());
        assert_eq!(funds, vec![fund]);

        assert!(matches!(
            LocalStore::open(&path, "wrong"),
            Err(CoreError::Decryption)
        ));
    }

    #[test]
    fn json_export_import() {
        let source = LocalStore::from_ledger(sample_ledger());
        let json = source.export_json().unwrap();

        let target = LocalStore::in_memory();
        assert_eq!(target.import_json(&json).unwrap(), 2);
        assert_eq!(target.snapshot().unwrap(), source.snapshot().unwrap());
    }

    #[test]
    fn settings_round_trip() {
        let store = LocalStore::in_memory();
        let mut settings = store.settings().unwrap();
        assert_eq!(settings.currency_symbol, "₹");
        settings.recent_transactions = 10;
        store.set_settings(settings.clone()).unwrap();
        assert_eq!(store.settings().unwrap(), settings);
    }

    #[test]
    fn name() {
        assert_eq!(LocalStore::in_memory().name(), "LocalStore");
        assert_eq!(Fund::COLLECTION, Collection::Funds);
    }
}

// ═══════════════════════════════════════════════════════════════════
// SheetStore
// ═══════════════════════════════════════════════════════════════════

mod sheet_store {
    use super::*;

    #[test]
    fn grid_to_records_uses_header_row() {
        let grid = vec![
            vec![json!("id"), json!("name"), json!("current_nav"), json!("fund_code")],
            vec![json!("f1"), json!("Alpha"), json!(101.5), json!("")],
            vec![json!(""), json!(""), json!(""), json!("")],
            vec![json!("f2"), json!("Beta"), json!(20)],
        ];
        let rows = sheets::grid_to_records(&grid);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], json!("Alpha"));
        assert_eq!(rows[0]["current_nav"], json!(101.5));
        assert!(!rows[0].contains_key("fund_code"));
        assert_eq!(rows[1]["current_nav"], json!(20));
        assert!(!rows[1].contains_key("fund_code"));
    }

    #[test]
    fn empty_grid() {
        assert!(sheets::grid_to_records(&[]).is_empty());
        assert!(sheets::grid_to_records(&[vec![json!("id")]]).is_empty());
    }

    #[test]
    fn record_to_row_follows_headers() {
        let headers: Vec<String> = ["id", "name", "notes", "units"].iter().map(|s| s.to_string()).collect();
        let record = records::fields([
            ("units", json!(2.5)),
            ("id", json!("f1")),
            ("name", json!("Alpha")),
            ("notes", json!(null)),
            ("extra", json!("dropped")),
        ]);
        let row = sheets::record_to_row(&headers, &record);
        assert_eq!(row, vec![json!("f1"), json!("Alpha"), json!(""), json!(2.5)]);
    }

    #[test]
    fn headers_put_id_first() {
        let fund = sample_fund();
        let record = records::to_record(&fund).unwrap();
        let headers = sheets::headers_for(&record);
        assert_eq!(headers[0], "id");
        assert_eq!(headers.len(), record.len());
    }

    #[test]
    fn fund_survives_a_sheet_round_trip() {
        let mut fund = sample_fund().with_code("122639");
        fund.units = 12.25;
        let record = records::to_record(&fund).unwrap();
        let headers = sheets::headers_for(&record);
        let grid = vec![
            headers.iter().cloned().map(serde_json::Value::String).collect(),
            sheets::record_to_row(&headers, &record),
        ];
        let back: Vec<Fund> = records::decode_all(sheets::grid_to_records(&grid));
        assert_eq!(back, vec![fund]);
    }

    #[test]
    fn column_letters() {
        assert_eq!(sheets::column_letter(1), "A");
        assert_eq!(sheets::column_letter(26), "Z");
        assert_eq!(sheets::column_letter(27), "AA");
        assert_eq!(sheets::column_letter(52), "AZ");
        assert_eq!(sheets::column_letter(703), "AAA");
    }

    #[tokio::test]
    async fn missing_token_is_unavailable() {
        let store = SheetStore::new("spreadsheet", None);
        assert!(matches!(
            store.read_all(Collection::Funds).await,
            Err(CoreError::StoreUnavailable(_))
        ));

        let blank = SheetStore::new("spreadsheet", Some("  ".into()));
        assert!(matches!(
            blank.append_record(Collection::Funds, records::fields([("id", json!("x"))])).await,
            Err(CoreError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        let store = SheetStore::new("spreadsheet", Some("token".into()))
            .with_base_url("http://127.0.0.1:1");
        assert!(matches!(
            store.read_all(Collection::Transactions).await,
            Err(CoreError::StoreUnavailable(_))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// SheetStore over HTTP (in-process Sheets API stand-in)
// ═══════════════════════════════════════════════════════════════════

mod sheet_store_http {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::{Method, StatusCode, Uri};
    use axum::{Json, Router};
    use serde_json::Value;
    use tokio::net::TcpListener;

    const FUNDS_SHEET_ID: i64 = 7;

    #[derive(Default)]
    struct Sheet {
        grid: Vec<Vec<Value>>,
        fail_batch_update: bool,
        /// `(sheetId, startIndex, endIndex)` of every row deletion applied
        deleted: Vec<(i64, usize, usize)>,
        calls: Vec<String>,
    }

    type Shared = Arc<Mutex<Sheet>>;

    /// Serve `sheet` as the MutualFunds worksheet of a one-spreadsheet API.
    async fn serve(sheet: Sheet) -> (SheetStore, Shared) {
        let state: Shared = Arc::new(Mutex::new(sheet));
        let router = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let store = SheetStore::new("sheet-1", Some("token".into()))
            .with_base_url(format!("http://{addr}"));
        (store, state)
    }

    async fn handle(
        State(state): State<Shared>,
        method: Method,
        uri: Uri,
        body: String,
    ) -> (StatusCode, Json<Value>) {
        let mut sheet = state.lock().unwrap();
        respond(&mut sheet, &method, uri.path(), &body)
    }

    fn respond(sheet: &mut Sheet, method: &Method, path: &str, body: &str) -> (StatusCode, Json<Value>) {
        sheet.calls.push(format!("{method} {path}"));
        let payload: Value = serde_json::from_str(body).unwrap_or(Value::Null);

        if path.ends_with(":batchUpdate") {
            if sheet.fail_batch_update {
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "backend" })));
            }
            let range = &payload["requests"][0]["deleteDimension"]["range"];
            let sheet_id = range["sheetId"].as_i64().unwrap();
            let start = range["startIndex"].as_u64().unwrap() as usize;
            let end = range["endIndex"].as_u64().unwrap() as usize;
            sheet.grid.drain(start..end);
            sheet.deleted.push((sheet_id, start, end));
            return (StatusCode::OK, Json(json!({})));
        }
        if path.ends_with(":clear") {
            sheet.grid.clear();
            return (StatusCode::OK, Json(json!({})));
        }
        if path.ends_with(":append") {
            let rows = payload["values"].as_array().cloned().unwrap_or_default();
            for row in rows {
                sheet.grid.push(row.as_array().cloned().unwrap_or_default());
            }
            return (StatusCode::OK, Json(json!({})));
        }
        if *method == Method::PUT {
            // ".../values/MutualFunds!A4:C4" → sheet row 4
            let (_, cells) = path.rsplit_once("!A").unwrap();
            let row: usize = cells.split(':').next().unwrap().parse().unwrap();
            let values = payload["values"][0].as_array().cloned().unwrap_or_default();
            sheet.grid[row - 1] = values;
            return (StatusCode::OK, Json(json!({})));
        }
        if path.contains("/values/") {
            return (StatusCode::OK, Json(json!({ "values": sheet.grid })));
        }
        (
            StatusCode::OK,
            Json(json!({
                "sheets": [
                    { "properties": { "sheetId": 3, "title": "Transactions" } },
                    { "properties": { "sheetId": FUNDS_SHEET_ID, "title": "MutualFunds" } },
                ]
            })),
        )
    }

    fn funds_grid() -> Vec<Vec<Value>> {
        vec![
            vec![json!("id"), json!("name"), json!("units")],
            vec![json!("a"), json!("Alpha"), json!(1.5)],
            vec![json!("b"), json!("Beta"), json!(2)],
            vec![json!(42), json!("Gamma"), json!(3)],
        ]
    }

    fn ids(rows: &[Record]) -> Vec<String> {
        rows.iter().filter_map(records::record_id).collect()
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_row() {
        let (store, state) = serve(Sheet { grid: funds_grid(), ..Sheet::default() }).await;

        store.delete_record(Collection::Funds, "b").await.unwrap();

        let rows = store.read_all(Collection::Funds).await.unwrap();
        assert_eq!(ids(&rows), vec!["a", "42"]);
        let sheet = state.lock().unwrap();
        assert_eq!(sheet.deleted, vec![(FUNDS_SHEET_ID, 2, 3)]);
        assert!(sheet.calls.iter().all(|call| !call.ends_with(":clear")));
    }

    #[tokio::test]
    async fn failed_delete_keeps_every_row() {
        let (store, state) = serve(Sheet {
            grid: funds_grid(),
            fail_batch_update: true,
            ..Sheet::default()
        })
        .await;

        assert!(matches!(
            store.delete_record(Collection::Funds, "a").await,
            Err(CoreError::Api { .. })
        ));

        let rows = store.read_all(Collection::Funds).await.unwrap();
        assert_eq!(ids(&rows), vec!["a", "b", "42"]);
        assert!(state.lock().unwrap().deleted.is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let (store, state) = serve(Sheet { grid: funds_grid(), ..Sheet::default() }).await;

        assert!(matches!(
            store.delete_record(Collection::Funds, "zzz").await,
            Err(CoreError::RecordNotFound { .. })
        ));
        let sheet = state.lock().unwrap();
        assert!(sheet.calls.iter().all(|call| !call.ends_with(":batchUpdate")));
        assert_eq!(sheet.grid.len(), 4);
    }

    #[tokio::test]
    async fn update_rewrites_the_row_with_a_numeric_id() {
        let (store, _state) = serve(Sheet { grid: funds_grid(), ..Sheet::default() }).await;

        store
            .update_record(Collection::Funds, "42", records::fields([("name", json!("Renamed"))]))
            .await
            .unwrap();

        let rows = store.read_all(Collection::Funds).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2]["name"], json!("Renamed"));
        assert_eq!(rows[2]["units"], json!(3));
        assert_eq!(rows[0]["name"], json!("Alpha"));
        assert_eq!(rows[1]["name"], json!("Beta"));
    }

    #[tokio::test]
    async fn append_to_empty_sheet_writes_headers_first() {
        let (store, state) = serve(Sheet::default()).await;

        store
            .append_record(
                Collection::Funds,
                records::fields([("name", json!("Alpha")), ("id", json!("a"))]),
            )
            .await
            .unwrap();

        assert_eq!(
            state.lock().unwrap().grid,
            vec![vec![json!("id"), json!("name")], vec![json!("a"), json!("Alpha")]]
        );
        assert_eq!(ids(&store.read_all(Collection::Funds).await.unwrap()), vec!["a"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// StoreConfig
// ═══════════════════════════════════════════════════════════════════

mod store_config {
    use super::*;

    #[test]
    fn parses_sheets_config() {
        let config = StoreConfig::from_json(
            r#"{ "backend": "sheets", "spreadsheet_id": "abc123", "access_token": "tok" }"#,
        )
        .unwrap();
        assert_eq!(
            config,
            StoreConfig::Sheets {
                spreadsheet_id: "abc123".into(),
                access_token: Some("tok".into()),
                base_url: None,
            }
        );
        assert_eq!(config.build().unwrap().name(), "GoogleSheets");
    }

    #[test]
    fn default_is_in_memory_local() {
        let store = StoreConfig::default().build().unwrap();
        assert_eq!(store.name(), "LocalStore");
    }

    #[test]
    fn local_file_needs_password() {
        let config = StoreConfig::Local {
            path: "ledger.optv".into(),
            password: String::new(),
        };
        assert!(matches!(config.build(), Err(CoreError::InvalidArgument(_))));
    }

    #[test]
    fn empty_spreadsheet_id_rejected() {
        let config = StoreConfig::Sheets {
            spreadsheet_id: " ".into(),
            access_token: None,
            base_url: None,
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn unknown_backend_rejected() {
        assert!(StoreConfig::from_json(r#"{ "backend": "ftp" }"#).is_err());
    }
}
