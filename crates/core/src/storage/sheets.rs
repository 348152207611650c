use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;

use super::records;
use super::traits::{Collection, Record, RecordStore};

pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4";

const PROVIDER: &str = "GoogleSheets";

/// Record store backed by a Google Sheets spreadsheet.
///
/// - **Layout**: one worksheet per collection (see `Collection::worksheet`),
///   first row holds the field names, one record per following row.
/// - **Auth**: an OAuth2 access token with the spreadsheets scope, sent as a
///   bearer token. Obtaining and refreshing it is up to the caller.
/// - **Consistency**: none. Updates and deletes re-read the sheet first; the
///   last writer wins.
pub struct SheetStore {
    client: Client,
    spreadsheet_id: String,
    access_token: Option<String>,
    base_url: String,
}

impl SheetStore {
    pub fn new(spreadsheet_id: impl Into<String>, access_token: Option<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            spreadsheet_id: spreadsheet_id.into(),
            access_token,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the store at a different API root (proxies, emulators).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn token(&self) -> Result<&str, CoreError> {
        match self.access_token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(CoreError::StoreUnavailable(
                "no Google Sheets access token configured".into(),
            )),
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url, self.spreadsheet_id, range
        )
    }

    /// Send an authorized request and turn HTTP failures into errors.
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<reqwest::Response, CoreError> {
        let response = request.bearer_auth(self.token()?).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(CoreError::StoreUnavailable(format!(
                "Google Sheets rejected the credentials while trying to {what} ({status})"
            )));
        }
        Err(CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to {what}: HTTP {status}: {body}"),
        })
    }

    /// All rows of a collection's worksheet, header row included.
    async fn fetch_grid(&self, collection: Collection) -> Result<Vec<Vec<Value>>, CoreError> {
        let url = self.values_url(collection.worksheet());
        let request = self.client.get(&url).query(&[
            ("valueRenderOption", "UNFORMATTED_VALUE"),
            ("dateTimeRenderOption", "FORMATTED_STRING"),
        ]);
        let response = self.send(request, &format!("read {collection}")).await?;

        let range: ValueRange = response.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse values of {collection}: {e}"),
        })?;
        Ok(range.values)
    }

    async fn put_rows(&self, range: &str, rows: Vec<Vec<Value>>, what: &str) -> Result<(), CoreError> {
        let request = self
            .client
            .put(self.values_url(range))
            .query(&[("valueInputOption", "RAW")])
            .json(&ValueRange { values: rows });
        self.send(request, what).await?;
        Ok(())
    }

    fn spreadsheet_url(&self) -> String {
        format!("{}/spreadsheets/{}", self.base_url, self.spreadsheet_id)
    }

    /// Numeric `sheetId` of a collection's worksheet; structural edits address
    /// worksheets by id rather than title.
    async fn sheet_id(&self, collection: Collection) -> Result<i64, CoreError> {
        let request = self
            .client
            .get(self.spreadsheet_url())
            .query(&[("fields", "sheets.properties")]);
        let response = self
            .send(request, &format!("look up worksheet {collection}"))
            .await?;

        let spreadsheet: Spreadsheet = response.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse spreadsheet metadata: {e}"),
        })?;
        spreadsheet
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties)
            .find(|properties| properties.title == collection.worksheet())
            .map(|properties| properties.sheet_id)
            .ok_or_else(|| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Worksheet {} not found in spreadsheet", collection.worksheet()),
            })
    }

    /// Remove one row (0-based, header row = 0) in a single request; the rows
    /// below shift up.
    async fn delete_row(&self, collection: Collection, row_index: usize) -> Result<(), CoreError> {
        let sheet_id = self.sheet_id(collection).await?;
        let body = serde_json::json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": row_index,
                        "endIndex": row_index + 1,
                    }
                }
            }]
        });
        let request = self
            .client
            .post(format!("{}:batchUpdate", self.spreadsheet_url()))
            .json(&body);
        self.send(request, &format!("delete row {} of {collection}", row_index + 1))
            .await?;
        Ok(())
    }
}

// ── Sheets API payloads ─────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
struct Sheet {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

// ── Grid ↔ record conversion ────────────────────────────────────────

/// Turn a worksheet grid (header row first) into records. Blank cells and
/// blank header columns are left out; fully blank rows are skipped.
pub fn grid_to_records(grid: &[Vec<Value>]) -> Vec<Record> {
    let Some((header_row, rows)) = grid.split_first() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();

    rows.iter()
        .map(|row| {
            headers
                .iter()
                .zip(row.iter())
                .filter(|(header, cell)| !header.is_empty() && !is_blank(cell))
                .map(|(header, cell)| (header.clone(), cell.clone()))
                .collect::<Record>()
        })
        .filter(|record| !record.is_empty())
        .collect()
}

/// Lay a record out as a row in `headers` order. Fields without a column
/// are dropped (and logged); missing fields become blank cells.
pub fn record_to_row(headers: &[String], record: &Record) -> Vec<Value> {
    for key in record.keys() {
        if !headers.contains(key) {
            log::warn!("Dropping field '{key}': the worksheet has no such column");
        }
    }
    headers
        .iter()
        .map(|header| match record.get(header) {
            None | Some(Value::Null) => Value::String(String::new()),
            Some(nested @ (Value::Array(_) | Value::Object(_))) => Value::String(nested.to_string()),
            Some(value) => value.clone(),
        })
        .collect()
}

/// Header row for a fresh worksheet: `id` first, then the remaining fields.
pub fn headers_for(record: &Record) -> Vec<String> {
    let mut headers: Vec<String> = Vec::with_capacity(record.len());
    if record.contains_key("id") {
        headers.push("id".to_string());
    }
    headers.extend(record.keys().filter(|k| k.as_str() != "id").cloned());
    headers
}

/// 1-based column number → A1 column letters (1 → "A", 27 → "AA").
pub fn column_letter(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push(b'A' + rem as u8);
        column = (column - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_blank(cell: &Value) -> bool {
    match cell {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Index (into the grid, header row = 0) of the row whose `id` column equals `id`.
fn find_row(grid: &[Vec<Value>], id: &str) -> Option<usize> {
    let id_col = grid.first()?.iter().position(|h| cell_text(h) == "id")?;
    grid.iter()
        .enumerate()
        .skip(1)
        .find(|(_, row)| row.get(id_col).map(cell_text).as_deref() == Some(id))
        .map(|(idx, _)| idx)
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RecordStore for SheetStore {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn read_all(&self, collection: Collection) -> Result<Vec<Record>, CoreError> {
        let grid = self.fetch_grid(collection).await?;
        let records = grid_to_records(&grid);
        log::debug!("Read {} {collection} records from Google Sheets", records.len());
        Ok(records)
    }

    async fn append_record(&self, collection: Collection, record: Record) -> Result<(), CoreError> {
        let grid = self.fetch_grid(collection).await?;

        let mut rows = Vec::with_capacity(2);
        let headers: Vec<String> = match grid.first() {
            Some(header_row) if !header_row.is_empty() => header_row.iter().map(cell_text).collect(),
            _ => {
                let headers = headers_for(&record);
                rows.push(headers.iter().cloned().map(Value::String).collect());
                headers
            }
        };
        rows.push(record_to_row(&headers, &record));

        let request = self
            .client
            .post(self.values_url(&format!("{}:append", collection.worksheet())))
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&ValueRange { values: rows });
        self.send(request, &format!("append to {collection}")).await?;
        Ok(())
    }

    async fn update_record(
        &self,
        collection: Collection,
        id: &str,
        fields: Record,
    ) -> Result<(), CoreError> {
        let grid = self.fetch_grid(collection).await?;
        let row_idx = find_row(&grid, id).ok_or_else(|| CoreError::not_found(collection, id))?;
        let headers: Vec<String> = grid[0].iter().map(cell_text).collect();

        let mut record: Record = headers
            .iter()
            .cloned()
            .zip(grid[row_idx].iter().cloned())
            .collect();
        records::merge_fields(&mut record, fields);
        let row = record_to_row(&headers, &record);

        let sheet_row = row_idx + 1;
        let range = format!(
            "{}!A{sheet_row}:{}{sheet_row}",
            collection.worksheet(),
            column_letter(headers.len().max(1))
        );
        self.put_rows(&range, vec![row], &format!("update {collection} record {id}"))
            .await
    }

    async fn delete_record(&self, collection: Collection, id: &str) -> Result<(), CoreError> {
        let grid = self.fetch_grid(collection).await?;
        let row_idx = find_row(&grid, id).ok_or_else(|| CoreError::not_found(collection, id))?;
        self.delete_row(collection, row_idx).await?;
        log::debug!("Deleted {collection} record {id} from Google Sheets");
        Ok(())
    }
}
