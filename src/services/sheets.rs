use crate::models::Roster;
use crate::services::store::{PairingStore, StoreError};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A1 ranges the roster is read from
#[derive(Debug, Clone)]
pub struct SheetRanges {
    pub ordinary: String,
    pub newcomers: String,
    pub leads: String,
    pub forbidden_pairs: String,
}

/// Where the pairing columns are written
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub sheet: String,
    pub first_column: String,
    pub last_column: String,
    pub start_row: u32,
}

impl OutputLayout {
    /// Range covering exactly `rows` rows from the start row
    pub fn range_for(&self, rows: usize) -> String {
        let end_row = self.start_row as usize + rows.max(1) - 1;
        format!(
            "{}!{}{}:{}{}",
            self.sheet, self.first_column, self.start_row, self.last_column, end_row
        )
    }

    /// Open-ended range below the first `written` rows
    pub fn stale_range(&self, written: usize) -> String {
        format!(
            "{}!{}{}:{}",
            self.sheet,
            self.first_column,
            self.start_row as usize + written,
            self.last_column
        )
    }
}

/// Value range payload of the spreadsheet values API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(rename = "majorDimension", default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Spreadsheet values API client
///
/// Handles all communication with the sheet backing the rotation:
/// - Reading the ordinary, newcomer and lead columns
/// - Reading the forbidden pair table
/// - Writing the giver/receiver columns
///
/// Requests carry a pre-issued bearer token; obtaining and refreshing it is
/// left to whoever deploys the service.
pub struct SheetsClient {
    base_url: String,
    spreadsheet_id: String,
    access_token: String,
    client: Client,
    ranges: SheetRanges,
    output: OutputLayout,
}

impl SheetsClient {
    /// Create a new spreadsheet client
    pub fn new(
        base_url: String,
        spreadsheet_id: String,
        access_token: String,
        ranges: SheetRanges,
        output: OutputLayout,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            spreadsheet_id,
            access_token,
            client,
            ranges,
            output,
        })
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url.trim_end_matches('/'),
            self.spreadsheet_id,
            urlencoding::encode(range)
        )
    }

    async fn check_status(
        response: reqwest::Response,
        action: &str,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::error!("Failed to {}: {} - {}", action, status, body);
        Err(StoreError::ApiError(format!("Failed to {}: {}", action, status)))
    }

    /// Read the raw rows of a range
    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let url = self.values_url(range);

        tracing::debug!("Reading range {}", range);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let response = Self::check_status(response, &format!("read range {}", range)).await?;

        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse range {}: {}", range, e)))?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    /// Read a single-column range as trimmed, non-blank names
    pub async fn get_names(&self, range: &str) -> Result<Vec<String>, StoreError> {
        let rows = self.get_values(range).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .map(|cell| cell.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect())
    }

    /// Read the forbidden pair table; rows without two names are ignored
    pub async fn get_forbidden_pairs(&self) -> Result<Vec<(String, String)>, StoreError> {
        let rows = self.get_values(&self.ranges.forbidden_pairs).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let mut cells = row.into_iter().map(|c| c.trim().to_string());
                match (cells.next(), cells.next()) {
                    (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => Some((a, b)),
                    _ => None,
                }
            })
            .collect())
    }

    /// Blank the output columns below the first `written` rows
    pub async fn clear_output(&self, written: usize) -> Result<(), StoreError> {
        let range = self.output.stale_range(written);
        let url = format!("{}:clear", self.values_url(&range));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::check_status(response, &format!("clear range {}", range)).await?;

        Ok(())
    }

    /// Write the pairs as two parallel columns starting at the output row
    pub async fn write_pairings(&self, pairs: &[(String, String)]) -> Result<(), StoreError> {
        let range = self.output.range_for(pairs.len());
        let url = format!("{}?valueInputOption=RAW", self.values_url(&range));

        let payload = ValueRange {
            range: Some(range.clone()),
            major_dimension: Some("ROWS".to_string()),
            values: pairs
                .iter()
                .map(|(giver, receiver)| {
                    vec![
                        serde_json::Value::String(giver.clone()),
                        serde_json::Value::String(receiver.clone()),
                    ]
                })
                .collect(),
        };

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await?;
        Self::check_status(response, &format!("write range {}", range)).await?;

        tracing::debug!("Wrote {} pairs to {}", pairs.len(), range);

        Ok(())
    }
}

impl PairingStore for SheetsClient {
    async fn load_roster(&self) -> Result<Roster, StoreError> {
        let ordinary = self.get_names(&self.ranges.ordinary).await?;
        let newcomers = self.get_names(&self.ranges.newcomers).await?;
        let leads = self.get_names(&self.ranges.leads).await?;
        let forbidden_pairs = self.get_forbidden_pairs().await?;

        tracing::debug!(
            "Loaded roster: {} ordinary, {} newcomers, {} leads, {} forbidden pairs",
            ordinary.len(),
            newcomers.len(),
            leads.len(),
            forbidden_pairs.len()
        );

        Ok(Roster {
            ordinary,
            newcomers,
            leads,
            forbidden_pairs,
        })
    }

    /// Overwrite the rotation in place, then blank whatever the previous
    /// rotation left below it. A failed write leaves the old rows untouched.
    async fn save_pairings(&self, pairs: &[(String, String)]) -> Result<(), StoreError> {
        if !pairs.is_empty() {
            self.write_pairings(pairs).await?;
        }
        self.clear_output(pairs.len()).await
    }
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
