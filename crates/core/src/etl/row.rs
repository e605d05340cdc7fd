//! Canonical source rows and raw-ledger normalization.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use finstar_shared::types::LedgerRowId;

use super::defaults::DefaultPolicy;
use super::error::EtlError;

/// A flat financial row in canonical shape.
///
/// Both invocation paths produce this shape: inline rows arrive already
/// shaped, raw ledger rows are mapped by [`SourceRow::from_ledger`].
/// Downstream stages never know which path produced a row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRow {
    /// Project code; natural key of the project dimension.
    pub project: String,
    /// Client display name; natural key of the client dimension.
    pub client: String,
    /// Summary account code.
    pub account_summary: String,
    /// Account display name.
    pub account_name: String,
    /// Period in "MM/YYYY" form.
    pub period: String,
    /// Ledger amount.
    pub amount: Decimal,
    /// Revenue/cost nature of the account.
    pub nature: Option<String>,
    /// Business type (e.g. "Market").
    pub business_type: Option<String>,
    /// Business line the project belongs to.
    pub business_line: Option<String>,
    /// Source-system id of the resource, when known.
    pub resource_id: Option<String>,
    /// Resource display name, when known.
    pub resource_name: Option<String>,
}

impl SourceRow {
    /// Checks that the fields every fact needs are present.
    ///
    /// The account display name is not required: accounts are keyed by the
    /// (summary code, display name) pair and an empty display name is a
    /// valid key half.
    ///
    /// # Errors
    ///
    /// Returns [`EtlError::MissingField`] naming the first blank required
    /// field.
    pub fn validate(&self) -> Result<(), EtlError> {
        Self::required("project", &self.project)?;
        Self::required("client", &self.client)?;
        Self::required("account_summary", &self.account_summary)?;
        Self::required("period", &self.period)?;
        Ok(())
    }

    fn required(field: &'static str, value: &str) -> Result<(), EtlError> {
        if value.trim().is_empty() {
            return Err(EtlError::MissingField { field });
        }
        Ok(())
    }

    /// Maps a raw ledger record onto the canonical row shape.
    ///
    /// The mapping is fixed: the ledger account feeds both account fields,
    /// and `(month, year)` become the zero-padded "MM/YYYY" period string.
    /// Absent fields take their named defaults from the policy table.
    #[must_use]
    pub fn from_ledger(record: &RawLedgerRecord, policy: &DefaultPolicy) -> Self {
        Self {
            project: non_blank(record.project.as_deref())
                .unwrap_or_else(|| policy.ledger_project.to_string()),
            client: non_blank(record.client.as_deref())
                .unwrap_or_else(|| policy.ledger_client.to_string()),
            account_summary: record.account.clone(),
            account_name: record.account.clone(),
            period: format!("{:02}/{}", record.month, record.year),
            amount: record.amount.unwrap_or(policy.amount),
            nature: Some(
                non_blank(record.nature.as_deref())
                    .unwrap_or_else(|| policy.ledger_nature.to_string()),
            ),
            business_type: None,
            business_line: None,
            resource_id: None,
            resource_name: None,
        }
    }
}

/// A row of the external raw-ledger collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLedgerRecord {
    /// Primary key; rows are consumed in ascending id order.
    pub id: LedgerRowId,
    /// Project code, when the ledger recorded one.
    pub project: Option<String>,
    /// Client name, when the ledger recorded one.
    pub client: Option<String>,
    /// Ledger account; feeds both the summary code and the display name.
    pub account: String,
    /// Posted amount, when the ledger recorded one.
    pub amount: Option<Decimal>,
    /// Calendar month of the posting (validated downstream, not here).
    pub month: u32,
    /// Calendar year of the posting.
    pub year: i32,
    /// Revenue/cost nature, when recorded.
    pub nature: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
