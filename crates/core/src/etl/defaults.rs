//! Named fallback values applied when source fields are absent.

use rust_decimal::Decimal;

use super::dimension::ResourceType;

/// Policy table mapping "field absent" to a named default.
///
/// Every fallback the engine applies lives here; attribute constructors and
/// the row normalizer never invent values inline, so "explicitly empty" and
/// "never supplied" cannot drift apart between call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPolicy {
    /// Business type for projects and clients that carry none.
    pub business_type: &'static str,
    /// Account nature when the source row carries none.
    pub account_nature: &'static str,
    /// Nature assumed for a raw ledger row without one.
    pub ledger_nature: &'static str,
    /// Project code for raw ledger rows without one.
    pub ledger_project: &'static str,
    /// Client name for raw ledger rows without one.
    pub ledger_client: &'static str,
    /// Display name of the sentinel resource row used when a source row
    /// has no resource identity.
    pub sentinel_resource: &'static str,
    /// Resource classification when no stronger signal is present.
    pub resource_type: ResourceType,
    /// Ledger amount when the source carries none.
    pub amount: Decimal,
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self {
            business_type: "Market",
            account_nature: "COST",
            ledger_nature: "REVENUE",
            ledger_project: "GENERAL",
            ledger_client: "UNASSIGNED",
            sentinel_resource: "UNIDENTIFIED",
            resource_type: ResourceType::Other,
            amount: Decimal::ZERO,
        }
    }
}
