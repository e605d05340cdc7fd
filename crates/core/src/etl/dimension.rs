//! Dimension natural keys and attribute records.
//!
//! Resolution itself lives in the engine; this module is the pure half of
//! the contract: what identifies a dimension row and what a new row looks
//! like when first seen. Dimensions are append-only with respect to their
//! natural key; attributes are captured once, at first sight.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::defaults::DefaultPolicy;
use super::period::PeriodAttributes;
use super::row::SourceRow;

/// The five dimension tables of the warehouse star schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionKind {
    /// Project dimension, keyed by project code.
    Project,
    /// Client dimension, keyed by client name.
    Client,
    /// Account dimension, keyed by the (summary code, display name) pair.
    Account,
    /// Period dimension, keyed by the original "MM/YYYY" string.
    Period,
    /// Resource dimension, keyed by resource name or the sentinel.
    Resource,
}

impl DimensionKind {
    /// Stable lowercase name used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Client => "client",
            Self::Account => "account",
            Self::Period => "period",
            Self::Resource => "resource",
        }
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes a natural-key component.
///
/// One shared function guarantees a logical key normalizes identically
/// regardless of call site: leading/trailing whitespace is removed and
/// internal runs of whitespace collapse to single spaces.
#[must_use]
pub fn normalize_natural_key(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classification of a resource dimension row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    /// Salaried employee, identified by a source-system id.
    Clt,
    /// Subcontracted worker.
    Subcontracted,
    /// Anything without a stronger signal, including the sentinel.
    Other,
}

impl ResourceType {
    /// Stable name as stored in the warehouse.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clt => "CLT",
            Self::Subcontracted => "Subcontracted",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The business-meaningful identity of a dimension row.
///
/// A natural key maps to exactly one surrogate id for the life of the
/// warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NaturalKey {
    /// Project code.
    Project {
        /// Normalized project code.
        code: String,
    },
    /// Client display name.
    Client {
        /// Normalized client name.
        name: String,
    },
    /// The (summary code, display name) pair: two accounts sharing a
    /// summary code but differing display names are distinct rows.
    Account {
        /// Normalized summary account code.
        summary_code: String,
        /// Normalized account display name.
        display_name: String,
    },
    /// The original "MM/YYYY" string, not its derived attributes.
    Period {
        /// Trimmed original period string.
        original: String,
    },
    /// Resource display name; the sentinel name when identity is absent.
    Resource {
        /// Normalized resource name.
        name: String,
    },
}

impl NaturalKey {
    /// The dimension this key identifies a row of.
    #[must_use]
    pub const fn kind(&self) -> DimensionKind {
        match self {
            Self::Project { .. } => DimensionKind::Project,
            Self::Client { .. } => DimensionKind::Client,
            Self::Account { .. } => DimensionKind::Account,
            Self::Period { .. } => DimensionKind::Period,
            Self::Resource { .. } => DimensionKind::Resource,
        }
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project { code } => f.write_str(code),
            Self::Client { name } | Self::Resource { name } => f.write_str(name),
            Self::Account {
                summary_code,
                display_name,
            } => write!(f, "{summary_code}/{display_name}"),
            Self::Period { original } => f.write_str(original),
        }
    }
}

/// Attributes for a new project dimension row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Project code; the natural key.
    pub code: String,
    /// Display name; the source supplies none, so the code doubles as name.
    pub name: String,
    /// Business type, defaulted when absent.
    pub business_type: String,
    /// Business line; stays empty when never supplied.
    pub business_line: Option<String>,
}

impl NewProject {
    /// Builds project attributes from a canonical row.
    #[must_use]
    pub fn from_row(row: &SourceRow, policy: &DefaultPolicy) -> Self {
        let code = normalize_natural_key(&row.project);
        Self {
            name: code.clone(),
            code,
            business_type: trimmed_or(row.business_type.as_deref(), policy.business_type),
            business_line: trimmed(row.business_line.as_deref()),
        }
    }
}

/// Attributes for a new client dimension row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    /// Client display name; the natural key.
    pub name: String,
    /// Client type; the row's business type, defaulted when absent.
    pub client_type: String,
}

impl NewClient {
    /// Builds client attributes from a canonical row.
    #[must_use]
    pub fn from_row(row: &SourceRow, policy: &DefaultPolicy) -> Self {
        Self {
            name: normalize_natural_key(&row.client),
            client_type: trimmed_or(row.business_type.as_deref(), policy.business_type),
        }
    }
}

/// Attributes for a new account dimension row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Summary account code; first half of the natural key.
    pub summary_code: String,
    /// Account display name; second half of the natural key.
    pub display_name: String,
    /// Upper-cased revenue/cost nature, defaulted when absent.
    pub nature: String,
}

impl NewAccount {
    /// Builds account attributes from a canonical row.
    #[must_use]
    pub fn from_row(row: &SourceRow, policy: &DefaultPolicy) -> Self {
        Self {
            summary_code: normalize_natural_key(&row.account_summary),
            display_name: normalize_natural_key(&row.account_name),
            nature: trimmed_or(row.nature.as_deref(), policy.account_nature).to_uppercase(),
        }
    }
}

/// Attributes for a new resource dimension row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResource {
    /// Display name; the natural key. The sentinel name when the source
    /// row has no resource identity.
    pub name: String,
    /// Inferred classification.
    pub resource_type: ResourceType,
}

impl NewResource {
    /// Builds resource attributes, falling back to the sentinel when the
    /// row carries neither a resource id nor a name.
    #[must_use]
    pub fn from_row(row: &SourceRow, policy: &DefaultPolicy) -> Self {
        let id = trimmed(row.resource_id.as_deref());
        let name = trimmed(row.resource_name.as_deref());

        if id.is_none() && name.is_none() {
            return Self::sentinel(policy);
        }

        let resource_type = infer_resource_type(id.as_deref(), name.as_deref(), policy);
        Self {
            name: name
                .map(|n| normalize_natural_key(&n))
                .unwrap_or_else(|| policy.sentinel_resource.to_string()),
            resource_type,
        }
    }

    /// The sentinel row reused whenever a source row lacks resource
    /// identity. Exactly one such row exists per warehouse.
    #[must_use]
    pub fn sentinel(policy: &DefaultPolicy) -> Self {
        Self {
            name: policy.sentinel_resource.to_string(),
            resource_type: policy.resource_type,
        }
    }
}

/// Infers the resource classification from the available identity signals.
fn infer_resource_type(
    id: Option<&str>,
    name: Option<&str>,
    policy: &DefaultPolicy,
) -> ResourceType {
    match name {
        Some(n) if n.to_lowercase().contains("subcontract") => ResourceType::Subcontracted,
        _ if id.is_some() => ResourceType::Clt,
        _ => policy.resource_type,
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

fn trimmed_or(value: Option<&str>, fallback: &str) -> String {
    trimmed(value).unwrap_or_else(|| fallback.to_string())
}

/// Attributes for one new dimension row of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionRecord {
    /// A project row.
    Project(NewProject),
    /// A client row.
    Client(NewClient),
    /// An account row.
    Account(NewAccount),
    /// A period row.
    Period(PeriodAttributes),
    /// A resource row.
    Resource(NewResource),
}

impl DimensionRecord {
    /// The dimension this record belongs to.
    #[must_use]
    pub const fn kind(&self) -> DimensionKind {
        match self {
            Self::Project(_) => DimensionKind::Project,
            Self::Client(_) => DimensionKind::Client,
            Self::Account(_) => DimensionKind::Account,
            Self::Period(_) => DimensionKind::Period,
            Self::Resource(_) => DimensionKind::Resource,
        }
    }

    /// The natural key this record would be stored under.
    #[must_use]
    pub fn natural_key(&self) -> NaturalKey {
        match self {
            Self::Project(project) => NaturalKey::Project {
                code: project.code.clone(),
            },
            Self::Client(client) => NaturalKey::Client {
                name: client.name.clone(),
            },
            Self::Account(account) => NaturalKey::Account {
                summary_code: account.summary_code.clone(),
                display_name: account.display_name.clone(),
            },
            Self::Period(period) => NaturalKey::Period {
                original: period.original.clone(),
            },
            Self::Resource(resource) => NaturalKey::Resource {
                name: resource.name.clone(),
            },
        }
    }
}
