//! Content hashing for fact-level idempotency.

use sha2::{Digest, Sha256};

use super::row::SourceRow;

/// Stored length of a fact content hash, in hex characters.
pub const FACT_HASH_LEN: usize = 32;

/// Computes the content hash over a row's natural-key fields.
///
/// The digest covers, in fixed order: project, client, account summary,
/// account name, period, amount, resource id, resource name. Fields are
/// trimmed and the amount participates in its normalized minimal form, so
/// `1000` and `1000.00` (the same ledger value) hash identically. Absent
/// resource fields hash as empty strings. Non-key fields (nature, business
/// type and line) never affect the digest.
///
/// Deterministic across runs and process restarts: this is the sole
/// idempotency mechanism for facts. A repeated hash means "already
/// loaded", never an error.
#[must_use]
pub fn fact_hash(row: &SourceRow) -> String {
    let amount = row.amount.normalize().to_string();
    let fields: [&str; 8] = [
        row.project.trim(),
        row.client.trim(),
        row.account_summary.trim(),
        row.account_name.trim(),
        row.period.trim(),
        &amount,
        row.resource_id.as_deref().unwrap_or("").trim(),
        row.resource_name.as_deref().unwrap_or("").trim(),
    ];

    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update(field.as_bytes());
        // 0xFF never occurs in UTF-8, so the delimiter cannot collide with
        // field content.
        hasher.update([0xFF]);
    }

    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(FACT_HASH_LEN);
    hex
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn row() -> SourceRow {
        SourceRow {
            project: "P1".to_string(),
            client: "C1".to_string(),
            account_summary: "A1".to_string(),
            account_name: "Acct One".to_string(),
            period: "03/2024".to_string(),
            amount: dec!(1000),
            nature: Some("REVENUE".to_string()),
            ..SourceRow::default()
        }
    }

    #[test]
    fn test_identical_rows_hash_identically() {
        assert_eq!(fact_hash(&row()), fact_hash(&row()));
    }

    #[test]
    fn test_hash_length() {
        assert_eq!(fact_hash(&row()).len(), FACT_HASH_LEN);
        assert!(fact_hash(&row()).chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_non_key_fields_do_not_affect_hash() {
        let baseline = fact_hash(&row());

        let mut changed = row();
        changed.nature = Some("COST".to_string());
        changed.business_type = Some("Internal".to_string());
        changed.business_line = Some("Technology".to_string());

        assert_eq!(fact_hash(&changed), baseline);
    }

    #[test]
    fn test_key_fields_affect_hash() {
        let baseline = fact_hash(&row());

        let mut changed = row();
        changed.amount = dec!(1000.01);
        assert_ne!(fact_hash(&changed), baseline);

        let mut changed = row();
        changed.period = "04/2024".to_string();
        assert_ne!(fact_hash(&changed), baseline);

        let mut changed = row();
        changed.resource_name = Some("J. Silva".to_string());
        assert_ne!(fact_hash(&changed), baseline);
    }

    #[test]
    fn test_amount_trailing_zeros_normalized() {
        let mut scaled = row();
        scaled.amount = dec!(1000.00);
        assert_eq!(fact_hash(&scaled), fact_hash(&row()));
    }

    #[test]
    fn test_absent_and_empty_resource_fields_equivalent() {
        let absent = row();

        let mut empty = row();
        empty.resource_id = Some(String::new());
        empty.resource_name = Some(String::new());

        assert_eq!(fact_hash(&empty), fact_hash(&absent));
    }

    #[test]
    fn test_field_boundaries_do_not_bleed() {
        // "ab" + "c" must not collide with "a" + "bc".
        let mut first = row();
        first.project = "ab".to_string();
        first.client = "c".to_string();

        let mut second = row();
        second.project = "a".to_string();
        second.client = "bc".to_string();

        assert_ne!(fact_hash(&first), fact_hash(&second));
    }
}
