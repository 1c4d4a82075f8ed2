//! Schema normalization for the raw loader-supplied tables.
//!
//! The loader collaborator materializes each CSV row as a string-valued
//! JSON object. Normalization validates the required columns, trims field
//! text, and drops everything else, returning new owned record vectors.
//! The raw input is borrowed and never mutated.

use insights_core::error::{InsightsError, Result};
use insights_core::models::{CustomerRecord, OrderRecord};
use serde_json::Value;

/// Columns a raw customer row must carry.
pub const CUSTOMER_REQUIRED: &[&str] = &["customer_id", "customer_state"];

/// Columns a raw order row must carry.
pub const ORDER_REQUIRED: &[&str] = &["order_id", "customer_id", "order_purchase_timestamp"];

// ── Public API ────────────────────────────────────────────────────────────────

/// Normalize a raw customer table into [`CustomerRecord`]s.
///
/// Fails with the schema error naming the first required column that is
/// absent (or not a string) in any row. Extraneous columns such as
/// `customer_city` or `customer_zip_code_prefix` are dropped, not
/// validated. An empty table normalizes to an empty vector.
pub fn normalize_customers(raw: &[Value]) -> Result<Vec<CustomerRecord>> {
    raw.iter()
        .map(|row| {
            Ok(CustomerRecord {
                customer_id: required_field(row, "customers", "customer_id")?,
                customer_state: required_field(row, "customers", "customer_state")?,
            })
        })
        .collect()
}

/// Normalize a raw order table into [`OrderRecord`]s.
///
/// The purchase timestamp is kept as raw text; parsing it belongs to the
/// temporal extractor. Extraneous columns such as `order_status` or the
/// delivery-date fields are dropped, not validated.
pub fn normalize_orders(raw: &[Value]) -> Result<Vec<OrderRecord>> {
    raw.iter()
        .map(|row| {
            Ok(OrderRecord {
                order_id: required_field(row, "orders", "order_id")?,
                customer_id: required_field(row, "orders", "customer_id")?,
                purchase_timestamp: required_field(row, "orders", "order_purchase_timestamp")?,
            })
        })
        .collect()
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Fetch a required string column from a raw row, trimmed.
///
/// A missing, null, or non-string value is a schema error: the loader
/// contract is string-valued columns for every row of the table.
fn required_field(row: &Value, table: &'static str, column: &'static str) -> Result<String> {
    row.get(column)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or(InsightsError::MissingColumn { table, column })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_customer_row(id: &str, state: &str) -> Value {
        json!({
            "customer_id": id,
            "customer_state": state,
            "customer_unique_id": "ignored",
            "customer_zip_code_prefix": "01310",
            "customer_city": "sao paulo",
        })
    }

    fn make_order_row(id: &str, customer_id: &str, ts: &str) -> Value {
        json!({
            "order_id": id,
            "customer_id": customer_id,
            "order_purchase_timestamp": ts,
            "order_status": "delivered",
            "order_approved_at": "2017-11-01 11:00:00",
        })
    }

    // ── normalize_customers ───────────────────────────────────────────────────

    #[test]
    fn test_customers_extraneous_columns_dropped() {
        let raw = vec![make_customer_row("c1", "SP")];
        let records = normalize_customers(&raw).unwrap();
        assert_eq!(
            records,
            vec![CustomerRecord {
                customer_id: "c1".to_string(),
                customer_state: "SP".to_string(),
            }]
        );
    }

    #[test]
    fn test_customers_fields_trimmed() {
        let raw = vec![json!({"customer_id": " c1 ", "customer_state": "SP\n"})];
        let records = normalize_customers(&raw).unwrap();
        assert_eq!(records[0].customer_id, "c1");
        assert_eq!(records[0].customer_state, "SP");
    }

    #[test]
    fn test_customers_missing_state_column() {
        let raw = vec![json!({"customer_id": "c1", "customer_city": "sao paulo"})];
        let err = normalize_customers(&raw).unwrap_err();
        match err {
            InsightsError::MissingColumn { table, column } => {
                assert_eq!(table, "customers");
                assert_eq!(column, "customer_state");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_customers_non_string_field_is_schema_error() {
        let raw = vec![json!({"customer_id": "c1", "customer_state": 27})];
        assert!(matches!(
            normalize_customers(&raw),
            Err(InsightsError::MissingColumn {
                column: "customer_state",
                ..
            })
        ));
    }

    #[test]
    fn test_customers_empty_table() {
        let records = normalize_customers(&[]).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_customers_ragged_row_detected() {
        let raw = vec![
            make_customer_row("c1", "SP"),
            json!({"customer_id": "c2"}),
        ];
        assert!(normalize_customers(&raw).is_err());
    }

    // ── normalize_orders ──────────────────────────────────────────────────────

    #[test]
    fn test_orders_keep_raw_timestamp_text() {
        let raw = vec![make_order_row("o1", "c1", "2017-11-01 10:00:00")];
        let records = normalize_orders(&raw).unwrap();
        assert_eq!(records[0].purchase_timestamp, "2017-11-01 10:00:00");
    }

    #[test]
    fn test_orders_missing_timestamp_column() {
        let raw = vec![json!({"order_id": "o1", "customer_id": "c1"})];
        let err = normalize_orders(&raw).unwrap_err();
        match err {
            InsightsError::MissingColumn { table, column } => {
                assert_eq!(table, "orders");
                assert_eq!(column, "order_purchase_timestamp");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_orders_input_not_mutated() {
        let raw = vec![make_order_row("o1", "c1", "2017-11-01 10:00:00")];
        let before = raw.clone();
        let _ = normalize_orders(&raw).unwrap();
        assert_eq!(raw, before);
    }
}
