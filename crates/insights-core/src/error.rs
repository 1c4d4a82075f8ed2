use thiserror::Error;

/// All errors produced by the analytics core.
#[derive(Error, Debug)]
pub enum InsightsError {
    /// A required column is absent (or not a string) in a raw input table.
    #[error("Required column \"{column}\" missing from {table} table")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    /// An order's purchase timestamp did not match any recognised format.
    #[error("Order {order_id}: unparseable purchase timestamp \"{value}\"")]
    TimestampParse { order_id: String, value: String },

    /// Catch-all for errors from collaborator layers via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the analytics crates.
pub type Result<T> = std::result::Result<T, InsightsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_column() {
        let err = InsightsError::MissingColumn {
            table: "customers",
            column: "customer_state",
        };
        let msg = err.to_string();
        assert_eq!(
            msg,
            "Required column \"customer_state\" missing from customers table"
        );
    }

    #[test]
    fn test_error_display_timestamp_parse() {
        let err = InsightsError::TimestampParse {
            order_id: "o1".to_string(),
            value: "not-a-date".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("o1"));
        assert!(msg.contains("not-a-date"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: InsightsError = anyhow::anyhow!("loader gave up").into();
        let msg = err.to_string();
        assert_eq!(msg, "loader gave up");
    }
}
