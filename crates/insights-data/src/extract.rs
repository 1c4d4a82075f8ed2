//! Temporal extraction: purchase timestamps to calendar year and month.

use chrono::Datelike;
use insights_core::error::{InsightsError, Result};
use insights_core::models::{DatedOrder, OrderRecord};
use insights_core::time_utils::parse_timestamp;

/// Parse each order's purchase timestamp and extract its calendar fields.
///
/// Returns a new [`DatedOrder`] vector; the input is never modified. The
/// first order whose timestamp does not parse fails the whole call with
/// an error naming that order; malformed rows are never dropped. Time of
/// day is parsed but ignored by the year/month fields.
pub fn extract_time(orders: &[OrderRecord]) -> Result<Vec<DatedOrder>> {
    orders
        .iter()
        .map(|order| {
            let purchased_at = parse_timestamp(&order.purchase_timestamp).ok_or_else(|| {
                InsightsError::TimestampParse {
                    order_id: order.order_id.clone(),
                    value: order.purchase_timestamp.clone(),
                }
            })?;
            Ok(DatedOrder {
                order_id: order.order_id.clone(),
                customer_id: order.customer_id.clone(),
                year: purchased_at.year(),
                month: purchased_at.month(),
                purchased_at,
            })
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
