use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cleaned customer row produced by the schema normalizer.
///
/// Immutable once built; `customer_id` is the unique key the join engine
/// matches orders against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Unique customer identifier.
    pub customer_id: String,
    /// Two-letter state code the customer is registered in.
    pub customer_state: String,
}

/// A cleaned order row produced by the schema normalizer.
///
/// The purchase timestamp is kept as the raw text it arrived with; the
/// temporal extractor owns parsing it (and the failure that can entail).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Unique order identifier.
    pub order_id: String,
    /// Foreign key to [`CustomerRecord::customer_id`]; many orders may
    /// reference one customer.
    pub customer_id: String,
    /// Raw `order_purchase_timestamp` text, not yet parsed.
    pub purchase_timestamp: String,
}

/// An order with its purchase time parsed and calendar fields extracted.
///
/// Produced by the temporal extractor as a new structure rather than by
/// mutating [`OrderRecord`] in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedOrder {
    /// Unique order identifier.
    pub order_id: String,
    /// Foreign key to [`CustomerRecord::customer_id`].
    pub customer_id: String,
    /// Parsed purchase instant (UTC).
    pub purchased_at: DateTime<Utc>,
    /// Calendar year of the purchase date.
    pub year: i32,
    /// Calendar month of the purchase date, 1..=12.
    pub month: u32,
}

/// One row of the inner join between dated orders and customers.
///
/// Exactly one row exists per order whose `customer_id` matched a
/// customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedOrder {
    /// Unique order identifier.
    pub order_id: String,
    /// Customer who placed the order.
    pub customer_id: String,
    /// Calendar year of the purchase date.
    pub year: i32,
    /// Calendar month of the purchase date, 1..=12.
    pub month: u32,
    /// State code carried over from the matching customer record.
    pub customer_state: String,
}

// ── Aggregate tables ──────────────────────────────────────────────────────────
//
// All tables are BTreeMaps so iteration order is sorted and deterministic.

/// Registered customers per state code.
pub type StateCounts = BTreeMap<String, u64>;

/// Orders per calendar year; only years observed in the data appear.
pub type YearlyCounts = BTreeMap<i32, u64>;

/// Orders per calendar month within one year.
///
/// The key domain is always exactly 1..=12: months with no orders are
/// present with a zero count.
pub type MonthlyCounts = BTreeMap<u32, u64>;

/// Distinct ordering customers per (year, state).
///
/// Densely zero-filled over observed years × observed states, so every
/// combination of the two dimensions is present even when its own count
/// is zero.
pub type StateYearCounts = BTreeMap<(i32, String), u64>;

// ── AnalysisOptions ───────────────────────────────────────────────────────────

/// Caller-supplied knobs for the full analysis pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Years to produce monthly breakdowns for.
    ///
    /// `None` means every year observed in the order data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_years: Option<Vec<i32>>,
}
