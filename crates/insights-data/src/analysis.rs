//! Top-level analysis pipeline.
//!
//! Orchestrates normalization, temporal extraction, the customer join and
//! all four aggregations, returning an [`Analysis`] ready for the report
//! layer.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::Utc;
use insights_core::error::Result;
use insights_core::models::{
    AnalysisOptions, DatedOrder, MonthlyCounts, StateCounts, StateYearCounts, YearlyCounts,
};
use serde_json::Value;
use tracing::debug;

use crate::aggregate::{
    count_by_month, count_by_state, count_by_year, count_unique_customers_by_state_year,
    monthly_series,
};
use crate::extract::extract_time;
use crate::join::join_on_customer;
use crate::normalize::{normalize_customers, normalize_orders};

// ── Public types ──────────────────────────────────────────────────────────────

/// The state holding the most registered customers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StateHighlight {
    /// Two-letter state code.
    pub state: String,
    /// Registered customers in that state.
    pub customers: u64,
}

/// The calendar month with the most orders across all observed years.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MonthHighlight {
    /// Calendar year of the month.
    pub year: i32,
    /// Calendar month, 1..=12.
    pub month: u32,
    /// Orders placed in that month.
    pub orders: u64,
}

/// Headline figures distilled from the aggregate tables.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Highlights {
    /// State with the most registered customers, `None` on empty input.
    pub top_state: Option<StateHighlight>,
    /// Busiest (year, month) by order count, `None` on empty input.
    ///
    /// Ties resolve to the earliest month.
    pub busiest_month: Option<MonthHighlight>,
}

/// Metadata produced alongside the aggregate tables.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Customer rows that survived normalization.
    pub customers_processed: usize,
    /// Order rows that survived normalization and extraction.
    pub orders_processed: usize,
    /// Order rows with a matching customer (inner-join survivors).
    pub orders_joined: usize,
    /// Wall-clock seconds spent normalizing and extracting.
    pub transform_time_seconds: f64,
    /// Wall-clock seconds spent joining and aggregating.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze`].
///
/// The four tables carry the documented zero-fill and inner-join
/// guarantees, so the report layer can render them without re-deriving
/// any semantics.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Registered customers per state.
    pub customers_by_state: StateCounts,
    /// Orders per observed year.
    pub orders_by_year: YearlyCounts,
    /// Dense 1..=12 month table per requested year.
    pub monthly_orders: BTreeMap<i32, MonthlyCounts>,
    /// Distinct ordering customers per (year, state), dense grid.
    pub unique_customers_by_state_year: StateYearCounts,
    /// Headline figures.
    pub highlights: Highlights,
    /// Row counts and timings for this run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline over two loader-supplied raw tables.
///
/// 1. Normalize the customer and order tables.
/// 2. Extract calendar year/month from each order's purchase timestamp.
/// 3. Inner-join orders to customers on `customer_id`.
/// 4. Compute the four aggregate tables and the highlights.
///
/// Schema and timestamp errors from steps 1 and 2 propagate unchanged and
/// leave no partial result; steps 3 and 4 are total. Monthly tables cover
/// `options.monthly_years` when given, otherwise every observed year.
pub fn analyze(
    raw_customers: &[Value],
    raw_orders: &[Value],
    options: &AnalysisOptions,
) -> Result<Analysis> {
    // ── Step 1 + 2: Normalize and extract ─────────────────────────────────────
    let transform_start = Instant::now();
    let customers = normalize_customers(raw_customers)?;
    let orders = normalize_orders(raw_orders)?;
    let dated = extract_time(&orders)?;
    let transform_time = transform_start.elapsed().as_secs_f64();

    debug!(
        "Normalized {} customers and {} orders",
        customers.len(),
        dated.len()
    );

    // ── Step 3: Join ──────────────────────────────────────────────────────────
    let aggregate_start = Instant::now();
    let joined = join_on_customer(&dated, &customers);

    // ── Step 4: Aggregate ─────────────────────────────────────────────────────
    let customers_by_state = count_by_state(&customers);
    let orders_by_year = count_by_year(&dated);
    let monthly_orders = match &options.monthly_years {
        Some(years) => years
            .iter()
            .map(|&year| (year, count_by_month(&dated, year)))
            .collect(),
        None => monthly_series(&dated),
    };
    let unique_customers_by_state_year = count_unique_customers_by_state_year(&joined);
    let highlights = compute_highlights(&customers_by_state, &dated);
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        customers_processed: customers.len(),
        orders_processed: dated.len(),
        orders_joined: joined.len(),
        transform_time_seconds: transform_time,
        aggregate_time_seconds: aggregate_time,
    };

    Ok(Analysis {
        customers_by_state,
        orders_by_year,
        monthly_orders,
        unique_customers_by_state_year,
        highlights,
        metadata,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Pick the headline figures: biggest customer state and busiest month.
///
/// Ties resolve to the first key in sorted order, keeping repeated runs
/// deterministic.
fn compute_highlights(customers_by_state: &StateCounts, orders: &[DatedOrder]) -> Highlights {
    let mut top_state: Option<StateHighlight> = None;
    for (state, &customers) in customers_by_state {
        if top_state.as_ref().map_or(true, |t| customers > t.customers) {
            top_state = Some(StateHighlight {
                state: state.clone(),
                customers,
            });
        }
    }

    let mut per_month: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for order in orders {
        *per_month.entry((order.year, order.month)).or_insert(0) += 1;
    }
    let mut busiest_month: Option<MonthHighlight> = None;
    for (&(year, month), &order_count) in &per_month {
        if busiest_month
            .as_ref()
            .map_or(true, |b| order_count > b.orders)
        {
            busiest_month = Some(MonthHighlight {
                year,
                month,
                orders: order_count,
            });
        }
    }

    Highlights {
        top_state,
        busiest_month,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
