//! The four aggregate tables computed for the report layer.
//!
//! All functions are pure and total over well-typed input: they group,
//! count (or distinct-count), and zero-fill, but never fail.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use insights_core::models::{
    CustomerRecord, DatedOrder, JoinedOrder, MonthlyCounts, StateCounts, StateYearCounts,
    YearlyCounts,
};

/// Count registered customers per state.
///
/// Keys are the state codes observed in the data, sorted; the count per
/// state is exact while display ordering carries no meaning.
pub fn count_by_state(customers: &[CustomerRecord]) -> StateCounts {
    let mut counts = StateCounts::new();
    for customer in customers {
        *counts.entry(customer.customer_state.clone()).or_insert(0) += 1;
    }
    counts
}

/// Count orders per calendar year.
///
/// Only years observed in the data appear; the year domain is unknown
/// a priori, so there is nothing to zero-fill against.
pub fn count_by_year(orders: &[DatedOrder]) -> YearlyCounts {
    let mut counts = YearlyCounts::new();
    for order in orders {
        *counts.entry(order.year).or_insert(0) += 1;
    }
    counts
}

/// Count orders per month within `year`.
///
/// The result always holds exactly the keys 1..=12, zero-filled for
/// months with no orders, so consumers can iterate a fixed dense grid.
/// Call once per year of interest; no year list is assumed.
pub fn count_by_month(orders: &[DatedOrder], year: i32) -> MonthlyCounts {
    let mut counts: MonthlyCounts = (1..=12).map(|month| (month, 0)).collect();
    for order in orders.iter().filter(|o| o.year == year) {
        // Months outside 1..=12 cannot occur; chrono guarantees the range.
        if let Some(count) = counts.get_mut(&order.month) {
            *count += 1;
        }
    }
    counts
}

/// Count distinct ordering customers per (year, state).
///
/// Counts unique `customer_id` values, not order rows: several orders by
/// one customer within the same (year, state) collapse to one. The result
/// is densely zero-filled over the cross product of observed years and
/// observed states, so every combination present in either dimension
/// appears even when its own count is zero.
pub fn count_unique_customers_by_state_year(joined: &[JoinedOrder]) -> StateYearCounts {
    let mut customers: BTreeMap<(i32, &str), HashSet<&str>> = BTreeMap::new();
    let mut years: BTreeSet<i32> = BTreeSet::new();
    let mut states: BTreeSet<&str> = BTreeSet::new();

    for row in joined {
        years.insert(row.year);
        states.insert(row.customer_state.as_str());
        customers
            .entry((row.year, row.customer_state.as_str()))
            .or_default()
            .insert(row.customer_id.as_str());
    }

    let mut counts = StateYearCounts::new();
    for &year in &years {
        for &state in &states {
            let distinct = customers
                .get(&(year, state))
                .map(|ids| ids.len() as u64)
                .unwrap_or(0);
            counts.insert((year, state.to_string()), distinct);
        }
    }
    counts
}

/// One [`count_by_month`] table per year observed in the data.
///
/// Convenience for rendering multi-year month series side by side.
pub fn monthly_series(orders: &[DatedOrder]) -> BTreeMap<i32, MonthlyCounts> {
    let years: BTreeSet<i32> = orders.iter().map(|o| o.year).collect();
    years
        .into_iter()
        .map(|year| (year, count_by_month(orders, year)))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
