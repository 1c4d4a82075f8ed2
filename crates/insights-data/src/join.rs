//! Inner join between dated orders and customer records.

use std::collections::HashMap;

use insights_core::models::{CustomerRecord, DatedOrder, JoinedOrder};
use tracing::debug;

/// Inner-join orders to customers on `customer_id`.
///
/// Join policy: inner. An order whose `customer_id` has no matching
/// customer record is silently excluded (a data-quality policy, not an
/// error), and a customer with no orders contributes no row. Totals
/// derived from the result therefore differ from an outer join's.
///
/// Multiplicity is one customer to many orders, so the result has exactly
/// one row per matched order. `customer_id` is a unique key by contract;
/// should raw data violate that, the last customer row wins.
pub fn join_on_customer(orders: &[DatedOrder], customers: &[CustomerRecord]) -> Vec<JoinedOrder> {
    let state_by_customer: HashMap<&str, &str> = customers
        .iter()
        .map(|c| (c.customer_id.as_str(), c.customer_state.as_str()))
        .collect();

    let joined: Vec<JoinedOrder> = orders
        .iter()
        .filter_map(|order| {
            let state = state_by_customer.get(order.customer_id.as_str())?;
            Some(JoinedOrder {
                order_id: order.order_id.clone(),
                customer_id: order.customer_id.clone(),
                year: order.year,
                month: order.month,
                customer_state: (*state).to_string(),
            })
        })
        .collect();

    debug!(
        "Joined {} of {} orders against {} customers",
        joined.len(),
        orders.len(),
        customers.len()
    );

    joined
}

// ── Tests ─────────────────────────────────────────────────────────────────────
