//! Headless ordering
//!
//! Runs an order through the same step flow the wizard uses, from a quantity,
//! flavor and pickup index given up front, and returns the summary that would
//! be shared.

use crate::error::{CupcakeError, Result};
use crate::flow_state::StepFlowController;
use crate::share::{Outbox, ShareRequest};
use tracing::info;

/// Choices for a headless order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub quantity: u32,
    pub flavor: String,
    /// Index into the pickup options; 0 is same-day
    pub pickup: usize,
}

/// Walk `flow` from Start to Summary with the given choices and send the order.
///
/// The controller ends back at Start with a fresh order, as after any send.
///
/// # Errors
///
/// - `InvalidQuantity` if the quantity is not offered
/// - `Catalog` if the flavor is not in the catalog
/// - `InvalidPickup` if the pickup index is out of range
pub fn quote(flow: &mut StepFlowController, request: &QuoteRequest) -> Result<ShareRequest> {
    let flavor = flow
        .order()
        .catalog()
        .flavors
        .iter()
        .find(|f| f.eq_ignore_ascii_case(&request.flavor))
        .cloned()
        .ok_or_else(|| CupcakeError::catalog(format!("unknown flavor '{}'", request.flavor)))?;

    flow.cancel();
    let options = flow.order().state().pickup_options().to_vec();
    let date = options
        .get(request.pickup)
        .cloned()
        .ok_or(CupcakeError::InvalidPickup {
            index: request.pickup,
            available: options.len(),
        })?;

    flow.order_mut().set_quantity(request.quantity)?;
    flow.advance()?;
    flow.order_mut().set_flavor(&flavor);
    flow.advance()?;
    flow.order_mut().set_date(&date);
    flow.advance()?;

    let mut outbox = Outbox::default();
    let shared = flow.send(&mut outbox)?;
    info!(quantity = request.quantity, %flavor, %date, "Quote produced");
    Ok(shared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::flow_state::Step;
    use crate::order_state::{ManualClock, OrderStateHolder};
    use chrono::NaiveDate;

    fn flow() -> StepFlowController {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        StepFlowController::with_order(OrderStateHolder::with_clock(
            Catalog::default(),
            Box::new(ManualClock::new(today)),
        ))
    }

    #[test]
    fn test_same_day_quote() {
        let mut flow = flow();
        let request = QuoteRequest {
            quantity: 12,
            flavor: "vanilla".to_string(),
            pickup: 0,
        };

        let shared = quote(&mut flow, &request).unwrap();
        assert_eq!(
            shared.body,
            "Quantity: 12 cupcakes\nFlavor: Vanilla\nPickup date: Fri Oct 16\nTotal: $27.00"
        );
        assert_eq!(flow.current_step(), Step::Start);
    }

    #[test]
    fn test_quote_rejects_bad_input() {
        let mut flow = flow();
        let base = QuoteRequest {
            quantity: 6,
            flavor: "Coffee".to_string(),
            pickup: 2,
        };
        assert!(quote(&mut flow, &base).is_ok());

        let bad_quantity = QuoteRequest { quantity: 5, ..base.clone() };
        assert!(matches!(
            quote(&mut flow, &bad_quantity),
            Err(CupcakeError::InvalidQuantity { .. })
        ));

        let bad_flavor = QuoteRequest { flavor: "Mint".to_string(), ..base.clone() };
        assert!(matches!(quote(&mut flow, &bad_flavor), Err(CupcakeError::Catalog(_))));

        let bad_pickup = QuoteRequest { pickup: 4, ..base };
        assert!(matches!(
            quote(&mut flow, &bad_pickup),
            Err(CupcakeError::InvalidPickup { index: 4, available: 4 })
        ));
    }
}
