//! Property-Based Tests for the order wizard
//!
//! Uses proptest for invariants that must hold for every input:
//! - Price formula for every allowed quantity and every pickup option
//! - Pickup options are chronological, unique and of fixed length
//! - Step machine: cancel lands on Start, go_back never leaves the sequence
//! - Step identifiers round-trip and unknown ones fall back to Start

use chrono::NaiveDate;
use cupcake::order_state::{format_pickup_date, pickup_dates};
use cupcake::{Catalog, ManualClock, OrderStateHolder, Step, StepFlowController};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Any day from 2000 through 2099
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..36_500).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(offset))
            .unwrap()
    })
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Start),
        Just(Step::Flavor),
        Just(Step::Pickup),
        Just(Step::Summary),
    ]
}

/// Operations a user can trigger on the controller
#[derive(Debug, Clone)]
enum Op {
    Advance,
    Back,
    Cancel,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Advance), Just(Op::Back), Just(Op::Cancel)]
}

fn holder_at(today: NaiveDate) -> OrderStateHolder {
    OrderStateHolder::with_clock(Catalog::default(), Box::new(ManualClock::new(today)))
}

proptest! {
    /// price == q * unit + surcharge iff the date is the first option
    #[test]
    fn price_matches_formula(
        today in date_strategy(),
        q_index in 0usize..3,
        d_index in 0usize..4,
    ) {
        let catalog = Catalog::default();
        let mut holder = holder_at(today);
        let quantity = catalog.quantities[q_index];
        let date = holder.state().pickup_options()[d_index].clone();

        holder.set_quantity(quantity).unwrap();
        holder.set_date(&date);

        let mut expected = Decimal::from(quantity) * catalog.price_per_cupcake;
        if d_index == 0 {
            expected += catalog.same_day_surcharge;
        }
        prop_assert_eq!(holder.state().price(), expected);
    }

    /// Quantities outside the catalog never change the order
    #[test]
    fn invalid_quantities_are_rejected(today in date_strategy(), quantity in any::<u32>()) {
        let catalog = Catalog::default();
        prop_assume!(!catalog.allows_quantity(quantity));

        let mut holder = holder_at(today);
        holder.set_quantity(6).unwrap();
        let before = holder.state().clone();

        prop_assert!(holder.set_quantity(quantity).is_err());
        prop_assert_eq!(holder.state(), &before);
    }

    /// Pickup dates are consecutive, ascending and unique
    #[test]
    fn pickup_dates_are_chronological(today in date_strategy(), count in 1usize..15) {
        let dates = pickup_dates(today, count);
        prop_assert_eq!(dates.len(), count);
        prop_assert_eq!(dates[0], today);
        for pair in dates.windows(2) {
            prop_assert_eq!(pair[0].succ_opt(), Some(pair[1]));
        }

        let mut labels: Vec<String> = dates.iter().copied().map(format_pickup_date).collect();
        labels.sort();
        labels.dedup();
        prop_assert_eq!(labels.len(), count);
    }

    /// Reset always yields an empty order with fresh options of fixed length
    #[test]
    fn reset_yields_empty_order(start in date_strategy(), later in 0u64..400) {
        let clock = ManualClock::new(start);
        let mut holder =
            OrderStateHolder::with_clock(Catalog::default(), Box::new(clock.clone()));
        holder.set_quantity(12).unwrap();
        holder.set_flavor("Coffee");
        let first = holder.state().pickup_options()[0].clone();
        holder.set_date(&first);

        clock.advance_days(later);
        holder.reset_order();

        let state = holder.state();
        prop_assert_eq!(state.quantity(), 0);
        prop_assert!(state.flavor().is_empty());
        prop_assert!(state.pickup_date().is_empty());
        prop_assert_eq!(state.price(), Decimal::ZERO);
        prop_assert_eq!(state.pickup_options().len(), 4);
        prop_assert_eq!(&state.pickup_options()[0], &format_pickup_date(clock_today(&clock)));
    }

    /// Any sequence of operations keeps the controller on the linear path
    #[test]
    fn step_machine_invariants(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut flow = StepFlowController::with_order(holder_at(
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        ));

        for op in ops {
            let before = flow.current_step();
            match op {
                Op::Advance => match flow.advance() {
                    Ok(next) => prop_assert_eq!(Some(next), before.next()),
                    Err(_) => {
                        prop_assert_eq!(before, Step::Summary);
                        prop_assert_eq!(flow.current_step(), Step::Summary);
                    }
                },
                Op::Back => {
                    flow.go_back();
                    match before.previous() {
                        Some(prev) => prop_assert_eq!(flow.current_step(), prev),
                        None => prop_assert_eq!(flow.current_step(), Step::Start),
                    }
                }
                Op::Cancel => {
                    flow.cancel();
                    prop_assert_eq!(flow.current_step(), Step::Start);
                }
            }

            let step = flow.current_step();
            prop_assert_eq!(flow.can_go_back(), step != Step::Start);
            prop_assert_eq!(flow.history(), &Step::all_steps()[..=step.order() as usize]);
        }
    }

    /// Step id -> parse round-trip is identity
    #[test]
    fn step_id_roundtrip(step in step_strategy()) {
        let mut flow = StepFlowController::with_order(holder_at(
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        ));
        prop_assert_eq!(flow.restore(step.id()), step);
        prop_assert_eq!(flow.current_step(), step);
    }

    /// Unknown step identifiers fall back to Start
    #[test]
    fn unknown_step_falls_back(id in "[A-Z][a-z]{0,10}|[0-9]{1,3}") {
        let mut flow = StepFlowController::with_order(holder_at(
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        ));
        flow.advance().unwrap();
        prop_assert_eq!(flow.restore(&id), Step::Start);
    }
}

fn clock_today(clock: &ManualClock) -> NaiveDate {
    use cupcake::Clock;
    clock.today()
}
