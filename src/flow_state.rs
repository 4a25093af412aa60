//! Step Flow Controller
//!
//! The order wizard is a strictly linear sequence of steps. This module is the
//! single source of truth for which step is active and owns the order state
//! the steps edit.
//!
//! # Step Flow
//!
//! ```text
//! Start -> Flavor -> Pickup -> Summary
//!
//! go_back: one step toward Start (no-op at Start)
//! cancel:  any step -> Start, order reset
//! send:    Summary -> share -> Start, order reset
//! ```
//!
//! Back navigation uses an explicit stack of visited steps kept here, not a
//! host navigation component.

use crate::error::{CupcakeError, Result};
use crate::order_state::OrderStateHolder;
use crate::share::{ShareRequest, ShareTarget};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Wizard steps in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Step {
    /// Choose how many cupcakes
    #[default]
    Start = 0,
    /// Choose a flavor
    Flavor = 1,
    /// Choose a pickup date
    Pickup = 2,
    /// Review and send the order
    Summary = 3,
}

impl Step {
    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 4;

    /// Zero-based position in the sequence
    #[inline]
    pub const fn order(self) -> u8 {
        self as u8
    }

    /// Step number for display (1-indexed)
    pub const fn step_number(self) -> usize {
        self as usize + 1
    }

    /// Next step in the sequence, or None at Summary
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::Flavor),
            Self::Flavor => Some(Self::Pickup),
            Self::Pickup => Some(Self::Summary),
            Self::Summary => None,
        }
    }

    /// Previous step in the sequence, or None at Start
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Start => None,
            Self::Flavor => Some(Self::Start),
            Self::Pickup => Some(Self::Flavor),
            Self::Summary => Some(Self::Pickup),
        }
    }

    /// Screen title for this step
    pub const fn title(self) -> &'static str {
        match self {
            Self::Start => "Order Cupcakes",
            Self::Flavor => "Choose Flavor",
            Self::Pickup => "Choose Pickup Date",
            Self::Summary => "Order Summary",
        }
    }

    /// Stable identifier used when saving a navigation position
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// All steps in order
    pub const fn all_steps() -> &'static [Self] {
        &[Self::Start, Self::Flavor, Self::Pickup, Self::Summary]
    }

    /// The linear path from Start to this step, inclusive
    fn path(self) -> Vec<Self> {
        Self::all_steps()[..=self as usize].to_vec()
    }
}

/// Errors that can occur during step transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowTransitionError {
    /// advance() was called on the last step
    #[error("Cannot advance past {from} (send or cancel the order instead)")]
    NoNextStep { from: Step },

    /// send() was called before reaching the summary
    #[error("Order can only be sent from the summary step (current step: {current})")]
    NotAtSummary { current: Step },

    /// send() was called on an order with a choice still unset
    #[error("Order is incomplete: no {missing} chosen")]
    IncompleteOrder { missing: &'static str },
}

impl From<FlowTransitionError> for CupcakeError {
    fn from(err: FlowTransitionError) -> Self {
        CupcakeError::FlowTransition(err.to_string())
    }
}

/// Controller for the order wizard.
///
/// Owns the [`OrderStateHolder`]; screens get read access through
/// [`order`](Self::order) and call mutations through
/// [`order_mut`](Self::order_mut).
///
/// # Example
///
/// ```
/// use cupcake::catalog::Catalog;
/// use cupcake::flow_state::{Step, StepFlowController};
///
/// let mut flow = StepFlowController::new(Catalog::default());
/// assert_eq!(flow.current_step(), Step::Start);
/// assert!(!flow.can_go_back());
///
/// flow.advance().unwrap();
/// assert_eq!(flow.current_step(), Step::Flavor);
///
/// flow.cancel();
/// assert_eq!(flow.current_step(), Step::Start);
/// ```
#[derive(Debug)]
pub struct StepFlowController {
    order: OrderStateHolder,
    /// Visited steps; the last entry is the active step. Never empty.
    history: Vec<Step>,
}

impl StepFlowController {
    /// Create a controller at Start with a fresh order using the system clock
    pub fn new(catalog: crate::catalog::Catalog) -> Self {
        Self::with_order(OrderStateHolder::new(catalog))
    }

    /// Create a controller at Start around an existing holder
    pub fn with_order(order: OrderStateHolder) -> Self {
        let mut history = Vec::with_capacity(Step::TOTAL_STEPS);
        history.push(Step::Start);
        Self { order, history }
    }

    /// Returns the active step
    #[inline]
    pub fn current_step(&self) -> Step {
        self.history.last().copied().unwrap_or_default()
    }

    /// Returns true if go_back() would move
    #[inline]
    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    /// Visited steps, Start first
    pub fn history(&self) -> &[Step] {
        &self.history
    }

    #[inline]
    pub fn order(&self) -> &OrderStateHolder {
        &self.order
    }

    #[inline]
    pub fn order_mut(&mut self) -> &mut OrderStateHolder {
        &mut self.order
    }

    /// Whether the active step has the input it needs to move on.
    ///
    /// Used to enable the Next action; advance() itself does not check it.
    pub fn can_advance(&self) -> bool {
        let state = self.order.state();
        match self.current_step() {
            Step::Start => true,
            Step::Flavor => state.has_flavor(),
            Step::Pickup => state.has_pickup_date(),
            Step::Summary => false,
        }
    }

    /// Advance to the next step in sequence.
    ///
    /// # Errors
    ///
    /// `NoNextStep` at Summary; the step is unchanged.
    pub fn advance(&mut self) -> std::result::Result<Step, FlowTransitionError> {
        let from = self.current_step();
        let next = from.next().ok_or(FlowTransitionError::NoNextStep { from })?;

        self.history.push(next);
        debug!(%from, to = %next, "Advanced");
        Ok(next)
    }

    /// Return to the previous step. No-op at Start.
    pub fn go_back(&mut self) -> Option<Step> {
        if !self.can_go_back() {
            debug!("Back ignored at first step");
            return None;
        }

        let left = self.history.pop();
        let now = self.current_step();
        debug!(from = ?left, to = %now, "Went back");
        Some(now)
    }

    /// Reset the order and return to Start from any step.
    pub fn cancel(&mut self) {
        info!(from = %self.current_step(), "Order cancelled");
        self.order.reset_order();
        self.history.clear();
        self.history.push(Step::Start);
    }

    /// Share the order summary, then start over as cancel() does.
    ///
    /// # Errors
    ///
    /// - `FlowTransition` if the active step is not Summary, or if quantity,
    ///   flavor or pickup date is still unset (e.g. after restoring Summary)
    /// - any error from the share target; the order is kept in that case
    pub fn send<T: ShareTarget + ?Sized>(&mut self, target: &mut T) -> Result<ShareRequest> {
        let current = self.current_step();
        if current != Step::Summary {
            return Err(FlowTransitionError::NotAtSummary { current }.into());
        }
        if let Some(missing) = self.order.state().missing_field() {
            warn!(missing, "Refusing to send an incomplete order");
            return Err(FlowTransitionError::IncompleteOrder { missing }.into());
        }

        let request = ShareRequest::for_order(self.order.state());
        target.share(&request)?;
        info!(subject = %request.subject, "Order sent");

        self.cancel();
        Ok(request)
    }

    /// Restore the active step from a saved identifier.
    ///
    /// Unknown identifiers fall back to Start. History becomes the linear path
    /// to the restored step so back navigation still works.
    pub fn restore(&mut self, step_id: &str) -> Step {
        let step = Step::from_str(step_id.trim()).unwrap_or_else(|_| {
            warn!(step_id, "Unknown step identifier, falling back to start");
            Step::Start
        });

        self.history = step.path();
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::order_state::ManualClock;
    use crate::share::Outbox;
    use chrono::NaiveDate;

    fn controller() -> StepFlowController {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        StepFlowController::with_order(OrderStateHolder::with_clock(
            Catalog::default(),
            Box::new(ManualClock::new(today)),
        ))
    }

    // =========================================================================
    // Step Tests
    // =========================================================================

    #[test]
    fn test_step_order_is_sequential() {
        for (i, step) in Step::all_steps().iter().enumerate() {
            assert_eq!(step.order() as usize, i);
            assert_eq!(step.step_number(), i + 1);
        }
        assert_eq!(Step::all_steps().len(), Step::TOTAL_STEPS);
    }

    #[test]
    fn test_step_next_and_previous_are_inverse() {
        for step in Step::all_steps() {
            if let Some(next) = step.next() {
                assert_eq!(next.previous(), Some(*step));
            }
        }
        assert_eq!(Step::Start.previous(), None);
        assert_eq!(Step::Summary.next(), None);
    }

    #[test]
    fn test_step_ids_roundtrip() {
        for step in Step::all_steps() {
            assert_eq!(Step::from_str(step.id()), Ok(*step));
        }
        assert_eq!(Step::Pickup.id(), "pickup");
        assert_eq!(Step::Summary.to_string(), "summary");
    }

    // =========================================================================
    // Controller Tests
    // =========================================================================

    #[test]
    fn test_new_controller_at_start() {
        let flow = controller();
        assert_eq!(flow.current_step(), Step::Start);
        assert!(!flow.can_go_back());
        assert_eq!(flow.history(), [Step::Start]);
    }

    #[test]
    fn test_advance_follows_sequence() {
        let mut flow = controller();
        assert_eq!(flow.advance(), Ok(Step::Flavor));
        assert_eq!(flow.advance(), Ok(Step::Pickup));
        assert_eq!(flow.advance(), Ok(Step::Summary));
        assert_eq!(
            flow.advance(),
            Err(FlowTransitionError::NoNextStep { from: Step::Summary })
        );
        assert_eq!(flow.current_step(), Step::Summary);
    }

    #[test]
    fn test_go_back_at_start_is_noop() {
        let mut flow = controller();
        assert_eq!(flow.go_back(), None);
        assert_eq!(flow.current_step(), Step::Start);
    }

    #[test]
    fn test_go_back_from_flavor() {
        let mut flow = controller();
        flow.advance().unwrap();
        assert!(flow.can_go_back());
        assert_eq!(flow.go_back(), Some(Step::Start));
        assert!(!flow.can_go_back());
    }

    #[test]
    fn test_can_advance_tracks_required_input() {
        let mut flow = controller();
        assert!(flow.can_advance());

        flow.advance().unwrap();
        assert!(!flow.can_advance());
        flow.order_mut().set_flavor("Vanilla");
        assert!(flow.can_advance());

        flow.advance().unwrap();
        assert!(!flow.can_advance());
        let first = flow.order().state().pickup_options()[0].clone();
        flow.order_mut().set_date(&first);
        assert!(flow.can_advance());

        flow.advance().unwrap();
        assert!(!flow.can_advance());
    }

    #[test]
    fn test_cancel_resets_order() {
        let mut flow = controller();
        flow.order_mut().set_quantity(6).unwrap();
        flow.advance().unwrap();
        flow.order_mut().set_flavor("Coffee");
        flow.advance().unwrap();

        flow.cancel();
        assert_eq!(flow.current_step(), Step::Start);
        assert_eq!(flow.order().state().quantity(), 0);
        assert!(flow.order().state().flavor().is_empty());
    }

    #[test]
    fn test_send_outside_summary_fails() {
        let mut flow = controller();
        let mut outbox = Outbox::default();
        let err = flow.send(&mut outbox).unwrap_err();
        assert!(matches!(err, CupcakeError::FlowTransition(_)));
        assert!(outbox.sent().is_empty());
    }

    #[test]
    fn test_send_incomplete_order_fails() {
        let mut flow = controller();
        let mut outbox = Outbox::default();
        assert_eq!(flow.restore("summary"), Step::Summary);

        let err = flow.send(&mut outbox).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Flow transition error: Order is incomplete: no quantity chosen"
        );

        flow.order_mut().set_quantity(6).unwrap();
        flow.order_mut().set_flavor("Coffee");
        assert!(flow.send(&mut outbox).is_err());
        assert!(outbox.sent().is_empty());
        assert_eq!(flow.current_step(), Step::Summary);
        assert_eq!(flow.order().state().quantity(), 6);
    }

    #[test]
    fn test_send_shares_and_resets() {
        let mut flow = controller();
        flow.order_mut().set_quantity(12).unwrap();
        flow.advance().unwrap();
        flow.order_mut().set_flavor("Vanilla");
        flow.advance().unwrap();
        let first = flow.order().state().pickup_options()[0].clone();
        flow.order_mut().set_date(&first);
        flow.advance().unwrap();

        let mut outbox = Outbox::default();
        let request = flow.send(&mut outbox).unwrap();

        assert_eq!(outbox.sent(), [request.clone()]);
        assert!(request.body.contains("12 cupcakes"));
        assert!(request.body.contains("$27.00"));
        assert_eq!(flow.current_step(), Step::Start);
        assert_eq!(flow.order().state().quantity(), 0);
    }

    #[test]
    fn test_restore_known_and_unknown_steps() {
        let mut flow = controller();
        assert_eq!(flow.restore("pickup"), Step::Pickup);
        assert_eq!(flow.history(), [Step::Start, Step::Flavor, Step::Pickup]);
        assert_eq!(flow.go_back(), Some(Step::Flavor));

        assert_eq!(flow.restore("checkout"), Step::Start);
        assert_eq!(flow.current_step(), Step::Start);
        assert!(!flow.can_go_back());
    }
}
