//! Application state definitions
//!
//! `AppState` pairs the step flow controller with what only the terminal
//! screens care about: the highlighted row, the status line and the help
//! overlay. Key actions are applied here so they can be tested without a
//! terminal.

use crate::components::KeyAction;
use crate::flow_state::{Step, StepFlowController};
use crate::share::{ShareTarget, quantity_label};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, error, info};

/// One-line feedback shown under the active screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Info(text) | Self::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// Step flow and the order it edits
    pub flow: StepFlowController,
    /// Highlighted row in the active screen's option list
    pub cursor: usize,
    /// Feedback for the last action
    pub status: Option<StatusMessage>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Set by the order observer and by UI-only changes; cleared on draw
    redraw: Rc<Cell<bool>>,
}

impl AppState {
    /// Wrap a controller and start observing its order
    pub fn new(mut flow: StepFlowController) -> Self {
        let redraw = Rc::new(Cell::new(true));
        let flag = Rc::clone(&redraw);
        flow.order_mut().subscribe(move |_| flag.set(true));

        let mut state = Self {
            flow,
            cursor: 0,
            status: None,
            help_visible: false,
            redraw,
        };
        state.sync_cursor();
        state
    }

    /// Active wizard step
    pub fn step(&self) -> Step {
        self.flow.current_step()
    }

    /// Request a redraw on the next loop iteration
    pub fn mark_dirty(&self) {
        self.redraw.set(true);
    }

    /// Returns true once per pending redraw request
    pub fn take_redraw(&self) -> bool {
        self.redraw.replace(false)
    }

    /// Rows offered by the active step
    pub fn options(&self) -> Vec<String> {
        let order = self.flow.order();
        match self.step() {
            Step::Start => order
                .catalog()
                .quantities
                .iter()
                .map(|q| quantity_label(*q))
                .collect(),
            Step::Flavor => order.catalog().flavors.clone(),
            Step::Pickup => order.state().pickup_options().to_vec(),
            Step::Summary => Vec::new(),
        }
    }

    /// Index of the option already chosen on the active step, if any
    pub fn chosen_index(&self) -> Option<usize> {
        let order = self.flow.order();
        let state = order.state();
        match self.step() {
            Step::Start => order
                .catalog()
                .quantities
                .iter()
                .position(|q| *q == state.quantity()),
            Step::Flavor => order
                .catalog()
                .flavors
                .iter()
                .position(|f| f == state.flavor()),
            Step::Pickup => state
                .pickup_options()
                .iter()
                .position(|d| d == state.pickup_date()),
            Step::Summary => None,
        }
    }

    /// Apply a key action. Returns true when the app should exit.
    pub fn handle_action<T: ShareTarget + ?Sized>(
        &mut self,
        action: KeyAction,
        share_target: &mut T,
    ) -> bool {
        debug!(?action, step = %self.step(), "Handling action");

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.help_visible = !self.help_visible,
            KeyAction::NavigateUp => self.cursor = self.cursor.saturating_sub(1),
            KeyAction::NavigateDown => {
                let len = self.options().len();
                if len > 0 && self.cursor < len - 1 {
                    self.cursor += 1;
                }
            }
            KeyAction::Select => self.choose_highlighted(),
            KeyAction::Next => self.next(),
            KeyAction::Back => {
                if self.flow.go_back().is_some() {
                    self.status = None;
                    self.sync_cursor();
                }
            }
            KeyAction::Cancel => {
                self.flow.cancel();
                self.status = Some(StatusMessage::Info("Order cancelled".to_string()));
                self.sync_cursor();
            }
            KeyAction::Send => self.send(share_target),
        }

        self.mark_dirty();
        false
    }

    /// Record the highlighted row as the step's choice
    fn choose_highlighted(&mut self) {
        let Some(choice) = self.options().get(self.cursor).cloned() else {
            return;
        };

        match self.step() {
            Step::Start => {
                let quantity = self.flow.order().catalog().quantities.get(self.cursor).copied();
                if let Some(quantity) = quantity {
                    if let Err(e) = self.flow.order_mut().set_quantity(quantity) {
                        self.status = Some(StatusMessage::Error(e.to_string()));
                    }
                }
            }
            Step::Flavor => self.flow.order_mut().set_flavor(&choice),
            Step::Pickup => self.flow.order_mut().set_date(&choice),
            Step::Summary => {}
        }
    }

    fn next(&mut self) {
        self.choose_highlighted();
        if !self.flow.can_advance() {
            return;
        }

        match self.flow.advance() {
            Ok(_) => {
                self.status = None;
                self.sync_cursor();
            }
            Err(e) => self.status = Some(StatusMessage::Error(e.to_string())),
        }
    }

    fn send<T: ShareTarget + ?Sized>(&mut self, share_target: &mut T) {
        match self.flow.send(share_target) {
            Ok(request) => {
                info!(subject = %request.subject, "Order handed to share target");
                self.status = Some(StatusMessage::Info(
                    "Order sent! Starting a new order.".to_string(),
                ));
                self.sync_cursor();
            }
            Err(e) => {
                error!("Failed to send order: {}", e);
                self.status = Some(StatusMessage::Error(e.to_string()));
            }
        }
    }

    /// Put the cursor on the step's current choice, or the first row
    fn sync_cursor(&mut self) {
        self.cursor = self.chosen_index().unwrap_or(0);
    }
}
