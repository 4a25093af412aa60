//! Cupcake Order Wizard Library
//!
//! A guided, four-step order flow (quantity, flavor, pickup date, summary)
//! over a single in-memory order, with a terminal front end.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod error;
pub mod flow_state;
pub mod order_state;
pub mod quote;
pub mod share;
pub mod theme;
pub mod ui;

// Re-export main types for convenience
pub use catalog::Catalog;
pub use error::{CupcakeError, Result};
pub use flow_state::{FlowTransitionError, Step, StepFlowController};
pub use order_state::{Clock, ManualClock, OrderState, OrderStateHolder, SystemClock};
pub use quote::{QuoteRequest, quote};
pub use share::{FileShare, Outbox, ShareRequest, ShareTarget};
