//! Order summary and the share hand-off.
//!
//! Sending an order produces a [`ShareRequest`] (a subject line and a
//! human-readable body) and passes it to a [`ShareTarget`]. What the target
//! does with it is its own business: the terminal app keeps requests in an
//! [`Outbox`] and prints them on exit, while [`FileShare`] appends them to a
//! JSON-lines file.

use crate::error::{CupcakeError, Result};
use crate::order_state::{OrderState, format_price};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Subject line for every shared order
pub const ORDER_SUBJECT: &str = "New Cupcake Order";

/// Text handed to the share target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    pub subject: String,
    pub body: String,
}

impl ShareRequest {
    /// Build the summary for an order
    pub fn for_order(state: &OrderState) -> Self {
        Self {
            subject: ORDER_SUBJECT.to_string(),
            body: summary_lines(state).join("\n"),
        }
    }
}

/// "1 cupcake", "12 cupcakes"
pub fn quantity_label(quantity: u32) -> String {
    if quantity == 1 {
        "1 cupcake".to_string()
    } else {
        format!("{} cupcakes", quantity)
    }
}

/// Summary rows shown on the review screen and used as the share body
pub fn summary_lines(state: &OrderState) -> Vec<String> {
    vec![
        format!("Quantity: {}", quantity_label(state.quantity())),
        format!("Flavor: {}", state.flavor()),
        format!("Pickup date: {}", state.pickup_date()),
        format!("Total: {}", format_price(state.price())),
    ]
}

/// Receiver of shared orders
pub trait ShareTarget {
    fn share(&mut self, request: &ShareRequest) -> Result<()>;
}

/// Keeps shared orders in memory
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    sent: Vec<ShareRequest>,
}

impl Outbox {
    pub fn sent(&self) -> &[ShareRequest] {
        &self.sent
    }

    /// Take every request shared so far
    pub fn drain(&mut self) -> Vec<ShareRequest> {
        std::mem::take(&mut self.sent)
    }
}

impl ShareTarget for Outbox {
    fn share(&mut self, request: &ShareRequest) -> Result<()> {
        self.sent.push(request.clone());
        Ok(())
    }
}

/// Appends each shared order to a file as one JSON object per line
#[derive(Debug, Clone)]
pub struct FileShare {
    path: PathBuf,
}

impl FileShare {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShareTarget for FileShare {
    fn share(&mut self, request: &ShareRequest) -> Result<()> {
        let line = serde_json::to_string(request)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                CupcakeError::share(format!("cannot open {}: {}", self.path.display(), e))
            })?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}
