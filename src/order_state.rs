//! Order State Holder
//!
//! Owns the one in-progress [`OrderState`] and is the only thing allowed to
//! change it. Screens read the state and call the mutation methods here; every
//! successful mutation re-prices the order where needed and emits the new state
//! to every subscribed observer.
//!
//! # Pricing
//!
//! ```text
//! price = quantity * price_per_cupcake
//!       + same_day_surcharge   (only when pickup_date == pickup_options[0])
//! ```
//!
//! # Reset
//!
//! `reset_order()` replaces the whole state value with a fresh one. Pickup
//! options are regenerated from the clock's current date, so an order reset
//! tomorrow offers tomorrow's dates.

use crate::catalog::Catalog;
use crate::error::{CupcakeError, Result};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Display format for pickup dates, e.g. `Fri Oct 16`
pub const PICKUP_DATE_FORMAT: &str = "%a %b %-d";

// ============================================================================
// Clock
// ============================================================================

/// Source of "today" for pickup date generation.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock whose date is set by hand. Clones share the same date.
#[derive(Debug, Clone)]
pub struct ManualClock {
    date: Rc<Cell<NaiveDate>>,
}

impl ManualClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Rc::new(Cell::new(date)),
        }
    }

    /// Move the clock to `date`
    pub fn set(&self, date: NaiveDate) {
        self.date.set(date);
    }

    /// Move the clock forward by whole days
    pub fn advance_days(&self, days: u64) {
        let current = self.date.get();
        if let Some(next) = current.checked_add_days(chrono::Days::new(days)) {
            self.date.set(next);
        }
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}

// ============================================================================
// Pricing and pickup dates
// ============================================================================

/// `count` consecutive calendar days starting at `today`, soonest first.
pub fn pickup_dates(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    today.iter_days().take(count).collect()
}

/// Format a pickup date for display
pub fn format_pickup_date(date: NaiveDate) -> String {
    date.format(PICKUP_DATE_FORMAT).to_string()
}

/// Format a price for display, e.g. `$27.00`
pub fn format_price(price: Decimal) -> String {
    format!("${:.2}", price)
}

/// Price of an order, or None if it overflows.
///
/// The surcharge applies only when a pickup date is chosen and it is the first
/// (soonest) entry of `pickup_options`.
pub fn calculate_price(
    catalog: &Catalog,
    quantity: u32,
    pickup_date: &str,
    pickup_options: &[String],
) -> Option<Decimal> {
    let price = Decimal::from(quantity).checked_mul(catalog.price_per_cupcake)?;
    if !pickup_date.is_empty() && pickup_options.first().map(String::as_str) == Some(pickup_date)
    {
        return price.checked_add(catalog.same_day_surcharge);
    }
    Some(price)
}

// ============================================================================
// OrderState
// ============================================================================

/// The order in progress.
///
/// Fields are read through getters; only [`OrderStateHolder`] can build or
/// change a value of this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderState {
    quantity: u32,
    flavor: String,
    pickup_date: String,
    price: Decimal,
    pickup_options: Vec<String>,
}

impl OrderState {
    fn fresh(catalog: &Catalog, today: NaiveDate) -> Self {
        let pickup_options: Vec<String> = pickup_dates(today, catalog.pickup_option_count)
            .into_iter()
            .map(format_pickup_date)
            .collect();
        let price = Decimal::ZERO;

        Self {
            quantity: 0,
            flavor: String::new(),
            pickup_date: String::new(),
            price,
            pickup_options,
        }
    }

    /// Number of cupcakes; 0 until chosen
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Chosen flavor; empty until chosen
    pub fn flavor(&self) -> &str {
        &self.flavor
    }

    /// Chosen pickup date; empty until chosen
    pub fn pickup_date(&self) -> &str {
        &self.pickup_date
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Candidate pickup dates, soonest first
    pub fn pickup_options(&self) -> &[String] {
        &self.pickup_options
    }

    pub fn has_quantity(&self) -> bool {
        self.quantity > 0
    }

    pub fn has_flavor(&self) -> bool {
        !self.flavor.is_empty()
    }

    pub fn has_pickup_date(&self) -> bool {
        !self.pickup_date.is_empty()
    }

    /// First unset field a complete order needs, if any
    pub fn missing_field(&self) -> Option<&'static str> {
        if !self.has_quantity() {
            Some("quantity")
        } else if !self.has_flavor() {
            Some("flavor")
        } else if !self.has_pickup_date() {
            Some("pickup date")
        } else {
            None
        }
    }

    /// Whether the chosen date is the soonest option (same-day pickup)
    pub fn is_same_day(&self) -> bool {
        self.has_pickup_date() && self.pickup_options.first() == Some(&self.pickup_date)
    }
}

// ============================================================================
// OrderStateHolder
// ============================================================================

/// Handle returned by [`OrderStateHolder::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&OrderState)>;

/// Owner of the live order and its observers.
///
/// # Example
///
/// ```
/// use cupcake::catalog::Catalog;
/// use cupcake::order_state::OrderStateHolder;
///
/// let mut holder = OrderStateHolder::new(Catalog::default());
/// holder.set_quantity(12).unwrap();
/// holder.set_flavor("Vanilla");
/// assert_eq!(holder.state().price().to_string(), "24.00");
///
/// // Box sizes outside the catalog are rejected
/// assert!(holder.set_quantity(7).is_err());
/// assert_eq!(holder.state().quantity(), 12);
/// ```
pub struct OrderStateHolder {
    catalog: Catalog,
    clock: Box<dyn Clock>,
    state: OrderState,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    version: u64,
}

impl fmt::Debug for OrderStateHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderStateHolder")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .field("version", &self.version)
            .finish()
    }
}

impl OrderStateHolder {
    /// Create a holder using the system clock
    pub fn new(catalog: Catalog) -> Self {
        Self::with_clock(catalog, Box::new(SystemClock))
    }

    /// Create a holder with an explicit clock
    pub fn with_clock(catalog: Catalog, clock: Box<dyn Clock>) -> Self {
        let state = OrderState::fresh(&catalog, clock.today());
        Self {
            catalog,
            clock,
            state,
            observers: Vec::new(),
            next_subscription: 0,
            version: 0,
        }
    }

    /// Current order state
    #[inline]
    pub fn state(&self) -> &OrderState {
        &self.state
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Number of emissions since creation
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Register an observer.
    ///
    /// The observer receives the current state immediately and then every
    /// subsequent state.
    pub fn subscribe<F>(&mut self, mut observer: F) -> SubscriptionId
    where
        F: FnMut(&OrderState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;

        observer(&self.state);
        self.observers.push((id, Box::new(observer)));
        debug!(subscription = id.0, "Observer subscribed");
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Set the number of cupcakes.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `quantity` is not in the catalog
    /// - `PriceOverflow` if the same-day total for `quantity` overflows
    ///
    /// On error the order is left untouched and observers are not notified.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<()> {
        if !self.catalog.allows_quantity(quantity) {
            warn!(quantity, "Rejected quantity outside the catalog");
            return Err(CupcakeError::InvalidQuantity {
                requested: quantity,
                allowed: self.catalog.quantities.clone(),
            });
        }

        // Checking the same-day total keeps every later set_date in range
        let same_day = self.state.pickup_options.first().map(String::as_str).unwrap_or("");
        if calculate_price(&self.catalog, quantity, same_day, &self.state.pickup_options).is_none()
        {
            warn!(quantity, "Rejected quantity whose price overflows");
            return Err(CupcakeError::PriceOverflow { quantity });
        }

        self.state.quantity = quantity;
        self.reprice();
        debug!(quantity, price = %self.state.price, "Quantity set");
        self.emit();
        Ok(())
    }

    /// Set the flavor. Does not affect the price.
    pub fn set_flavor(&mut self, flavor: &str) {
        self.state.flavor = flavor.to_string();
        debug!(flavor, "Flavor set");
        self.emit();
    }

    /// Set the pickup date and re-price.
    pub fn set_date(&mut self, date: &str) {
        if !self.state.pickup_options.iter().any(|d| d == date) {
            warn!(date, "Pickup date is not one of the offered options");
        }

        self.state.pickup_date = date.to_string();
        self.reprice();
        debug!(date, price = %self.state.price, "Pickup date set");
        self.emit();
    }

    /// Discard the order and start a fresh one dated from today.
    pub fn reset_order(&mut self) {
        self.state = OrderState::fresh(&self.catalog, self.clock.today());
        info!(
            first_pickup = self.state.pickup_options.first().map(String::as_str).unwrap_or(""),
            "Order reset"
        );
        self.emit();
    }

    fn reprice(&mut self) {
        // set_quantity rejects quantities whose same-day total overflows
        self.state.price = calculate_price(
            &self.catalog,
            self.state.quantity,
            &self.state.pickup_date,
            &self.state.pickup_options,
        )
        .unwrap_or(Decimal::MAX);
    }

    fn emit(&mut self) {
        self.version += 1;
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.state);
        }
    }
}
