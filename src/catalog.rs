//! Catalog of what the bakery sells and what it charges.
//!
//! The catalog is static input to the order flow: the flavor names, the box
//! sizes a customer may pick, the per-cupcake price, the flat same-day pickup
//! surcharge, and how many pickup days are offered. A built-in default is used
//! unless a JSON catalog file is supplied on the command line.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Upper bound on offered pickup days
pub const MAX_PICKUP_OPTIONS: usize = 14;

/// Bakery catalog that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub flavors: Vec<String>,
    pub quantities: Vec<u32>,
    pub price_per_cupcake: Decimal,
    pub same_day_surcharge: Decimal,
    pub pickup_option_count: usize,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            flavors: ["Vanilla", "Chocolate", "Red Velvet", "Salted Caramel", "Coffee"]
                .into_iter()
                .map(String::from)
                .collect(),
            quantities: vec![1, 6, 12],
            price_per_cupcake: Decimal::new(200, 2),
            same_day_surcharge: Decimal::new(300, 2),
            pickup_option_count: 4,
        }
    }
}

impl Catalog {
    /// Whether `quantity` is one of the offered box sizes
    pub fn allows_quantity(&self, quantity: u32) -> bool {
        self.quantities.contains(&quantity)
    }

    /// Save catalog to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize catalog to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write catalog to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load catalog from a JSON file and validate it
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog from {:?}", path.as_ref()))?;

        let catalog: Self =
            serde_json::from_str(&content).context("Failed to parse catalog JSON")?;

        catalog
            .validate()
            .with_context(|| format!("Invalid catalog in {:?}", path.as_ref()))?;

        Ok(catalog)
    }

    /// Validate the catalog
    pub fn validate(&self) -> Result<()> {
        if self.flavors.is_empty() {
            anyhow::bail!("Catalog must list at least one flavor");
        }
        if self.flavors.iter().any(|f| f.trim().is_empty()) {
            anyhow::bail!("Flavor names must not be blank");
        }

        if self.quantities.is_empty() {
            anyhow::bail!("Catalog must list at least one quantity");
        }
        if self.quantities.contains(&0) {
            anyhow::bail!("Quantities must be positive");
        }
        let mut sorted = self.quantities.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != self.quantities.len() {
            anyhow::bail!("Quantities must be unique");
        }

        if self.price_per_cupcake.is_sign_negative() {
            anyhow::bail!("Price per cupcake must not be negative");
        }
        if self.same_day_surcharge.is_sign_negative() {
            anyhow::bail!("Same-day surcharge must not be negative");
        }

        let largest = self.quantities.iter().copied().max().unwrap_or(0);
        let same_day_total = Decimal::from(largest)
            .checked_mul(self.price_per_cupcake)
            .and_then(|total| total.checked_add(self.same_day_surcharge));
        if same_day_total.is_none() {
            anyhow::bail!(
                "Price of {} cupcakes with same-day pickup is too large to represent",
                largest
            );
        }

        if !(1..=MAX_PICKUP_OPTIONS).contains(&self.pickup_option_count) {
            anyhow::bail!(
                "Pickup option count must be between 1 and {}, got {}",
                MAX_PICKUP_OPTIONS,
                self.pickup_option_count
            );
        }

        Ok(())
    }
}
