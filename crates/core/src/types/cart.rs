//! The shopping cart state machine.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s. Lines are identified by
//! their [`LineKey`] (product ID plus optional variation name); adding a line
//! whose key is already present bumps its quantity instead of appending.
//!
//! # Invariants
//!
//! - Every quantity is at least 1. Decrementing a line at quantity 1 removes it.
//! - No two lines share a key. Deserializing a persisted cart merges duplicates.
//! - Line order is insertion order and survives a persistence round-trip.
//!
//! Mutations are addressed by index, matching how the rendered views refer to
//! lines. An index that no longer exists (the page was rendered before another
//! tab changed the cart) is reported as [`CartError::LineOutOfRange`] and
//! leaves the cart untouched.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::product::{Product, Selection};

/// Errors from index-addressed cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("no cart line at index {index} (cart has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },
}

/// One entry in the cart.
///
/// Serialized with the short field names of the persisted format
/// (`img`, `qty`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    /// Product display name at the time it was added.
    pub name: String,
    /// Unit price captured at the time it was added.
    pub price: Decimal,
    #[serde(rename = "img")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<String>,
    #[serde(rename = "qty")]
    pub quantity: NonZeroU32,
}

/// Identity of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
    pub product_id: &'a str,
    pub variation: Option<&'a str>,
}

impl CartLine {
    #[must_use]
    pub fn key(&self) -> LineKey<'_> {
        LineKey {
            product_id: self.id.as_str(),
            variation: self.variation.as_deref(),
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity.get())
    }
}

/// Data captured when adding a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub variation: Option<String>,
}

impl NewLine {
    /// Capture a catalog product with the given selection.
    ///
    /// The selected variation's price and name are recorded, not the base
    /// product's.
    #[must_use]
    pub fn from_selection(id: &ProductId, product: &Product, selection: &Selection<'_>) -> Self {
        Self {
            product_id: id.clone(),
            name: product.name.clone(),
            price: selection.price,
            image: product.image.clone(),
            variation: selection.variation_name().map(str::to_string),
        }
    }

    fn key(&self) -> LineKey<'_> {
        LineKey {
            product_id: self.product_id.as_str(),
            variation: self.variation.as_deref(),
        }
    }
}

/// Outcome of a quantity change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineChange {
    /// The line is still present with this quantity.
    Quantity(NonZeroU32),
    /// The line was taken out of the cart.
    Removed(CartLine),
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted cart.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the text is not a list of cart lines. Callers
    /// treat that as an empty cart.
    pub fn from_persisted(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize for storage.
    ///
    /// # Errors
    ///
    /// Only fails if a line cannot be represented as JSON, which the line types
    /// never produce.
    pub fn to_persisted(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.lines)
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Position of the line with the given key.
    #[must_use]
    pub fn position(&self, key: LineKey<'_>) -> Option<usize> {
        self.lines.iter().position(|line| line.key() == key)
    }

    /// Sum of quantities across all lines (the badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity.get()))
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Add one unit of a product.
    ///
    /// Merges into the existing line with the same key, otherwise appends a
    /// line with quantity 1. Returns the index of the affected line.
    pub fn add_line(&mut self, new: NewLine) -> usize {
        if let Some(index) = self.position(new.key()) {
            if let Some(line) = self.lines.get_mut(index) {
                line.quantity = line.quantity.saturating_add(1);
            }
            return index;
        }

        self.lines.push(CartLine {
            id: new.product_id,
            name: new.name,
            price: new.price,
            image: new.image,
            variation: new.variation,
            quantity: NonZeroU32::MIN,
        });
        self.lines.len() - 1
    }

    /// Add one unit to the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns `LineOutOfRange` if there is no line at `index`.
    pub fn increment_line(&mut self, index: usize) -> Result<NonZeroU32, CartError> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::LineOutOfRange { index, len })?;
        line.quantity = line.quantity.saturating_add(1);
        Ok(line.quantity)
    }

    /// Take one unit off the line at `index`, removing it at quantity 1.
    ///
    /// # Errors
    ///
    /// Returns `LineOutOfRange` if there is no line at `index`.
    pub fn decrement_line(&mut self, index: usize) -> Result<LineChange, CartError> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::LineOutOfRange { index, len })?;

        match NonZeroU32::new(line.quantity.get() - 1) {
            Some(quantity) => {
                line.quantity = quantity;
                Ok(LineChange::Quantity(quantity))
            }
            None => Ok(LineChange::Removed(self.lines.remove(index))),
        }
    }

    /// Remove the line at `index`, keeping the others in order.
    ///
    /// # Errors
    ///
    /// Returns `LineOutOfRange` if there is no line at `index`.
    pub fn remove_line(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }
}

impl From<Vec<CartLine>> for Cart {
    /// Build a cart from stored lines, merging lines that share a key into the
    /// first occurrence.
    fn from(stored: Vec<CartLine>) -> Self {
        let mut cart = Self {
            lines: Vec::with_capacity(stored.len()),
        };
        for line in stored {
            match cart.position(line.key()) {
                Some(index) => {
                    if let Some(existing) = cart.lines.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity.get());
                    }
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
