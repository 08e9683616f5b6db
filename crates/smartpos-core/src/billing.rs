//! # Billing Engine
//!
//! Cart → Bill → TransactionRecord.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Billing Operations                               │
//! │                                                                         │
//! │  Cashier action           Operation               Result                │
//! │  ──────────────           ─────────               ──────                │
//! │                                                                         │
//! │  Pick item + qty ───────► add_item() ───────────► new Cart              │
//! │                                                                         │
//! │  "Generate bill" ───────► compute_bill() ───────► Bill                  │
//! │                           subtotal = Σ price × qty                      │
//! │                           GST      = round(subtotal × rate)             │
//! │                           total    = subtotal + GST                     │
//! │                                                                         │
//! │  Payment confirmed ─────► finalize_bill() ──────► TransactionRecord     │
//! │                                                   (caller persists it)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is a pure function of its arguments. The cart is a
//! plain value: the free functions return a new cart and leave the input
//! untouched, which is what an undo-friendly front end wants.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentMethod, PriceList, SoldItem, TaxRate, TransactionRecord};
use crate::validation::validate_customer_name;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart
// =============================================================================

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub item_name: String,
    pub quantity: i64,
}

/// The in-progress order for one customer.
///
/// ## Invariants
/// - Lines are unique by item name (adding the same item increases quantity)
/// - Lines keep the order in which items were first added
/// - Every quantity is in `1..=MAX_ITEM_QUANTITY`
/// - At most `MAX_CART_ITEMS` lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds an item or increases its quantity if already present.
    ///
    /// On error the cart is left unchanged.
    pub fn add(&mut self, price_list: &PriceList, item_name: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity { quantity });
        }

        if !price_list.contains(item_name) {
            return Err(CoreError::UnknownItem(item_name.to_string()));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_name == item_name) {
            let new_qty = line.quantity.saturating_add(quantity);
            check_quantity_limit(new_qty)?;
            line.quantity = new_qty;
            return Ok(());
        }

        check_quantity_limit(quantity)?;

        if self.lines.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge { max: MAX_CART_ITEMS });
        }

        self.lines.push(CartLine {
            item_name: item_name.to_string(),
            quantity,
        });
        Ok(())
    }

    /// Sets the quantity of an item already in the cart.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the line
    /// - Negative quantity → `InvalidQuantity`
    /// - Item not in cart → `UnknownItem`
    pub fn set_quantity(&mut self, item_name: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove(item_name);
        }
        if quantity < 0 {
            return Err(CoreError::InvalidQuantity { quantity });
        }
        check_quantity_limit(quantity)?;

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.item_name == item_name)
            .ok_or_else(|| CoreError::UnknownItem(item_name.to_string()))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line by item name.
    pub fn remove(&mut self, item_name: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.item_name != item_name);

        if self.lines.len() == initial_len {
            Err(CoreError::UnknownItem(item_name.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all lines (order cancelled).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity of one item, 0 if absent.
    pub fn quantity_of(&self, item_name: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.item_name == item_name)
            .map_or(0, |l| l.quantity)
    }

    /// Returns the number of distinct items in the cart.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn check_quantity_limit(quantity: i64) -> CoreResult<()> {
    if quantity > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: quantity,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Returns a new cart with `quantity` of `item_name` added.
///
/// ## Errors
/// - `InvalidQuantity` when quantity ≤ 0
/// - `UnknownItem` when the item is not on the price list
/// - `QuantityTooLarge` / `CartTooLarge` past the cart limits
///
/// ## Example
/// ```rust
/// use smartpos_core::billing::{add_item, Cart};
/// use smartpos_core::{Money, PriceList};
///
/// let prices = PriceList::new([("Latte", Money::from_cents(12_000))]).unwrap();
/// let cart = add_item(&Cart::new(), &prices, "Latte", 1).unwrap();
/// let cart = add_item(&cart, &prices, "Latte", 2).unwrap();
/// assert_eq!(cart.quantity_of("Latte"), 3);
/// ```
pub fn add_item(
    cart: &Cart,
    price_list: &PriceList,
    item_name: &str,
    quantity: i64,
) -> CoreResult<Cart> {
    let mut next = cart.clone();
    next.add(price_list, item_name, quantity)?;
    Ok(next)
}

// =============================================================================
// Bill
// =============================================================================

/// A priced line on the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct BillLine {
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// `unit_price × quantity`, before tax.
    pub line_total: Money,
}

/// The priced, immutable summary of a cart.
///
/// Only [`compute_bill`] creates one, so `total == subtotal + tax_amount`
/// always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Bill {
    lines: Vec<BillLine>,
    subtotal: Money,
    tax_rate: TaxRate,
    tax_amount: Money,
    total: Money,
}

impl Bill {
    /// Lines in cart insertion order.
    pub fn lines(&self) -> &[BillLine] {
        &self.lines
    }

    /// Sum of line totals, before tax.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Rate the tax was computed at.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// GST on the subtotal, rounded half up to whole minor units.
    pub fn tax_amount(&self) -> Money {
        self.tax_amount
    }

    /// Amount the customer pays.
    pub fn total(&self) -> Money {
        self.total
    }
}

/// Prices a cart.
///
/// ## Calculation
/// ```text
/// subtotal   = Σ unit_price × quantity     (exact, integer paise)
/// tax_amount = subtotal × rate, half up    (Money::calculate_tax)
/// total      = subtotal + tax_amount
/// ```
///
/// Line order follows the cart; the totals do not depend on it.
///
/// ## Errors
/// - `EmptyCart` when the cart has no lines
/// - `UnknownItem` when a cart line is not on `price_list`
/// - `AmountOverflow` when a line total, the subtotal or the total leaves
///   the `i64` range
pub fn compute_bill(cart: &Cart, price_list: &PriceList, tax_rate: TaxRate) -> CoreResult<Bill> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let lines = cart
        .lines()
        .iter()
        .map(|line| {
            let unit_price = price_list
                .price_of(&line.item_name)
                .ok_or_else(|| CoreError::UnknownItem(line.item_name.clone()))?;
            let line_total = unit_price
                .checked_mul_quantity(line.quantity)
                .ok_or(CoreError::AmountOverflow { field: "line total" })?;
            Ok(BillLine {
                item_name: line.item_name.clone(),
                quantity: line.quantity,
                unit_price,
                line_total,
            })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    let subtotal = lines
        .iter()
        .try_fold(Money::zero(), |sum, line| sum.checked_add(line.line_total))
        .ok_or(CoreError::AmountOverflow { field: "subtotal" })?;
    let tax_amount = subtotal.calculate_tax(tax_rate);
    let total = subtotal
        .checked_add(tax_amount)
        .ok_or(CoreError::AmountOverflow { field: "total" })?;

    Ok(Bill {
        lines,
        subtotal,
        tax_rate,
        tax_amount,
        total,
    })
}

/// Turns a paid bill into the record that gets persisted.
///
/// ## Rules
/// - `payment_method` must name Cash, Card or UPI (any letter case)
/// - `customer_name` is trimmed and must not be empty
/// - `timestamp` is truncated to whole seconds, the precision the sales
///   file keeps, so a stored record reads back equal
///
/// No side effects: persisting the record is the caller's job.
///
/// ## Errors
/// - `InvalidPaymentMethod` for anything outside the accepted set
/// - `Validation(Required)` for a blank customer name
pub fn finalize_bill(
    bill: &Bill,
    customer_name: &str,
    payment_method: &str,
    timestamp: NaiveDateTime,
) -> CoreResult<TransactionRecord> {
    let payment_method: PaymentMethod = payment_method.parse()?;
    let customer_name = validate_customer_name(customer_name)?;
    let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);

    Ok(TransactionRecord {
        customer_name,
        items: bill
            .lines()
            .iter()
            .map(|line| SoldItem {
                name: line.item_name.clone(),
                quantity: line.quantity,
            })
            .collect(),
        subtotal: bill.subtotal(),
        tax_amount: bill.tax_amount(),
        total: bill.total(),
        payment_method,
        timestamp,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
