//! # Bill Command
//!
//! ## Checkout Flow
//! ```text
//! --item Latte=2 --item "Vada pav=1"
//!      │
//!      ▼
//! add_item() per argument ──► Cart ──► compute_bill() ──► Bill
//!                                                          │
//!                     --customer, --payment, now ──► finalize_bill()
//!                                                          │
//!                                                          ▼
//!                               TransactionStore::append() ──► RecordId
//!                                                          │
//!                                                          ▼
//!                                                   printed bill
//! ```
//!
//! Nothing is printed and nothing is stored unless every step succeeds.

use std::io::Write;
use std::str::FromStr;

use chrono::NaiveDateTime;
use clap::Args;
use tracing::info;

use smartpos_core::billing::{add_item, compute_bill, finalize_bill, Cart};
use smartpos_core::TransactionRecord;
use smartpos_store::{RecordId, TransactionStore};

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::output::write_bill;

/// Arguments of `smartpos bill`.
#[derive(Debug, Clone, Args)]
pub struct BillArgs {
    /// Customer name printed on the bill
    #[arg(short, long)]
    pub customer: String,

    /// Item and quantity, e.g. `--item "Masala Tea=2"` (repeatable)
    #[arg(short, long = "item", value_name = "NAME=QTY", required = true)]
    pub items: Vec<ItemArg>,

    /// Cash, Card or UPI
    #[arg(short, long)]
    pub payment: String,
}

/// One `NAME=QTY` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemArg {
    pub name: String,
    pub quantity: i64,
}

/// Splits at the last `=`; the quantity range is checked by the cart.
impl FromStr for ItemArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, quantity) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected NAME=QTY, got '{}'", s))?;

        let quantity = quantity
            .trim()
            .parse()
            .map_err(|_| format!("quantity in '{}' must be a whole number", s))?;

        Ok(ItemArg {
            name: name.trim().to_string(),
            quantity,
        })
    }
}

/// Rings up one sale, stores it and prints the bill.
pub fn run<S: TransactionStore>(
    args: &BillArgs,
    config: &AppConfig,
    store: &mut S,
    now: NaiveDateTime,
    out: &mut dyn Write,
) -> AppResult<(RecordId, TransactionRecord)> {
    let prices = config.price_list()?;
    let tax_rate = config.tax_rate()?;

    let cart = args.items.iter().try_fold(Cart::new(), |cart, item| {
        add_item(&cart, &prices, &item.name, item.quantity)
    })?;

    let bill = compute_bill(&cart, &prices, tax_rate)?;
    let record = finalize_bill(&bill, &args.customer, &args.payment, now)?;
    let id = store.append(&record)?;

    info!(
        id = %id,
        customer = %record.customer_name,
        total = %record.total,
        payment = %record.payment_method,
        "Sale completed"
    );

    write_bill(out, config, id, &bill, &record, &config.sales_file)?;
    Ok((id, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use smartpos_core::{Money, PaymentMethod};
    use smartpos_store::MemoryTransactionStore;
    use std::collections::BTreeMap;

    fn cafe_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.menu = BTreeMap::from([(
            "cafe".to_string(),
            BTreeMap::from([
                ("Coffee".to_string(), "50".to_string()),
                ("Sandwich".to_string(), "80".to_string()),
            ]),
        )]);
        config
    }

    fn args(items: &[&str], payment: &str) -> BillArgs {
        BillArgs {
            customer: "  Asha ".to_string(),
            items: items.iter().map(|s| s.parse().unwrap()).collect(),
            payment: payment.to_string(),
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_item_arg_parse() {
        assert_eq!(
            "Masala Tea=2".parse::<ItemArg>().unwrap(),
            ItemArg {
                name: "Masala Tea".to_string(),
                quantity: 2
            }
        );
        assert_eq!("Latte = 0".parse::<ItemArg>().unwrap().quantity, 0);
        assert!("Latte".parse::<ItemArg>().is_err());
        assert!("Latte=two".parse::<ItemArg>().is_err());
    }

    #[test]
    fn test_bill_is_stored_and_printed() {
        let config = cafe_config();
        let mut store = MemoryTransactionStore::new();
        let mut buf = Vec::new();

        let (id, record) = run(
            &args(&["Coffee=2", "Sandwich=1"], "upi"),
            &config,
            &mut store,
            noon(),
            &mut buf,
        )
        .unwrap();

        assert_eq!(id, RecordId::new(1));
        assert_eq!(record.customer_name, "Asha");
        assert_eq!(record.subtotal, Money::from_cents(18_000));
        assert_eq!(record.tax_amount, Money::from_cents(900));
        assert_eq!(record.total, Money::from_cents(18_900));
        assert_eq!(record.payment_method, PaymentMethod::Upi);
        assert_eq!(store.read_all().unwrap(), vec![record]);

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Receipt: #1"));
        assert!(text.contains("Subtotal: ₹180.00"));
        assert!(text.contains("GST (5%): ₹9.00"));
        assert!(text.contains("Final Total: ₹189.00"));
        assert!(text.contains("Payment Method: UPI"));
    }

    #[test]
    fn test_repeated_item_merges() {
        let mut store = MemoryTransactionStore::new();
        let (_, record) = run(
            &args(&["Coffee=1", "Coffee=2"], "Cash"),
            &cafe_config(),
            &mut store,
            noon(),
            &mut Vec::new(),
        )
        .unwrap();

        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].quantity, 3);
    }

    #[test]
    fn test_failures_store_nothing() {
        let config = cafe_config();
        let mut store = MemoryTransactionStore::new();

        let cases = [
            (args(&["Coffee=0"], "Cash"), ErrorCode::ValidationError),
            (args(&["Mocha=1"], "Cash"), ErrorCode::ValidationError),
            (args(&["Coffee=1"], "Cheque"), ErrorCode::ValidationError),
        ];

        for (bad, code) in cases {
            let mut buf = Vec::new();
            let err = run(&bad, &config, &mut store, noon(), &mut buf).unwrap_err();
            assert_eq!(err.code, code);
            assert!(buf.is_empty());
        }

        assert!(store.is_empty());
    }
}
