//! # Terminal Output
//!
//! Plain-text renderings of the menu, a bill and a sales report, plus the
//! JSON report and error bodies. Every function writes to a `dyn Write` so tests can
//! capture the output.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use smartpos_core::{Bill, PriceList, SalesReport, TransactionRecord};
use smartpos_store::RecordId;

use crate::config::AppConfig;
use crate::error::AppError;

/// Width of the item-name column.
const NAME_WIDTH: usize = 18;

/// Which records a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "date")]
pub enum ReportScope {
    Day(NaiveDate),
    AllTime,
}

impl fmt::Display for ReportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportScope::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ReportScope::AllTime => f.write_str("all time"),
        }
    }
}

/// JSON body of `report --json`. Amounts are in minor units.
#[derive(Debug, Serialize)]
pub struct ReportView<'a> {
    pub scope: ReportScope,
    #[serde(flatten)]
    pub report: &'a SalesReport,
    pub items_sold: &'a BTreeMap<String, i64>,
}

// =============================================================================
// Menu
// =============================================================================

/// `--- DRINKS MENU ---` followed by one line per item, per category.
pub fn write_menu(
    out: &mut dyn Write,
    config: &AppConfig,
    prices: &PriceList,
) -> io::Result<()> {
    for (category, items) in &config.menu {
        writeln!(out, "\n--- {} MENU ---", category.to_uppercase())?;
        for name in items.keys() {
            if let Some(price) = prices.price_of(name) {
                writeln!(
                    out,
                    "{:<width$} : {}",
                    name,
                    config.format_currency(price),
                    width = NAME_WIDTH
                )?;
            }
        }
    }
    Ok(())
}

// =============================================================================
// Bill
// =============================================================================

/// The printed bill for a saved sale.
pub fn write_bill(
    out: &mut dyn Write,
    config: &AppConfig,
    id: RecordId,
    bill: &Bill,
    record: &TransactionRecord,
    sales_file: &Path,
) -> io::Result<()> {
    writeln!(out, "\n--- BILL SUMMARY ---")?;
    writeln!(out, "Receipt: {}", id)?;
    writeln!(out, "Customer: {}", record.customer_name)?;
    writeln!(
        out,
        "Date: {}",
        record.timestamp.format(smartpos_store::TIMESTAMP_FORMAT)
    )?;

    for line in bill.lines() {
        writeln!(
            out,
            "  {:<width$} x{:<4} {}",
            line.item_name,
            line.quantity,
            config.format_currency(line.line_total),
            width = NAME_WIDTH
        )?;
    }

    writeln!(out, "Subtotal: {}", config.format_currency(bill.subtotal()))?;
    writeln!(
        out,
        "GST ({}): {}",
        bill.tax_rate(),
        config.format_currency(bill.tax_amount())
    )?;
    writeln!(out, "Final Total: {}", config.format_currency(bill.total()))?;
    writeln!(out, "Payment Method: {}", record.payment_method)?;
    writeln!(out, "Transaction saved to {}", sales_file.display())?;
    Ok(())
}

// =============================================================================
// Report
// =============================================================================

/// Human-readable sales report with a per-item breakdown.
pub fn write_report(
    out: &mut dyn Write,
    config: &AppConfig,
    scope: ReportScope,
    report: &SalesReport,
    items_sold: &BTreeMap<String, i64>,
) -> io::Result<()> {
    let (title, label) = match scope {
        ReportScope::Day(_) => ("==== DAILY SALES REPORT ====", "Date"),
        ReportScope::AllTime => ("==== SALES REPORT ==========", "Period"),
    };
    let symbol = &config.currency_symbol;

    writeln!(out, "\n{}", title)?;
    writeln!(out, "{}: {}", label, scope)?;
    writeln!(out, "Number of transactions: {}", report.transaction_count)?;
    writeln!(out, "Total sales ({}): {}", symbol, report.total_sales)?;
    writeln!(out, "Total GST collected ({}): {}", symbol, report.total_tax)?;
    writeln!(
        out,
        "Most sold item: {}",
        report.most_sold_item.as_deref().unwrap_or("N/A")
    )?;

    if !items_sold.is_empty() {
        writeln!(out, "Items sold:")?;
        for (name, quantity) in items_sold {
            writeln!(out, "  {:<width$} {}", name, quantity, width = NAME_WIDTH)?;
        }
    }

    writeln!(out, "============================")?;
    Ok(())
}

/// Pretty-printed JSON report.
pub fn write_report_json(out: &mut dyn Write, view: &ReportView<'_>) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, view)?;
    writeln!(out)?;
    Ok(())
}

/// Failure body of `report --json`, written where the report would have
/// gone so a script reading stdout always gets JSON.
pub fn write_error_json(out: &mut dyn Write, err: &AppError) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, err)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartpos_core::Money;

    fn render(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_menu_lists_categories_and_prices() {
        let config = AppConfig::default();
        let prices = config.price_list().unwrap();

        let text = render(|out| write_menu(out, &config, &prices));
        assert!(text.contains("--- DRINKS MENU ---"));
        assert!(text.contains("--- SNACKS MENU ---"));
        assert!(text.contains("Latte              : ₹120.00"));
        assert!(text.find("DRINKS").unwrap() < text.find("SNACKS").unwrap());
    }

    #[test]
    fn test_report_text() {
        let config = AppConfig::default();
        let report = SalesReport {
            total_sales: Money::from_cents(18_900),
            total_tax: Money::from_cents(900),
            transaction_count: 1,
            most_sold_item: Some("Coffee".to_string()),
        };
        let items: BTreeMap<String, i64> =
            [("Coffee".to_string(), 2), ("Sandwich".to_string(), 1)].into_iter().collect();
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let text = render(|out| write_report(out, &config, ReportScope::Day(day), &report, &items));
        assert!(text.contains("==== DAILY SALES REPORT ===="));
        assert!(text.contains("Date: 2024-03-09"));
        assert!(text.contains("Number of transactions: 1"));
        assert!(text.contains("Total sales (₹): 189.00"));
        assert!(text.contains("Total GST collected (₹): 9.00"));
        assert!(text.contains("Most sold item: Coffee"));
    }

    #[test]
    fn test_empty_report_shows_na() {
        let config = AppConfig::default();
        let text = render(|out| {
            write_report(
                out,
                &config,
                ReportScope::AllTime,
                &SalesReport::default(),
                &BTreeMap::new(),
            )
        });
        assert!(text.contains("Period: all time"));
        assert!(text.contains("Total sales (₹): 0.00"));
        assert!(text.contains("Most sold item: N/A"));
        assert!(!text.contains("Items sold:"));
    }

    #[test]
    fn test_report_json() {
        let report = SalesReport {
            total_sales: Money::from_cents(18_900),
            total_tax: Money::from_cents(900),
            transaction_count: 1,
            most_sold_item: None,
        };
        let items = BTreeMap::new();
        let view = ReportView {
            scope: ReportScope::AllTime,
            report: &report,
            items_sold: &items,
        };

        let text = render(|out| write_report_json(out, &view));
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["scope"]["kind"], "all_time");
        assert_eq!(json["transaction_count"], 1);
        assert_eq!(json["total_sales"], 18_900);
        assert!(json["most_sold_item"].is_null());
    }

    #[test]
    fn test_error_json() {
        let text = render(|out| write_error_json(out, &AppError::access_denied()));

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["code"], "ACCESS_DENIED");
        assert_eq!(json["message"], "Access denied: wrong admin password");
    }
}
