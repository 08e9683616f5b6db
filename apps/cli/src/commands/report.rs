//! # Report Command
//!
//! ## Admin Flow
//! ```text
//! credential ──► verifier.verify() ──✗──► AccessDenied (nothing read)
//!                      │
//!                      ✓
//!                      ▼
//! store.read_all() ──► --all?  ──yes──► aggregate(every record)
//!                      │                  │
//!                      no                 │
//!                      ▼                  │
//!          daily_report(--date or today)  │
//!                      │                  │
//!                      ▼                  ▼
//!               SalesReport + item_quantities() ──► text or --json
//! ```

use std::io::Write;

use chrono::NaiveDate;
use clap::Args;
use tracing::{info, warn};

use smartpos_core::reporting::{aggregate, daily_report, filter_by_date, item_quantities};
use smartpos_core::SalesReport;
use smartpos_store::TransactionStore;

use crate::auth::CredentialVerifier;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::output::{write_report, write_report_json, ReportScope, ReportView};

/// Arguments of `smartpos report`.
#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Day to report on (YYYY-MM-DD); defaults to today
    #[arg(long, value_name = "YYYY-MM-DD", conflicts_with = "all")]
    pub date: Option<NaiveDate>,

    /// Report on every stored transaction
    #[arg(long)]
    pub all: bool,

    /// Print the report as JSON (amounts in minor units)
    #[arg(long)]
    pub json: bool,

    /// Admin password; prompted for on stdin when omitted
    #[arg(long)]
    pub password: Option<String>,
}

impl ReportArgs {
    /// The records this invocation covers, given today's date.
    pub fn scope(&self, today: NaiveDate) -> ReportScope {
        if self.all {
            ReportScope::AllTime
        } else {
            ReportScope::Day(self.date.unwrap_or(today))
        }
    }
}

/// Checks the admin credential, then prints the report.
pub fn run<S: TransactionStore>(
    args: &ReportArgs,
    config: &AppConfig,
    verifier: &dyn CredentialVerifier,
    credential: &str,
    store: &S,
    today: NaiveDate,
    out: &mut dyn Write,
) -> AppResult<SalesReport> {
    if !verifier.verify(credential) {
        warn!("Sales report denied: wrong admin credential");
        return Err(AppError::access_denied());
    }

    let records = store.read_all()?;
    let scope = args.scope(today);

    let (report, items_sold) = match scope {
        ReportScope::Day(date) => (
            daily_report(&records, date, config.empty_history)?,
            item_quantities(filter_by_date(&records, date))?,
        ),
        ReportScope::AllTime => (
            aggregate(&records, config.empty_history)?,
            item_quantities(&records)?,
        ),
    };

    info!(
        scope = %scope,
        transactions = report.transaction_count,
        total = %report.total_sales,
        "Sales report generated"
    );

    if args.json {
        let view = ReportView {
            scope,
            report: &report,
            items_sold: &items_sold,
        };
        write_report_json(out, &view)?;
    } else {
        write_report(out, config, scope, &report, &items_sold)?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PlaintextVerifier;
    use crate::error::ErrorCode;
    use chrono::NaiveDateTime;
    use smartpos_core::{EmptyHistoryPolicy, Money, PaymentMethod, SoldItem, TransactionRecord};
    use smartpos_store::MemoryTransactionStore;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap()
    }

    fn sale(item: &str, quantity: i64, total_cents: i64, when: NaiveDateTime) -> TransactionRecord {
        TransactionRecord {
            customer_name: "Guest".to_string(),
            items: vec![SoldItem {
                name: item.to_string(),
                quantity,
            }],
            subtotal: Money::from_cents(total_cents * 100 / 105),
            tax_amount: Money::from_cents(total_cents - total_cents * 100 / 105),
            total: Money::from_cents(total_cents),
            payment_method: PaymentMethod::Cash,
            timestamp: when,
        }
    }

    fn seeded_store() -> MemoryTransactionStore {
        let mut store = MemoryTransactionStore::new();
        store.append(&sale("Coffee", 3, 15_750, at(8, 9))).unwrap();
        store.append(&sale("Tea", 3, 6_300, at(9, 10))).unwrap();
        store.append(&sale("Coffee", 3, 15_750, at(9, 11))).unwrap();
        store
    }

    fn report_args() -> ReportArgs {
        ReportArgs {
            date: None,
            all: false,
            json: false,
            password: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_wrong_password_is_denied() {
        let verifier = PlaintextVerifier::new("letmein");
        let mut buf = Vec::new();

        let err = run(
            &report_args(),
            &AppConfig::default(),
            &verifier,
            "guess",
            &seeded_store(),
            today(),
            &mut buf,
        )
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::AccessDenied);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_daily_report_defaults_to_today() {
        let verifier = PlaintextVerifier::new("letmein");
        let mut buf = Vec::new();

        let report = run(
            &report_args(),
            &AppConfig::default(),
            &verifier,
            "letmein",
            &seeded_store(),
            today(),
            &mut buf,
        )
        .unwrap();

        assert_eq!(report.transaction_count, 2);
        assert_eq!(report.total_sales, Money::from_cents(22_050));
        // Coffee 3 vs Tea 3
        assert_eq!(report.most_sold_item.as_deref(), Some("Coffee"));

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Date: 2024-03-09"));
        assert!(text.contains("Total sales (₹): 220.50"));
    }

    #[test]
    fn test_day_scope_matches_daily_report() {
        let verifier = PlaintextVerifier::new("letmein");
        let store = seeded_store();
        let day = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();

        let mut args = report_args();
        args.date = Some(day);
        let report = run(
            &args,
            &AppConfig::default(),
            &verifier,
            "letmein",
            &store,
            today(),
            &mut Vec::new(),
        )
        .unwrap();

        let records = store.read_all().unwrap();
        assert_eq!(
            report,
            daily_report(&records, day, EmptyHistoryPolicy::Zeroed).unwrap()
        );
    }

    #[test]
    fn test_all_time_and_explicit_date() {
        let verifier = PlaintextVerifier::new("letmein");
        let store = seeded_store();

        let mut args = report_args();
        args.all = true;
        let report = run(
            &args,
            &AppConfig::default(),
            &verifier,
            "letmein",
            &store,
            today(),
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(report.transaction_count, 3);
        assert_eq!(report.most_sold_item.as_deref(), Some("Coffee"));

        let mut args = report_args();
        args.date = NaiveDate::from_ymd_opt(2024, 3, 8);
        let report = run(
            &args,
            &AppConfig::default(),
            &verifier,
            "letmein",
            &store,
            today(),
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(report.transaction_count, 1);
    }

    #[test]
    fn test_quiet_day_follows_policy() {
        let verifier = PlaintextVerifier::new("letmein");
        let store = seeded_store();
        let quiet_day = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();

        let mut buf = Vec::new();
        let report = run(
            &report_args(),
            &AppConfig::default(),
            &verifier,
            "letmein",
            &store,
            quiet_day,
            &mut buf,
        )
        .unwrap();
        assert_eq!(report, SalesReport::default());
        assert!(String::from_utf8(buf).unwrap().contains("Most sold item: N/A"));

        let mut strict = AppConfig::default();
        strict.empty_history = EmptyHistoryPolicy::Reject;
        let err = run(
            &report_args(),
            &strict,
            &verifier,
            "letmein",
            &store,
            quiet_day,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyHistory);
    }

    #[test]
    fn test_json_output() {
        let verifier = PlaintextVerifier::new("letmein");
        let mut args = report_args();
        args.json = true;

        let mut buf = Vec::new();
        run(
            &args,
            &AppConfig::default(),
            &verifier,
            "letmein",
            &seeded_store(),
            today(),
            &mut buf,
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["scope"]["kind"], "day");
        assert_eq!(json["scope"]["date"], "2024-03-09");
        assert_eq!(json["transaction_count"], 2);
        assert_eq!(json["items_sold"]["Tea"], 3);
    }
}
