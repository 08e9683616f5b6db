//! # Commands Module
//!
//! One module per `smartpos` subcommand.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── menu.rs      ◄─── Print the price list
//! ├── bill.rs      ◄─── Cart → bill → saved transaction
//! ├── report.rs    ◄─── Admin-gated sales report
//! └── password.rs  ◄─── Argon2 hash for the config file
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lib.rs::execute                                                       │
//! │    • loads AppConfig, opens the CSV store, reads the clock             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::<name>::run(args, config, store, now, out)                  │
//! │    • generic over TransactionStore                                     │
//! │    • writes to `&mut dyn Write`                                        │
//! │    • returns AppResult<T>                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands never read the clock, the environment or stdin themselves, so
//! tests drive them with a memory store, a fixed time and a byte buffer.

pub mod bill;
pub mod menu;
pub mod password;
pub mod report;
