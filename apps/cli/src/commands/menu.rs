//! # Menu Command

use std::io::Write;

use tracing::debug;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::output::write_menu;

/// Prints every category of the configured menu.
pub fn run(config: &AppConfig, out: &mut dyn Write) -> AppResult<()> {
    let prices = config.price_list()?;
    debug!(items = prices.len(), "Printing menu");
    write_menu(out, config, &prices)?;
    Ok(())
}
