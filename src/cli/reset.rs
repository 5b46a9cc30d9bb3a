//! Reset CLI command
//!
//! Deletes every stored transaction and user. This is the only way
//! transactions are ever removed.

use std::io::Write;

use crate::error::SpendResult;
use crate::storage::Storage;

/// Handle the reset command
pub fn handle_reset_command(storage: &Storage, yes: bool) -> SpendResult<()> {
    if !yes {
        print!("Delete all transactions and users? (yes/no): ");
        std::io::stdout().flush()?;

        let mut confirm = String::new();
        std::io::stdin().read_line(&mut confirm)?;

        if confirm.trim().to_lowercase() != "yes" {
            println!("Aborted.");
            return Ok(());
        }
    }

    let summary = storage.reset()?;
    println!(
        "Removed {} transactions and {} users.",
        summary.transactions_removed, summary.users_removed
    );

    Ok(())
}
