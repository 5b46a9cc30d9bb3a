//! CLI command handler for transaction import

use std::path::Path;

use crate::error::SpendResult;
use crate::services::ImportService;
use crate::storage::Storage;

/// Maximum number of rejected records listed after an import
const MAX_ERRORS_SHOWN: usize = 10;

/// Handle the import command
pub fn handle_import_command(storage: &Storage, file: &Path) -> SpendResult<()> {
    let service = ImportService::new(storage);
    let records = service.parse_file(file)?;

    if records.is_empty() {
        println!("No transactions found in {}.", file.display());
        return Ok(());
    }

    let result = service.import_records(&records)?;

    println!("Import from '{}'", file.display());
    println!("{}", "=".repeat(40));
    println!("  Imported:           {}", result.imported);
    println!("  Duplicates (skip):  {}", result.duplicates_skipped);
    println!("  Users created:      {}", result.users_created);
    println!("  Errors:             {}", result.errors);

    if !result.error_messages.is_empty() {
        println!();
        println!("Rejected records:");
        for (index, message) in result.error_messages.iter().take(MAX_ERRORS_SHOWN) {
            println!("  #{}: {}", index + 1, message);
        }
        if result.error_messages.len() > MAX_ERRORS_SHOWN {
            println!("  ... and {} more", result.error_messages.len() - MAX_ERRORS_SHOWN);
        }
    }

    Ok(())
}
