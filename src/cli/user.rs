//! User CLI command

use crate::error::SpendResult;
use crate::models::UserId;
use crate::services::UserService;
use crate::storage::Storage;

/// Handle the user command: show one user
pub fn handle_user_command(storage: &Storage, id: i64) -> SpendResult<()> {
    let service = UserService::new(storage);
    let user = service.get(UserId::new(id))?;
    let count = service.transaction_count(user.id)?;

    println!("User: {}", user.name);
    println!("  ID:           {}", user.id);
    println!("  Created:      {}", user.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Transactions: {}", count);

    Ok(())
}
