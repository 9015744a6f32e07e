//! Shared expense tracking for groups: who paid what, who owes whom, and the
//! fewest payments we can find to square everybody up.

pub mod balance;
pub mod config;
pub mod error;
pub mod repository;
pub mod routes;
pub mod schemas;
pub mod settlement;
pub mod summary;

pub use balance::{compute_balances, compute_running_balances, Balance, TOLERANCE};
pub use error::{ConfigError, RepositoryError, SettlementError, ValidationError};
pub use schemas::{Expense, Group, Member, MemberId, NewExpense, NewGroup};
pub use settlement::{compute_settlements, Settlement};
pub use summary::{compute_summary, Summary};
