//! Storage for groups and their expenses.
//!
//! Every read hands out an owned snapshot, so the settlement engine only
//! ever sees plain data that nobody else is mutating.

mod memory;
mod mongo;

pub use memory::InMemoryGroupRepository;
pub use mongo::MongoGroupRepository;

use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::schemas::{Expense, Group, NewExpense, NewGroup};

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn list_groups(&self) -> Result<Vec<Group>, RepositoryError>;

    async fn get_group(&self, id: &str) -> Result<Option<Group>, RepositoryError>;

    /// Validates `new_group` and stores it with freshly generated ids.
    async fn create_group(&self, new_group: NewGroup) -> Result<Group, RepositoryError>;

    /// Validates `new_expense` against the group's members and appends it.
    async fn add_expense(
        &self,
        group_id: &str,
        new_expense: NewExpense,
    ) -> Result<Expense, RepositoryError>;
}
