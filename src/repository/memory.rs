use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::GroupRepository;
use crate::error::RepositoryError;
use crate::schemas::{Expense, Group, Member, NewExpense, NewGroup};

#[derive(Debug, Default)]
pub struct InMemoryGroupRepository {
    groups: RwLock<Vec<Group>>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_groups(groups: Vec<Group>) -> Self {
        Self {
            groups: RwLock::new(groups),
        }
    }

    /// A weekend trip with a few expenses and an apartment with none.
    pub fn with_demo_data() -> Self {
        Self::with_groups(demo_groups())
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn list_groups(&self) -> Result<Vec<Group>, RepositoryError> {
        Ok(self.groups.read().await.clone())
    }

    async fn get_group(&self, id: &str) -> Result<Option<Group>, RepositoryError> {
        let groups = self.groups.read().await;
        Ok(groups.iter().find(|group| group.id == id).cloned())
    }

    async fn create_group(&self, new_group: NewGroup) -> Result<Group, RepositoryError> {
        let group = new_group.into_group()?;
        self.groups.write().await.push(group.clone());
        tracing::info!(group = %group.id, members = group.members.len(), "group created");
        Ok(group)
    }

    async fn add_expense(
        &self,
        group_id: &str,
        new_expense: NewExpense,
    ) -> Result<Expense, RepositoryError> {
        let mut groups = self.groups.write().await;
        let group = groups
            .iter_mut()
            .find(|group| group.id == group_id)
            .ok_or_else(|| RepositoryError::GroupNotFound(group_id.to_string()))?;
        let expense = new_expense.into_expense(group)?;
        group.expenses.push(expense.clone());
        tracing::info!(group = %group_id, expense = %expense.id, "expense added");
        Ok(expense)
    }
}

fn demo_member(id: &str, name: &str) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn demo_expense(
    id: &str,
    description: &str,
    amount: f64,
    payer: &str,
    receivers: &[&str],
) -> Expense {
    Expense {
        id: id.to_string(),
        description: description.to_string(),
        amount,
        paid_by_id: payer.to_string(),
        split_among_ids: receivers.iter().map(|r| r.to_string()).collect(),
        date: Utc::now(),
    }
}

fn demo_groups() -> Vec<Group> {
    let everyone = ["member-1", "member-2", "member-3", "member-4"];

    vec![
        Group {
            id: "group-1".to_string(),
            name: "Weekend Trip to Mountains".to_string(),
            members: vec![
                demo_member("member-1", "Alice"),
                demo_member("member-2", "Bob"),
                demo_member("member-3", "Charlie"),
                demo_member("member-4", "Diana"),
            ],
            expenses: vec![
                demo_expense("exp-1", "Cabin Rental", 300.0, "member-1", &everyone),
                demo_expense("exp-2", "Groceries", 80.0, "member-2", &everyone),
                demo_expense(
                    "exp-3",
                    "Gas",
                    40.0,
                    "member-3",
                    &["member-1", "member-2", "member-3"],
                ),
                demo_expense(
                    "exp-4",
                    "Dinner Out",
                    120.0,
                    "member-4",
                    &["member-1", "member-4"],
                ),
            ],
        },
        Group {
            id: "group-2".to_string(),
            name: "Apartment Bills".to_string(),
            members: vec![
                demo_member("member-5", "Eve"),
                demo_member("member-6", "Frank"),
            ],
            expenses: vec![],
        },
    ]
}
