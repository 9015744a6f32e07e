use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use super::GroupRepository;
use crate::error::RepositoryError;
use crate::schemas::{Expense, Group, NewExpense, NewGroup};

/// Keeps each group, expenses included, as one document of the `Groups`
/// collection.
#[derive(Clone)]
pub struct MongoGroupRepository {
    groups: Collection<Group>,
}

impl MongoGroupRepository {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, RepositoryError> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self::new(&client, database))
    }

    pub fn new(client: &Client, database: &str) -> Self {
        Self {
            groups: client.database(database).collection("Groups"),
        }
    }
}

#[async_trait]
impl GroupRepository for MongoGroupRepository {
    async fn list_groups(&self) -> Result<Vec<Group>, RepositoryError> {
        let cursor = self.groups.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn get_group(&self, id: &str) -> Result<Option<Group>, RepositoryError> {
        Ok(self.groups.find_one(doc! { "id": id }, None).await?)
    }

    async fn create_group(&self, new_group: NewGroup) -> Result<Group, RepositoryError> {
        let group = new_group.into_group()?;
        self.groups.insert_one(&group, None).await?;
        tracing::info!(group = %group.id, members = group.members.len(), "group created");
        Ok(group)
    }

    async fn add_expense(
        &self,
        group_id: &str,
        new_expense: NewExpense,
    ) -> Result<Expense, RepositoryError> {
        let group = self
            .get_group(group_id)
            .await?
            .ok_or_else(|| RepositoryError::GroupNotFound(group_id.to_string()))?;
        let expense = new_expense.into_expense(&group)?;
        let document = bson::to_bson(&expense)?;

        // Members never change, so validating against the snapshot is enough
        let result = self
            .groups
            .update_one(
                doc! { "id": group_id },
                doc! { "$push": { "expenses": document } },
                None,
            )
            .await?;
        if result.matched_count == 0 {
            return Err(RepositoryError::GroupNotFound(group_id.to_string()));
        }
        tracing::info!(group = %group_id, expense = %expense.id, "expense added");
        Ok(expense)
    }
}
