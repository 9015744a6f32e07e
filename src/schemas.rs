use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

pub type MemberId = String;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub paid_by_id: MemberId,
    pub split_among_ids: Vec<MemberId>,
    pub date: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
}

impl Group {
    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }
}

/// Payload for creating a group, as sent by the add-group form.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    pub name: String,
    pub member_names: Vec<String>,
}

impl NewGroup {
    pub fn into_group(self) -> Result<Group, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyGroupName);
        }
        let members = self
            .member_names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| Member {
                id: new_id(),
                name: name.to_string(),
            })
            .collect::<Vec<_>>();
        if members.len() < 2 {
            return Err(ValidationError::NotEnoughMembers(members.len()));
        }
        Ok(Group {
            id: new_id(),
            name: name.to_string(),
            members,
            expenses: vec![],
        })
    }
}

/// Payload for adding an expense to an existing group.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub paid_by_id: MemberId,
    pub split_among_ids: Vec<MemberId>,
}

impl NewExpense {
    /// Checks the payload against `group` and stamps it with an id and the
    /// current time.
    pub fn into_expense(self, group: &Group) -> Result<Expense, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        // Written so that NaN fails too
        if !(self.amount.is_finite() && self.amount > 0.0) {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        if group.member(&self.paid_by_id).is_none() {
            return Err(ValidationError::UnknownPayer(self.paid_by_id));
        }

        let mut split_among_ids: Vec<MemberId> = Vec::with_capacity(self.split_among_ids.len());
        for id in self.split_among_ids {
            if group.member(&id).is_none() {
                return Err(ValidationError::UnknownSplitMember(id));
            }
            if !split_among_ids.contains(&id) {
                split_among_ids.push(id);
            }
        }
        if split_among_ids.is_empty() {
            return Err(ValidationError::EmptySplit);
        }

        Ok(Expense {
            id: new_id(),
            description: description.to_string(),
            amount: self.amount,
            paid_by_id: self.paid_by_id,
            split_among_ids,
            date: Utc::now(),
        })
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
