use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SettlementError;
use crate::schemas::{Expense, Member, MemberId};

/// Amounts within this distance of zero count as settled, both when
/// filtering balances and when matching debtors with creditors.
pub const TOLERANCE: f64 = 0.01;

/// Net position of a member: positive is owed money, negative owes money.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub member_id: MemberId,
    pub member_name: String,
    pub amount: f64,
}

impl Balance {
    pub fn is_settled(&self) -> bool {
        self.amount.abs() <= TOLERANCE
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount >= 0.0 {
            write!(f, "{} is owed ${:.2}", self.member_name, self.amount)
        } else {
            write!(f, "{} owes ${:.2}", self.member_name, -self.amount)
        }
    }
}

/// Running totals for every member, in member order, settled ones included.
pub fn compute_running_balances(
    members: &[Member],
    expenses: &[Expense],
) -> Result<Vec<Balance>, SettlementError> {
    let positions: HashMap<&str, usize> = members
        .iter()
        .enumerate()
        .map(|(position, member)| (member.id.as_str(), position))
        .collect();
    let mut balances = members
        .iter()
        .map(|member| Balance {
            member_id: member.id.clone(),
            member_name: member.name.clone(),
            amount: 0.0,
        })
        .collect::<Vec<_>>();

    for expense in expenses {
        if expense.split_among_ids.is_empty() {
            return Err(SettlementError::EmptySplit {
                expense_id: expense.id.clone(),
            });
        }
        let payer = position_of(&positions, expense, &expense.paid_by_id)?;
        balances[payer].amount += expense.amount;

        let amount_per_receiver = expense.amount / expense.split_among_ids.len() as f64;
        for receiver in &expense.split_among_ids {
            let receiver = position_of(&positions, expense, receiver)?;
            balances[receiver].amount -= amount_per_receiver;
        }
    }
    Ok(balances)
}

/// Balances of the members that still owe or are owed something.
pub fn compute_balances(
    members: &[Member],
    expenses: &[Expense],
) -> Result<Vec<Balance>, SettlementError> {
    let mut balances = compute_running_balances(members, expenses)?;
    balances.retain(|balance| !balance.is_settled());
    Ok(balances)
}

fn position_of(
    positions: &HashMap<&str, usize>,
    expense: &Expense,
    member_id: &str,
) -> Result<usize, SettlementError> {
    positions
        .get(member_id)
        .copied()
        .ok_or_else(|| SettlementError::UnknownMember {
            expense_id: expense.id.clone(),
            member_id: member_id.to_string(),
        })
}
