use serde::{Deserialize, Serialize};

use crate::balance::{compute_running_balances, Balance, TOLERANCE};
use crate::error::SettlementError;
use crate::schemas::Group;
use crate::settlement::{settle_within, Settlement};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Summary {
    pub balances: Vec<Balance>,
    pub settlements: Vec<Settlement>,
}

impl Summary {
    pub fn is_settled(&self) -> bool {
        self.balances.is_empty()
    }
}

/// Balances and the payment plan for one snapshot of a group.
pub fn compute_summary(group: &Group) -> Result<Summary, SettlementError> {
    let running = compute_running_balances(&group.members, &group.expenses)?;
    let total: f64 = running.iter().map(|balance| balance.amount).sum();
    if total.abs() >= TOLERANCE {
        return Err(SettlementError::Unbalanced {
            residual: total.abs(),
        });
    }

    // Settled members are left out, but what they still hold may show up
    // as a leftover on somebody else
    let (settled, balances): (Vec<_>, Vec<_>) =
        running.into_iter().partition(|balance| balance.is_settled());
    let filtered: f64 = settled.iter().map(|balance| balance.amount.abs()).sum();
    let settlements = settle_within(&balances, filtered)?;

    tracing::debug!(
        group = %group.id,
        expenses = group.expenses.len(),
        balances = balances.len(),
        settlements = settlements.len(),
        "computed summary"
    );
    for settlement in &settlements {
        tracing::debug!(group = %group.id, "{}", settlement);
    }

    Ok(Summary {
        balances,
        settlements,
    })
}
