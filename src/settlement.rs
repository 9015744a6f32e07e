use std::fmt;

use serde::{Deserialize, Serialize};

use crate::balance::{Balance, TOLERANCE};
use crate::error::SettlementError;
use crate::schemas::MemberId;

/// One payment that moves money from a debtor to a creditor.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub from_id: MemberId,
    pub from_name: String,
    pub to_id: MemberId,
    pub to_name: String,
    pub amount: f64,
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} ${:.2}", self.from_name, self.to_name, self.amount)
    }
}

// Working copy of a balance, always stored as a positive amount
#[derive(Clone, Debug)]
struct PersonalBalance<'a> {
    id: &'a str,
    name: &'a str,
    remaining: f64,
}

/// Greedily pairs the largest debtor with the largest creditor until
/// everybody is settled. Produces at most `debtors + creditors - 1`
/// payments, which is not always the true minimum.
pub fn compute_settlements(balances: &[Balance]) -> Result<Vec<Settlement>, SettlementError> {
    settle_within(balances, 0.0)
}

/// Same walk as [`compute_settlements`], for balances that had near-zero
/// entries dropped. `filtered` is the total magnitude of what was dropped;
/// a leftover up to that much is drift, not an imbalance.
pub(crate) fn settle_within(
    balances: &[Balance],
    filtered: f64,
) -> Result<Vec<Settlement>, SettlementError> {
    let mut payers = Vec::new();
    let mut receivers = Vec::new();

    for balance in balances {
        let person = PersonalBalance {
            id: &balance.member_id,
            name: &balance.member_name,
            remaining: balance.amount.abs(),
        };
        if balance.amount < -TOLERANCE {
            payers.push(person);
        } else if balance.amount > TOLERANCE {
            receivers.push(person);
        }
    }

    // Stable sorts, so equal amounts keep member order
    payers.sort_by(|a, b| b.remaining.total_cmp(&a.remaining));
    receivers.sort_by(|a, b| b.remaining.total_cmp(&a.remaining));

    let mut settlements = Vec::new();
    let mut payer_index = 0;
    let mut receiver_index = 0;

    while payer_index < payers.len() && receiver_index < receivers.len() {
        let payer = &mut payers[payer_index];
        let receiver = &mut receivers[receiver_index];
        let amount = payer.remaining.min(receiver.remaining);

        settlements.push(Settlement {
            from_id: payer.id.to_string(),
            from_name: payer.name.to_string(),
            to_id: receiver.id.to_string(),
            to_name: receiver.name.to_string(),
            amount,
        });

        payer.remaining -= amount;
        receiver.remaining -= amount;

        if payer.remaining < TOLERANCE {
            payer_index += 1;
        }
        if receiver.remaining < TOLERANCE {
            receiver_index += 1;
        }
    }

    // Scraps below the tolerance stay behind on both sides; only the net
    // difference says whether debts and credits really cancelled
    let owed: f64 = payers.iter().map(|person| person.remaining).sum();
    let due: f64 = receivers.iter().map(|person| person.remaining).sum();
    let residual = (owed - due).abs();
    if residual >= filtered + TOLERANCE {
        return Err(SettlementError::Unbalanced { residual });
    }

    Ok(settlements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(name: &str, amount: f64) -> Balance {
        Balance {
            member_id: name.to_lowercase(),
            member_name: name.to_string(),
            amount,
        }
    }

    fn plan(settlements: &[Settlement]) -> Vec<(&str, &str, f64)> {
        settlements
            .iter()
            .map(|s| (s.from_id.as_str(), s.to_id.as_str(), s.amount))
            .collect()
    }

    #[test]
    fn single_creditor_collects_from_everyone() {
        let balances = vec![
            balance("Alice", 225.0),
            balance("Bob", -75.0),
            balance("Charlie", -75.0),
            balance("Diana", -75.0),
        ];

        let settlements = compute_settlements(&balances).unwrap();
        assert_eq!(
            plan(&settlements),
            vec![
                ("bob", "alice", 75.0),
                ("charlie", "alice", 75.0),
                ("diana", "alice", 75.0)
            ]
        );
        assert_eq!(settlements[0].from_name, "Bob");
        assert_eq!(settlements[0].to_name, "Alice");
    }

    #[test]
    fn two_people_settle_in_one_payment() {
        let balances = vec![balance("Alice", 30.0), balance("Bob", -30.0)];

        let settlements = compute_settlements(&balances).unwrap();
        assert_eq!(plan(&settlements), vec![("bob", "alice", 30.0)]);
    }

    #[test]
    fn largest_debtor_pays_largest_creditor_first() {
        let balances = vec![
            balance("Alice", 10.0),
            balance("Bob", -50.0),
            balance("Charlie", 60.0),
            balance("Diana", -20.0),
        ];

        let settlements = compute_settlements(&balances).unwrap();
        assert_eq!(
            plan(&settlements),
            vec![
                ("bob", "charlie", 50.0),
                ("diana", "charlie", 10.0),
                ("diana", "alice", 10.0)
            ]
        );
    }

    #[test]
    fn ties_keep_member_order() {
        let balances = vec![
            balance("Diana", -10.0),
            balance("Alice", 10.0),
            balance("Bob", -10.0),
            balance("Charlie", 10.0),
        ];

        let settlements = compute_settlements(&balances).unwrap();
        assert_eq!(
            plan(&settlements),
            vec![("diana", "alice", 10.0), ("bob", "charlie", 10.0)]
        );
    }

    #[test]
    fn no_balances_no_settlements() {
        assert!(compute_settlements(&[]).unwrap().is_empty());
    }

    #[test]
    fn near_zero_balances_are_ignored() {
        let balances = vec![
            balance("Alice", 20.005),
            balance("Bob", -20.0),
            balance("Charlie", -0.005),
        ];

        let settlements = compute_settlements(&balances).unwrap();
        assert_eq!(settlements.len(), 1);
        assert_eq!(settlements[0].from_id, "bob");
        assert_eq!(settlements[0].amount, 20.0);
    }

    #[test]
    fn unbalanced_input_is_an_error() {
        let balances = vec![balance("Alice", 50.0), balance("Bob", -20.0)];

        match compute_settlements(&balances) {
            Err(SettlementError::Unbalanced { residual }) => {
                assert!((residual - 30.0).abs() < 1e-9)
            }
            other => panic!("expected an imbalance, got {:?}", other),
        }
    }

    #[test]
    fn leftover_from_dropped_balances_is_drift() {
        // Five members at -0.0067 each were dropped before matching
        let balances = vec![balance("Alice", 0.0334)];
        assert!(compute_settlements(&balances).is_err());
        assert!(settle_within(&balances, 5.0 * 0.0067).unwrap().is_empty());

        let balances = vec![balance("Alice", 40.0334), balance("Bob", -40.0)];
        let settlements = settle_within(&balances, 0.0335).unwrap();
        assert_eq!(plan(&settlements), vec![("bob", "alice", 40.0)]);
    }

    #[test]
    fn scraps_left_on_creditors_are_not_an_imbalance() {
        let balances = vec![
            balance("Alice", 10.009),
            balance("Bob", 10.009),
            balance("Charlie", -10.0),
            balance("Diana", -10.0),
            balance("Eve", -0.018),
        ];

        let settlements = compute_settlements(&balances).unwrap();
        assert_eq!(
            plan(&settlements),
            vec![("charlie", "alice", 10.0), ("diana", "bob", 10.0)]
        );
    }

    #[test]
    fn leftover_beyond_dropped_balances_is_an_error() {
        let balances = vec![balance("Alice", 50.0), balance("Bob", -20.0)];
        assert!(matches!(
            settle_within(&balances, 0.05),
            Err(SettlementError::Unbalanced { .. })
        ));
    }

    #[test]
    fn settlements_read_like_the_summary_view() {
        let settlement = Settlement {
            from_id: "bob".to_string(),
            from_name: "Bob".to_string(),
            to_id: "alice".to_string(),
            to_name: "Alice".to_string(),
            amount: 33.3333,
        };
        assert_eq!(settlement.to_string(), "Bob pays Alice $33.33");
    }
}
