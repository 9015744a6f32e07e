use thiserror::Error;

use crate::schemas::MemberId;

/// Raised by the settlement engine when a group snapshot breaks the
/// invariants the repository is supposed to uphold.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    #[error("expense {expense_id} is split among nobody")]
    EmptySplit { expense_id: String },

    #[error("expense {expense_id} references unknown member {member_id}")]
    UnknownMember {
        expense_id: String,
        member_id: MemberId,
    },

    /// Debts and credits did not cancel out.
    #[error("balances do not sum to zero, {residual:.4} left unsettled")]
    Unbalanced { residual: f64 },
}

/// Rejections of a group or expense at creation time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("group name is required")]
    EmptyGroupName,

    #[error("a group needs at least 2 members, got {0}")]
    NotEnoughMembers(usize),

    #[error("expense description is required")]
    EmptyDescription,

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(f64),

    #[error("payer {0} is not a member of the group")]
    UnknownPayer(MemberId),

    #[error("at least one member must be selected for the split")]
    EmptySplit,

    #[error("split member {0} is not a member of the group")]
    UnknownSplitMember(MemberId),
}

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("couldn't find group {0}")]
    GroupNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },
}
