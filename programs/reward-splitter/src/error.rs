use anchor_lang::prelude::*;

#[error_code]
pub enum RewardSplitterError {
    #[msg("Caller is not the splitter authority")]
    Unauthorized,

    #[msg("Split entry outside of its target bounds")]
    InvalidSplitBounds,

    #[msg("Split entries must add up to exactly 100%")]
    InvalidSplitTotal,

    #[msg("Swap path must contain at least two mints")]
    InvalidPath,

    #[msg("Minimum swap output must be greater than zero")]
    InvalidMinAmount,

    #[msg("Swap path must end in the reward mint")]
    PathMustEndInRewardAsset,

    #[msg("New value is identical to the current one")]
    NoOpChange,

    #[msg("Token account does not match the splitter configuration")]
    InvalidTokenAccount,

    #[msg("Router program or authority is not the configured one")]
    UnknownRouter,

    #[msg("Re-entrant call into a guarded instruction")]
    Reentrancy,

    #[msg("No reward balance to distribute")]
    NoBalance,

    #[msg("No balance of the source mint to swap")]
    NoSwappableBalance,

    #[msg("Reward token transfer failed")]
    TransferFailed,

    #[msg("Router swap failed")]
    SwapFailed,

    #[msg("Router returned less than the minimum output")]
    SlippageExceeded,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}

/// Coarse classification of failures, as reported to callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    ValidationError,
    InsufficientBalance,
    CollaboratorFailure,
}

impl RewardSplitterError {
    pub fn kind(&self) -> ErrorKind {
        use RewardSplitterError::*;

        match self {
            Unauthorized => ErrorKind::Unauthorized,
            InvalidSplitBounds
            | InvalidSplitTotal
            | InvalidPath
            | InvalidMinAmount
            | PathMustEndInRewardAsset
            | NoOpChange
            | InvalidTokenAccount
            | UnknownRouter
            | Reentrancy => ErrorKind::ValidationError,
            NoBalance | NoSwappableBalance => ErrorKind::InsufficientBalance,
            TransferFailed | SwapFailed | SlippageExceeded | ArithmeticOverflow => {
                ErrorKind::CollaboratorFailure
            }
        }
    }
}
