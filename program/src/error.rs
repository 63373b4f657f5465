use solana_program::{
    decode_error::DecodeError, msg, program_error::PrintProgramError, program_error::ProgramError,
};
use thiserror::Error;

/// Errors that may be returned by the raffle program
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RaffleError {
    /// Invalid instruction data passed
    #[error("Invalid instruction data")]
    InvalidInstruction,

    /// Raffle account has not been initialized
    #[error("Raffle not initialized")]
    NotInitialized,

    /// Raffle account is already initialized
    #[error("Raffle already initialized")]
    AlreadyInitialized,

    /// Configuration passed to Initialize is unusable
    #[error("Invalid raffle configuration")]
    InvalidConfig,

    /// Operation is not allowed in the current round state
    #[error("Operation not allowed in the current round state")]
    WrongRoundState,

    /// Payment does not match the entrance fee exactly
    #[error("Payment does not match the entrance fee")]
    IncorrectPayment,

    /// Participant ledger is at capacity
    #[error("Raffle is full")]
    RaffleFull,

    /// Upkeep conditions do not hold
    #[error("Upkeep not needed")]
    UpkeepNotNeeded,

    /// Fulfillment does not match the outstanding randomness request
    #[error("Unknown randomness request")]
    UnknownRequest,

    /// Fulfillment carried no random words
    #[error("No random words delivered")]
    MissingRandomWords,

    /// Transfer of the pot to the winner failed
    #[error("Payout to winner failed")]
    PayoutFailed,

    /// Fulfillment was not signed by the configured oracle authority
    #[error("Signer is not the oracle authority")]
    UnauthorizedOracle,

    /// Arithmetic overflow
    #[error("Arithmetic overflow")]
    Overflow,
}

impl From<RaffleError> for ProgramError {
    fn from(e: RaffleError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for RaffleError {
    fn type_of() -> &'static str {
        "Raffle Error"
    }
}

impl PrintProgramError for RaffleError {
    fn print<E>(&self) {
        msg!(&self.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_codes_follow_declaration_order() {
        assert_eq!(
            ProgramError::from(RaffleError::InvalidInstruction),
            ProgramError::Custom(0)
        );
        assert_eq!(
            ProgramError::from(RaffleError::WrongRoundState),
            ProgramError::Custom(4)
        );
        assert_eq!(
            ProgramError::from(RaffleError::UnknownRequest),
            ProgramError::Custom(8)
        );
        assert_eq!(
            ProgramError::from(RaffleError::PayoutFailed),
            ProgramError::Custom(10)
        );
    }
}
