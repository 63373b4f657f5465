use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{log::sol_log_data, msg, pubkey::Pubkey};

use crate::config::OracleConfig;

/// Notifications emitted by the raffle.
///
/// Each event is logged as a single borsh blob so indexers can decode it
/// from the transaction's `Program data:` lines.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum RaffleEvent {
    /// A paid entry was recorded
    RaffleEnter { player: Pubkey, amount: u64 },
    /// The round moved to Calculating and randomness was requested
    RequestedRaffleWinner { request_id: u64 },
    /// Random words arrived, the pot was paid and the round reopened
    WinnerPicked { winner: Pubkey },
    /// Request picked up by the off-chain oracle
    RandomWordsRequested {
        request_id: u64,
        raffle: Pubkey,
        oracle: OracleConfig,
    },
}

impl RaffleEvent {
    pub fn emit(&self) {
        match self.try_to_vec() {
            Ok(data) => sol_log_data(&[&data]),
            Err(err) => msg!("Failed to encode event: {}", err),
        }
    }
}
