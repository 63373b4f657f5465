// Raffle configuration, fixed once at Initialize
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{msg, pubkey::Pubkey};

use crate::error::RaffleError;

/// 0.01 SOL
pub const DEFAULT_ENTRANCE_FEE: u64 = 10_000_000;
/// Seconds between rounds
pub const DEFAULT_INTERVAL: i64 = 30;
pub const DEFAULT_CALLBACK_COMPUTE_LIMIT: u32 = 500_000;
pub const DEFAULT_REQUEST_CONFIRMATIONS: u16 = 3;
pub const DEFAULT_NUM_WORDS: u32 = 1;
pub const DEFAULT_MAX_PARTICIPANTS: u32 = 64;
/// Keeps the raffle account within a single CPI allocation (10 KiB)
pub const MAX_PARTICIPANTS_LIMIT: u32 = 300;

/// Parameters forwarded to the randomness oracle with every request
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct OracleConfig {
    /// Subscription that pays for the oracle's work
    pub subscription_id: u64,
    /// Identifies the oracle key / lane the request is routed to
    pub key_hash: [u8; 32],
    /// Compute budget the oracle should attach to the fulfillment
    pub callback_compute_limit: u32,
    /// Slots the oracle waits before answering
    pub request_confirmations: u16,
    /// Random words per request; only the first one picks the winner
    pub num_words: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            subscription_id: 0,
            key_hash: [0u8; 32],
            callback_compute_limit: DEFAULT_CALLBACK_COMPUTE_LIMIT,
            request_confirmations: DEFAULT_REQUEST_CONFIRMATIONS,
            num_words: DEFAULT_NUM_WORDS,
        }
    }
}

/// Immutable settings of a raffle
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RaffleConfig {
    /// Exact price of one entry in lamports
    pub entrance_fee: u64,
    /// Minimum seconds between two round completions
    pub interval: i64,
    /// Only signer allowed to deliver random words
    pub oracle_authority: Pubkey,
    /// Entry slots the raffle account is sized for
    pub max_participants: u32,
    pub oracle: OracleConfig,
}

impl Default for RaffleConfig {
    fn default() -> Self {
        Self {
            entrance_fee: DEFAULT_ENTRANCE_FEE,
            interval: DEFAULT_INTERVAL,
            oracle_authority: Pubkey::default(),
            max_participants: DEFAULT_MAX_PARTICIPANTS,
            oracle: OracleConfig::default(),
        }
    }
}

impl RaffleConfig {
    pub fn validate(&self) -> Result<(), RaffleError> {
        if self.entrance_fee == 0 {
            msg!("Entrance fee must be greater than zero");
            return Err(RaffleError::InvalidConfig);
        }
        if self.interval <= 0 {
            msg!("Interval must be at least one second");
            return Err(RaffleError::InvalidConfig);
        }
        if self.max_participants == 0 || self.max_participants > MAX_PARTICIPANTS_LIMIT {
            msg!(
                "Participant capacity must be between 1 and {}",
                MAX_PARTICIPANTS_LIMIT
            );
            return Err(RaffleError::InvalidConfig);
        }
        if self.oracle.num_words == 0 {
            msg!("Oracle must be asked for at least one word");
            return Err(RaffleError::InvalidConfig);
        }
        if self.oracle_authority == Pubkey::default() {
            msg!("Oracle authority must be set");
            return Err(RaffleError::InvalidConfig);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RaffleConfig {
        RaffleConfig {
            oracle_authority: Pubkey::new_unique(),
            ..RaffleConfig::default()
        }
    }

    #[test]
    fn default_values() {
        let config = RaffleConfig::default();
        assert_eq!(config.entrance_fee, 10_000_000);
        assert_eq!(config.interval, 30);
        assert_eq!(config.oracle.num_words, 1);
        assert_eq!(config.oracle.request_confirmations, 3);
    }

    #[test]
    fn validate_accepts_defaults_with_authority() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_unusable_settings() {
        let mut config = valid();
        config.entrance_fee = 0;
        assert_eq!(config.validate(), Err(RaffleError::InvalidConfig));

        let mut config = valid();
        config.interval = -1;
        assert_eq!(config.validate(), Err(RaffleError::InvalidConfig));

        // a round could otherwise close in the same second it opened
        let mut config = valid();
        config.interval = 0;
        assert_eq!(config.validate(), Err(RaffleError::InvalidConfig));

        let mut config = valid();
        config.max_participants = 0;
        assert_eq!(config.validate(), Err(RaffleError::InvalidConfig));

        let mut config = valid();
        config.max_participants = MAX_PARTICIPANTS_LIMIT + 1;
        assert_eq!(config.validate(), Err(RaffleError::InvalidConfig));

        let mut config = valid();
        config.oracle.num_words = 0;
        assert_eq!(config.validate(), Err(RaffleError::InvalidConfig));

        assert_eq!(
            RaffleConfig::default().validate(),
            Err(RaffleError::InvalidConfig)
        );
    }
}
