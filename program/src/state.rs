// Raffle account state
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    clock::UnixTimestamp,
    program_error::ProgramError,
    program_pack::{IsInitialized, Sealed},
    pubkey::Pubkey,
};

use crate::config::RaffleConfig;
use crate::error::RaffleError;
use crate::ledger::ParticipantLedger;

/// Round lifecycle
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaffleState {
    /// Accepting entries, eligible for upkeep
    Open,
    /// Waiting for the outstanding randomness request to be fulfilled
    Calculating,
}

/// Raffle account data
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Raffle {
    /// Is the account initialized
    pub is_initialized: bool,
    pub(crate) config: RaffleConfig,
    pub(crate) state: RaffleState,
    pub(crate) ledger: ParticipantLedger,
    /// Lamports collected from entries since the last payout
    pub(crate) pot: u64,
    pub(crate) last_timestamp: UnixTimestamp,
    pub(crate) outstanding_request: Option<u64>,
    /// Default pubkey until the first round completes
    pub(crate) recent_winner: Pubkey,
    /// Completed rounds
    pub(crate) round: u64,
}

impl Sealed for Raffle {}

impl IsInitialized for Raffle {
    fn is_initialized(&self) -> bool {
        self.is_initialized
    }
}

impl Raffle {
    /// Fixed part of the account: everything except the ledger's keys
    const HEADER_LEN: usize = 1 // is_initialized
        + 8 + 8 + 32 + 4 // entrance_fee, interval, oracle_authority, max_participants
        + 8 + 32 + 4 + 2 + 4 // oracle config
        + 1 // state
        + 8 // pot
        + 8 // last_timestamp
        + 1 + 8 // outstanding_request
        + 32 // recent_winner
        + 8; // round

    pub fn new(config: RaffleConfig, now: UnixTimestamp) -> Self {
        Self {
            is_initialized: true,
            config,
            state: RaffleState::Open,
            ledger: ParticipantLedger::with_capacity(config.max_participants),
            pot: 0,
            last_timestamp: now,
            outstanding_request: None,
            recent_winner: Pubkey::default(),
            round: 0,
        }
    }

    /// Account size needed for a raffle holding up to `max_participants` entries
    pub fn space(max_participants: u32) -> usize {
        Self::HEADER_LEN + ParticipantLedger::space(max_participants)
    }

    /// Decodes a raffle from account data; trailing unused space is ignored
    pub fn unpack(data: &[u8]) -> Result<Self, ProgramError> {
        let mut slice = data;
        let raffle =
            Self::deserialize(&mut slice).map_err(|_| ProgramError::InvalidAccountData)?;
        if !raffle.is_initialized {
            return Err(RaffleError::NotInitialized.into());
        }
        Ok(raffle)
    }

    pub fn pack(&self, dst: &mut [u8]) -> Result<(), ProgramError> {
        let data = self
            .try_to_vec()
            .map_err(|_| ProgramError::InvalidAccountData)?;
        if data.len() > dst.len() {
            return Err(ProgramError::AccountDataTooSmall);
        }
        dst[..data.len()].copy_from_slice(&data);
        Ok(())
    }

    pub fn entrance_fee(&self) -> u64 {
        self.config.entrance_fee
    }

    pub fn interval(&self) -> i64 {
        self.config.interval
    }

    pub fn raffle_state(&self) -> RaffleState {
        self.state
    }

    pub fn player(&self, index: usize) -> Option<&Pubkey> {
        self.ledger.get(index)
    }

    pub fn number_of_players(&self) -> usize {
        self.ledger.len()
    }

    pub fn players(&self) -> &[Pubkey] {
        self.ledger.as_slice()
    }

    pub fn recent_winner(&self) -> &Pubkey {
        &self.recent_winner
    }

    pub fn last_timestamp(&self) -> UnixTimestamp {
        self.last_timestamp
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn outstanding_request(&self) -> Option<u64> {
        self.outstanding_request
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn max_participants(&self) -> u32 {
        self.ledger.capacity()
    }

    pub fn oracle_authority(&self) -> &Pubkey {
        &self.config.oracle_authority
    }

    pub fn subscription_id(&self) -> u64 {
        self.config.oracle.subscription_id
    }

    pub fn key_hash(&self) -> &[u8; 32] {
        &self.config.oracle.key_hash
    }

    pub fn callback_compute_limit(&self) -> u32 {
        self.config.oracle.callback_compute_limit
    }

    pub fn request_confirmations(&self) -> u16 {
        self.config.oracle.request_confirmations
    }

    pub fn num_words(&self) -> u32 {
        self.config.oracle.num_words
    }

    pub fn config(&self) -> &RaffleConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_participants: u32) -> RaffleConfig {
        RaffleConfig {
            oracle_authority: Pubkey::new_unique(),
            max_participants,
            ..RaffleConfig::default()
        }
    }

    #[test]
    fn new_raffle_starts_open_and_empty() {
        let raffle = Raffle::new(config(4), 1_700_000_000);

        assert_eq!(raffle.raffle_state(), RaffleState::Open);
        assert_eq!(raffle.number_of_players(), 0);
        assert_eq!(raffle.pot(), 0);
        assert_eq!(raffle.last_timestamp(), 1_700_000_000);
        assert_eq!(raffle.recent_winner(), &Pubkey::default());
        assert_eq!(raffle.outstanding_request(), None);
        assert_eq!(raffle.max_participants(), 4);
    }

    #[test]
    fn full_calculating_raffle_fits_its_space() {
        let mut raffle = Raffle::new(config(3), 0);
        for _ in 0..3 {
            raffle.ledger.push(Pubkey::new_unique()).unwrap();
        }
        raffle.state = RaffleState::Calculating;
        raffle.outstanding_request = Some(u64::MAX);

        let mut data = vec![0u8; Raffle::space(3)];
        raffle.pack(&mut data).unwrap();
        assert_eq!(raffle.try_to_vec().unwrap().len(), Raffle::space(3));
        assert_eq!(Raffle::unpack(&data).unwrap(), raffle);
    }

    #[test]
    fn unpack_zeroed_account_is_not_initialized() {
        let data = vec![0u8; Raffle::space(2)];
        assert_eq!(
            Raffle::unpack(&data),
            Err(ProgramError::from(RaffleError::NotInitialized))
        );
    }
}
