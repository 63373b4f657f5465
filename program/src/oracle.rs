// Randomness oracle boundary
use solana_program::{clock::Slot, hash::hashv, msg, pubkey::Pubkey};

use crate::config::OracleConfig;
use crate::error::RaffleError;
use crate::events::RaffleEvent;

/// Something that accepts a randomness request and answers later.
///
/// The call returns as soon as the request is registered. The random words
/// come back through a separate `FulfillRandomWords` instruction.
pub trait RandomnessOracle {
    fn request_random_words(&mut self, config: &OracleConfig) -> Result<u64, RaffleError>;
}

/// On-chain oracle client: derives a request id and logs the request for
/// the off-chain oracle, which watches the program's logs.
pub struct EventOracle<'a> {
    raffle: &'a Pubkey,
    round: u64,
    slot: Slot,
}

impl<'a> EventOracle<'a> {
    pub fn new(raffle: &'a Pubkey, round: u64, slot: Slot) -> Self {
        Self {
            raffle,
            round,
            slot,
        }
    }
}

/// Request id for a given raffle, round and slot
pub fn derive_request_id(raffle: &Pubkey, round: u64, slot: Slot) -> u64 {
    let hash = hashv(&[
        b"request",
        raffle.as_ref(),
        &round.to_le_bytes(),
        &slot.to_le_bytes(),
    ]);
    let mut id = [0u8; 8];
    id.copy_from_slice(&hash.as_ref()[..8]);
    u64::from_le_bytes(id)
}

impl RandomnessOracle for EventOracle<'_> {
    fn request_random_words(&mut self, config: &OracleConfig) -> Result<u64, RaffleError> {
        let request_id = derive_request_id(self.raffle, self.round, self.slot);
        msg!(
            "Requesting {} random words: request_id={}, subscription={}, confirmations={}",
            config.num_words,
            request_id,
            config.subscription_id,
            config.request_confirmations
        );
        RaffleEvent::RandomWordsRequested {
            request_id,
            raffle: *self.raffle,
            oracle: *config,
        }
        .emit();
        Ok(request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_depends_on_round_and_slot() {
        let raffle = Pubkey::new_unique();
        let id = derive_request_id(&raffle, 0, 10);

        assert_eq!(id, derive_request_id(&raffle, 0, 10));
        assert_ne!(id, derive_request_id(&raffle, 1, 10));
        assert_ne!(id, derive_request_id(&raffle, 0, 11));
        assert_ne!(id, derive_request_id(&Pubkey::new_unique(), 0, 10));
    }
}
