use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::error::RaffleError;

/// Ordered entry slots of the current round.
///
/// A player who enters twice holds two slots. The ledger is bounded because
/// the raffle account is allocated once with room for `capacity` keys.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParticipantLedger {
    capacity: u32,
    players: Vec<Pubkey>,
}

impl ParticipantLedger {
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            capacity,
            players: Vec::new(),
        }
    }

    /// Serialized size of a full ledger: capacity + vec length prefix + keys
    pub fn space(capacity: u32) -> usize {
        4 + 4 + capacity as usize * 32
    }

    pub fn push(&mut self, player: Pubkey) -> Result<(), RaffleError> {
        if self.players.len() >= self.capacity as usize {
            return Err(RaffleError::RaffleFull);
        }
        self.players.push(player);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Pubkey> {
        self.players.get(index)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pubkey> {
        self.players.iter()
    }

    pub fn as_slice(&self) -> &[Pubkey] {
        &self.players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_order_and_duplicates() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let mut ledger = ParticipantLedger::with_capacity(4);

        ledger.push(a).unwrap();
        ledger.push(b).unwrap();
        ledger.push(a).unwrap();

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.as_slice(), &[a, b, a]);
        assert_eq!(ledger.get(2), Some(&a));
        assert_eq!(ledger.get(3), None);
    }

    #[test]
    fn push_past_capacity_is_rejected() {
        let mut ledger = ParticipantLedger::with_capacity(1);
        ledger.push(Pubkey::new_unique()).unwrap();

        assert_eq!(
            ledger.push(Pubkey::new_unique()),
            Err(RaffleError::RaffleFull)
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn clear_empties_but_keeps_capacity() {
        let mut ledger = ParticipantLedger::with_capacity(2);
        ledger.push(Pubkey::new_unique()).unwrap();
        ledger.clear();

        assert!(ledger.is_empty());
        assert_eq!(ledger.capacity(), 2);
    }

    #[test]
    fn full_ledger_fits_in_space() {
        let mut ledger = ParticipantLedger::with_capacity(3);
        for _ in 0..3 {
            ledger.push(Pubkey::new_unique()).unwrap();
        }
        let bytes = ledger.try_to_vec().unwrap();
        assert_eq!(bytes.len(), ParticipantLedger::space(3));
    }
}
