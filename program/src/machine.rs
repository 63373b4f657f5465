// Round transitions: enter, perform upkeep, fulfill
use solana_program::{clock::UnixTimestamp, msg, pubkey::Pubkey};

use crate::error::RaffleError;
use crate::events::RaffleEvent;
use crate::oracle::RandomnessOracle;
use crate::payout::PayoutExecutor;
use crate::state::{Raffle, RaffleState};
use crate::upkeep::{self, UpkeepSnapshot};

/// Index picked by a random word for `count` slots.
///
/// The word is read as a big-endian unsigned 256-bit integer and reduced
/// modulo `count` over all of its bits.
pub fn winner_index(word: &[u8; 32], count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let modulus = count as u128;
    let index = word
        .iter()
        .fold(0u128, |acc, byte| ((acc << 8) | *byte as u128) % modulus);
    Some(index as usize)
}

impl Raffle {
    pub fn upkeep_snapshot(&self) -> UpkeepSnapshot {
        UpkeepSnapshot {
            state: self.state,
            last_timestamp: self.last_timestamp,
            interval: self.config.interval,
            players: self.ledger.len(),
            pot: self.pot,
        }
    }

    /// Whether `perform_upkeep` would succeed at `now`. Never mutates.
    pub fn check_upkeep(&self, now: UnixTimestamp) -> bool {
        upkeep::check_upkeep(&self.upkeep_snapshot(), now)
    }

    /// Records one paid entry for `player`
    pub fn enter(&mut self, player: Pubkey, amount: u64) -> Result<RaffleEvent, RaffleError> {
        if self.state != RaffleState::Open {
            msg!("Raffle is not open, state={:?}", self.state);
            return Err(RaffleError::WrongRoundState);
        }
        if amount != self.config.entrance_fee {
            msg!(
                "Payment of {} lamports does not match entrance fee of {} lamports",
                amount,
                self.config.entrance_fee
            );
            return Err(RaffleError::IncorrectPayment);
        }
        let pot = self.pot.checked_add(amount).ok_or(RaffleError::Overflow)?;
        self.ledger.push(player).map_err(|err| {
            msg!("Raffle is full: {} entries", self.ledger.capacity());
            err
        })?;
        self.pot = pot;

        msg!(
            "Player {} entered, {} entries, pot {} lamports",
            player,
            self.ledger.len(),
            self.pot
        );
        Ok(RaffleEvent::RaffleEnter { player, amount })
    }

    /// Closes the round and asks the oracle for randomness.
    ///
    /// The upkeep conditions are evaluated here again; a caller's earlier
    /// `check_upkeep` result is never trusted.
    pub fn perform_upkeep<O>(
        &mut self,
        oracle: &mut O,
        now: UnixTimestamp,
    ) -> Result<RaffleEvent, RaffleError>
    where
        O: RandomnessOracle + ?Sized,
    {
        let snapshot = self.upkeep_snapshot();
        if !upkeep::check_upkeep(&snapshot, now) {
            msg!(
                "Upkeep not needed: balance={}, players={}, state={:?} ({})",
                snapshot.pot,
                snapshot.players,
                snapshot.state,
                snapshot.reasons(now).join(", ")
            );
            return Err(RaffleError::UpkeepNotNeeded);
        }

        let request_id = oracle.request_random_words(&self.config.oracle)?;
        self.state = RaffleState::Calculating;
        self.outstanding_request = Some(request_id);

        msg!("Requested raffle winner, request_id={}", request_id);
        Ok(RaffleEvent::RequestedRaffleWinner { request_id })
    }

    /// Winner the given word would pick against the current entries
    pub fn preview_winner(&self, word: &[u8; 32]) -> Option<Pubkey> {
        winner_index(word, self.ledger.len()).and_then(|index| self.ledger.get(index).copied())
    }

    /// Completes the round with the oracle's random words.
    ///
    /// The payout runs before anything is written: if it fails the raffle is
    /// left exactly as it was, still Calculating with the same request.
    pub fn fulfill_random_words<P>(
        &mut self,
        request_id: u64,
        random_words: &[[u8; 32]],
        payout: &mut P,
        now: UnixTimestamp,
    ) -> Result<RaffleEvent, RaffleError>
    where
        P: PayoutExecutor + ?Sized,
    {
        if self.state != RaffleState::Calculating || self.outstanding_request != Some(request_id)
        {
            msg!(
                "No outstanding request {} (outstanding: {:?})",
                request_id,
                self.outstanding_request
            );
            return Err(RaffleError::UnknownRequest);
        }
        let word = random_words.first().ok_or(RaffleError::MissingRandomWords)?;
        let winner = self
            .preview_winner(word)
            .ok_or(RaffleError::WrongRoundState)?;
        let next_round = self.round.checked_add(1).ok_or(RaffleError::Overflow)?;
        let prize = self.pot;

        payout.transfer(&winner, prize).map_err(|err| {
            msg!("Payout of {} lamports to {} failed: {}", prize, winner, err);
            RaffleError::PayoutFailed
        })?;

        self.recent_winner = winner;
        self.ledger.clear();
        self.pot = 0;
        self.last_timestamp = now;
        self.outstanding_request = None;
        self.round = next_round;
        self.state = RaffleState::Open;

        msg!("Winner picked: {} receives {} lamports", winner, prize);
        Ok(RaffleEvent::WinnerPicked { winner })
    }
}
