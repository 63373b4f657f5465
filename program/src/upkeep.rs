// Upkeep predicate, shared by CheckUpkeep and PerformUpkeep
use solana_program::clock::UnixTimestamp;

use crate::state::RaffleState;

/// Read-only view of everything the upkeep decision depends on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpkeepSnapshot {
    pub state: RaffleState,
    pub last_timestamp: UnixTimestamp,
    pub interval: i64,
    pub players: usize,
    pub pot: u64,
}

impl UpkeepSnapshot {
    pub fn is_open(&self) -> bool {
        self.state == RaffleState::Open
    }

    pub fn time_passed(&self, now: UnixTimestamp) -> bool {
        now.saturating_sub(self.last_timestamp) >= self.interval
    }

    pub fn has_players(&self) -> bool {
        self.players > 0
    }

    pub fn has_balance(&self) -> bool {
        self.pot > 0
    }

    /// Names of the conditions that currently block upkeep
    pub fn reasons(&self, now: UnixTimestamp) -> Vec<&'static str> {
        let mut reasons = Vec::new();
        if !self.is_open() {
            reasons.push("raffle not open");
        }
        if !self.time_passed(now) {
            reasons.push("interval not elapsed");
        }
        if !self.has_players() {
            reasons.push("no players");
        }
        if !self.has_balance() {
            reasons.push("empty pot");
        }
        reasons
    }
}

/// True when the round may be advanced at `now`
pub fn check_upkeep(snapshot: &UpkeepSnapshot, now: UnixTimestamp) -> bool {
    snapshot.is_open()
        && snapshot.time_passed(now)
        && snapshot.has_players()
        && snapshot.has_balance()
}
