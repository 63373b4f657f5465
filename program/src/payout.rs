use solana_program::{account_info::AccountInfo, pubkey::Pubkey};
use thiserror::Error;

/// Why a payout could not be made. Kept apart from `RaffleError` so the
/// state machine can tell a refused transfer from a bad request.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayoutError {
    #[error("Recipient account does not match the winner")]
    RecipientMismatch,

    #[error("Pool holds fewer lamports than the payout")]
    InsufficientPool,

    #[error("Recipient balance would overflow")]
    Overflow,

    #[error("Account lamports already borrowed")]
    Borrow,
}

/// Moves the pot to a single recipient
pub trait PayoutExecutor {
    fn transfer(&mut self, recipient: &Pubkey, amount: u64) -> Result<(), PayoutError>;
}

/// Pays out of a program-owned pool account by moving lamports directly.
///
/// `reserve` lamports (the pool's rent-exempt minimum) are never paid out.
pub struct LamportPayout<'a, 'b> {
    pool: &'b AccountInfo<'a>,
    recipient: &'b AccountInfo<'a>,
    reserve: u64,
}

impl<'a, 'b> LamportPayout<'a, 'b> {
    pub fn new(pool: &'b AccountInfo<'a>, recipient: &'b AccountInfo<'a>, reserve: u64) -> Self {
        Self {
            pool,
            recipient,
            reserve,
        }
    }
}

impl PayoutExecutor for LamportPayout<'_, '_> {
    fn transfer(&mut self, recipient: &Pubkey, amount: u64) -> Result<(), PayoutError> {
        if self.recipient.key != recipient || self.recipient.key == self.pool.key {
            return Err(PayoutError::RecipientMismatch);
        }

        let available = self.pool.lamports().saturating_sub(self.reserve);
        if available < amount {
            return Err(PayoutError::InsufficientPool);
        }
        let debited = self.pool.lamports() - amount;
        let credited = self
            .recipient
            .lamports()
            .checked_add(amount)
            .ok_or(PayoutError::Overflow)?;

        let mut pool_lamports = self
            .pool
            .try_borrow_mut_lamports()
            .map_err(|_| PayoutError::Borrow)?;
        let mut recipient_lamports = self
            .recipient
            .try_borrow_mut_lamports()
            .map_err(|_| PayoutError::Borrow)?;
        **pool_lamports = debited;
        **recipient_lamports = credited;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account<'a>(key: &'a Pubkey, owner: &'a Pubkey, lamports: &'a mut u64) -> AccountInfo<'a> {
        AccountInfo::new(key, false, true, lamports, &mut [], owner, false, 0)
    }

    #[test]
    fn moves_amount_and_keeps_reserve() {
        let owner = Pubkey::new_unique();
        let (pool_key, winner_key) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mut pool_lamports, mut winner_lamports) = (1_000 + 30, 5);
        let pool = account(&pool_key, &owner, &mut pool_lamports);
        let winner = account(&winner_key, &owner, &mut winner_lamports);

        LamportPayout::new(&pool, &winner, 1_000)
            .transfer(&winner_key, 30)
            .unwrap();

        assert_eq!(pool.lamports(), 1_000);
        assert_eq!(winner.lamports(), 35);
    }

    #[test]
    fn refuses_to_dip_into_reserve() {
        let owner = Pubkey::new_unique();
        let (pool_key, winner_key) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mut pool_lamports, mut winner_lamports) = (1_010, 0);
        let pool = account(&pool_key, &owner, &mut pool_lamports);
        let winner = account(&winner_key, &owner, &mut winner_lamports);

        let result = LamportPayout::new(&pool, &winner, 1_000).transfer(&winner_key, 30);

        assert_eq!(result, Err(PayoutError::InsufficientPool));
        assert_eq!(pool.lamports(), 1_010);
        assert_eq!(winner.lamports(), 0);
    }

    #[test]
    fn refuses_wrong_recipient() {
        let owner = Pubkey::new_unique();
        let (pool_key, winner_key) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mut pool_lamports, mut winner_lamports) = (1_030, 0);
        let pool = account(&pool_key, &owner, &mut pool_lamports);
        let winner = account(&winner_key, &owner, &mut winner_lamports);

        let result =
            LamportPayout::new(&pool, &winner, 1_000).transfer(&Pubkey::new_unique(), 30);

        assert_eq!(result, Err(PayoutError::RecipientMismatch));
        assert_eq!(pool.lamports(), 1_030);
    }
}
