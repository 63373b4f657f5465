// Upkeep Raffle
// Fixed-fee raffle rounds advanced by an upkeep check and settled with oracle randomness

pub mod config;
pub mod error;
pub mod events;
pub mod instruction;
pub mod ledger;
pub mod machine;
pub mod oracle;
pub mod payout;
pub mod processor;
pub mod state;
pub mod upkeep;

use solana_program::{account_info::AccountInfo, entrypoint::ProgramResult, pubkey::Pubkey};

#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_instruction);

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    processor::Processor::process(program_id, accounts, instruction_data)
}
