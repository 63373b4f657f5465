use crate::config::RaffleConfig;
use crate::error::RaffleError;
use crate::instruction::RaffleInstruction;
use crate::oracle::EventOracle;
use crate::payout::LamportPayout;
use crate::state::Raffle;

use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::{invoke, set_return_data},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_instruction,
    sysvar::{clock::Clock, rent::Rent, Sysvar},
};

pub struct Processor;

impl Processor {
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        let instruction = RaffleInstruction::unpack(instruction_data)?;

        match instruction {
            RaffleInstruction::Initialize { config } => {
                msg!("Instruction: Initialize");
                Self::process_initialize(program_id, accounts, config)
            }
            RaffleInstruction::Enter { amount } => {
                msg!("Instruction: Enter");
                Self::process_enter(program_id, accounts, amount)
            }
            RaffleInstruction::CheckUpkeep => {
                msg!("Instruction: Check Upkeep");
                Self::process_check_upkeep(program_id, accounts)
            }
            RaffleInstruction::PerformUpkeep => {
                msg!("Instruction: Perform Upkeep");
                Self::process_perform_upkeep(program_id, accounts)
            }
            RaffleInstruction::FulfillRandomWords {
                request_id,
                random_words,
            } => {
                msg!("Instruction: Fulfill Random Words");
                Self::process_fulfill_random_words(program_id, accounts, request_id, &random_words)
            }
        }
    }

    fn load_raffle(raffle_info: &AccountInfo, program_id: &Pubkey) -> Result<Raffle, ProgramError> {
        if raffle_info.owner != program_id {
            msg!("Raffle account must be owned by this program");
            return Err(ProgramError::IncorrectProgramId);
        }
        let raffle = Raffle::unpack(&raffle_info.try_borrow_data()?)?;
        Ok(raffle)
    }

    fn process_initialize(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        config: RaffleConfig,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let payer_info = next_account_info(account_info_iter)?;
        let raffle_info = next_account_info(account_info_iter)?;
        let system_program_info = next_account_info(account_info_iter)?;

        if !payer_info.is_signer || !raffle_info.is_signer {
            msg!("Payer and raffle account must sign the transaction");
            return Err(ProgramError::MissingRequiredSignature);
        }
        if raffle_info.owner == program_id {
            msg!("Raffle account is already initialized");
            return Err(RaffleError::AlreadyInitialized.into());
        }
        config.validate()?;

        let space = Raffle::space(config.max_participants);
        let rent_lamports = Rent::get()?.minimum_balance(space);
        invoke(
            &system_instruction::create_account(
                payer_info.key,
                raffle_info.key,
                rent_lamports,
                space as u64,
                program_id,
            ),
            &[
                payer_info.clone(),
                raffle_info.clone(),
                system_program_info.clone(),
            ],
        )?;

        let now = Clock::get()?.unix_timestamp;
        let raffle = Raffle::new(config, now);
        raffle.pack(&mut raffle_info.try_borrow_mut_data()?)?;

        msg!(
            "Raffle initialized: EntranceFee={}, Interval={}s, Capacity={}, Oracle={}",
            config.entrance_fee,
            config.interval,
            config.max_participants,
            config.oracle_authority
        );
        Ok(())
    }

    fn process_enter(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let player_info = next_account_info(account_info_iter)?;
        let raffle_info = next_account_info(account_info_iter)?;
        let system_program_info = next_account_info(account_info_iter)?;

        if !player_info.is_signer {
            msg!("Player must sign the transaction");
            return Err(ProgramError::MissingRequiredSignature);
        }
        let mut raffle = Self::load_raffle(raffle_info, program_id)?;

        let event = raffle.enter(*player_info.key, amount)?;

        invoke(
            &system_instruction::transfer(player_info.key, raffle_info.key, amount),
            &[
                player_info.clone(),
                raffle_info.clone(),
                system_program_info.clone(),
            ],
        )?;
        raffle.pack(&mut raffle_info.try_borrow_mut_data()?)?;

        event.emit();
        Ok(())
    }

    fn process_check_upkeep(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let raffle_info = next_account_info(account_info_iter)?;

        let raffle = Self::load_raffle(raffle_info, program_id)?;
        let now = Clock::get()?.unix_timestamp;
        let snapshot = raffle.upkeep_snapshot();
        let upkeep_needed = raffle.check_upkeep(now);

        if upkeep_needed {
            msg!("Upkeep needed");
        } else {
            msg!("Upkeep not needed: {}", snapshot.reasons(now).join(", "));
        }
        set_return_data(&[upkeep_needed as u8]);
        Ok(())
    }

    fn process_perform_upkeep(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let caller_info = next_account_info(account_info_iter)?;
        let raffle_info = next_account_info(account_info_iter)?;

        if !caller_info.is_signer {
            msg!("Caller must sign the transaction");
            return Err(ProgramError::MissingRequiredSignature);
        }
        let mut raffle = Self::load_raffle(raffle_info, program_id)?;

        let clock = Clock::get()?;
        let mut oracle = EventOracle::new(raffle_info.key, raffle.round(), clock.slot);
        let event = raffle.perform_upkeep(&mut oracle, clock.unix_timestamp)?;
        raffle.pack(&mut raffle_info.try_borrow_mut_data()?)?;

        event.emit();
        Ok(())
    }

    fn process_fulfill_random_words(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        request_id: u64,
        random_words: &[[u8; 32]],
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let authority_info = next_account_info(account_info_iter)?;
        let raffle_info = next_account_info(account_info_iter)?;
        let winner_info = next_account_info(account_info_iter)?;

        let mut raffle = Self::load_raffle(raffle_info, program_id)?;
        if !authority_info.is_signer || authority_info.key != raffle.oracle_authority() {
            msg!("Random words must be delivered by {}", raffle.oracle_authority());
            return Err(RaffleError::UnauthorizedOracle.into());
        }

        let now = Clock::get()?.unix_timestamp;
        let reserve = Rent::get()?.minimum_balance(raffle_info.data_len());
        let mut payout = LamportPayout::new(raffle_info, winner_info, reserve);
        let event = raffle.fulfill_random_words(request_id, random_words, &mut payout, now)?;
        raffle.pack(&mut raffle_info.try_borrow_mut_data()?)?;

        event.emit();
        Ok(())
    }
}
