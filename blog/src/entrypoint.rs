// solana-blog — Solana program storing blog posts in author-owned accounts
// © 2025 by the solana-blog authors
//
// This program is free software; you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation; either version 2 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program; if not, see <https://www.gnu.org/licenses/>.

//! Solana program entrypoint and the account store backed by accounts passed
//! to the instruction.

use solana_program::account_info::AccountInfo;
use solana_program::clock::{Clock, UnixTimestamp};
use solana_program::entrypoint::ProgramResult;
use solana_program::instruction::AccountMeta;
use solana_program::msg;
use solana_program::program::invoke;
use solana_program::program_error::ProgramError;
use solana_program::pubkey::Pubkey;
use solana_program::rent::Rent;
use solana_program::sysvar::Sysvar;
use solana_system_interface::instruction as system_instruction;

use crate::processor::{self, Limits};
use crate::store::Store;

type Result<T = (), E = ProgramError> = core::result::Result<T, E>;


#[cfg(not(feature = "no-entrypoint"))]
solana_program::entrypoint!(process_instruction);


/// Processes instruction passed to the program by the Solana runtime.
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction: &[u8],
) -> ProgramResult {
    if program_id != &crate::ID {
        return Err(ProgramError::IncorrectProgramId);
    }
    let now = Clock::get()?.unix_timestamp;
    process_at(program_id, accounts, instruction, now, Rent::get()?)
}


/// Processes instruction with given current time and rent parameters.
fn process_at(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction: &[u8],
    now: UnixTimestamp,
    rent: Rent,
) -> ProgramResult {
    let metas = accounts
        .iter()
        .map(|acc| AccountMeta {
            pubkey: *acc.key,
            is_signer: acc.is_signer,
            is_writable: acc.is_writable,
        })
        .collect::<Vec<_>>();
    let mut store = AccountInfoStore::new(program_id, accounts, rent);
    processor::process(&mut store, &Limits::DEFAULT, now, &metas, instruction)
        .map(|_| ())
        .map_err(|err| {
            msg!("Error: {}", err);
            err.into()
        })
}


/// [`Store`] operating on accounts passed to the instruction.
///
/// Allocating and growing accounts is done through the system program so its
/// account must be among the accounts passed to the instruction.
pub struct AccountInfoStore<'a, 'info> {
    program_id: &'a Pubkey,
    accounts: &'a [AccountInfo<'info>],
    rent: Rent,
}

impl<'a, 'info> AccountInfoStore<'a, 'info> {
    pub fn new(
        program_id: &'a Pubkey,
        accounts: &'a [AccountInfo<'info>],
        rent: Rent,
    ) -> Self {
        Self { program_id, accounts, rent }
    }

    /// Looks up account with given address.
    fn get(&self, key: &Pubkey) -> Result<&'a AccountInfo<'info>> {
        self.accounts
            .iter()
            .find(|acc| acc.key == key)
            .ok_or(ProgramError::NotEnoughAccountKeys)
    }

    /// Looks up account with given address and checks it’s owned by the
    /// program.
    fn owned(&self, key: &Pubkey) -> Result<&'a AccountInfo<'info>> {
        let account = self.get(key)?;
        if account.owner == self.program_id {
            Ok(account)
        } else {
            Err(ProgramError::IllegalOwner)
        }
    }
}

impl Store for AccountInfoStore<'_, '_> {
    fn load(&self, key: &Pubkey) -> Result<Option<Vec<u8>>> {
        let account = self.get(key)?;
        if account.owner != self.program_id {
            return Ok(None);
        }
        let data = account.try_borrow_data()?;
        Ok((!data.is_empty()).then(|| data.to_vec()))
    }

    fn allocate(
        &mut self,
        key: &Pubkey,
        payer: &Pubkey,
        data: &[u8],
    ) -> Result {
        let account = self.get(key)?;
        let payer = self.get(payer)?;
        if account.owner != &solana_system_interface::program::ID ||
            !account.data_is_empty()
        {
            return Err(ProgramError::AccountAlreadyInitialized);
        }
        let space = u64::try_from(data.len())
            .map_err(|_| ProgramError::ArithmeticOverflow)?;
        let required = self.rent.minimum_balance(data.len());

        if account.lamports() == 0 {
            let ix = system_instruction::create_account(
                payer.key,
                account.key,
                required,
                space,
                self.program_id,
            );
            invoke(&ix, self.accounts)?;
        } else {
            // create_account refuses accounts which hold lamports.  Top the
            // balance up and allocate and assign the account separately.
            let missing = required.saturating_sub(account.lamports());
            if missing > 0 {
                let ix = system_instruction::transfer(
                    payer.key,
                    account.key,
                    missing,
                );
                invoke(&ix, self.accounts)?;
            }
            let ix = system_instruction::allocate(account.key, space);
            invoke(&ix, self.accounts)?;
            let ix = system_instruction::assign(account.key, self.program_id);
            invoke(&ix, self.accounts)?;
        }

        account.try_borrow_mut_data()?.copy_from_slice(data);
        Ok(())
    }

    fn store(&mut self, key: &Pubkey, payer: &Pubkey, data: &[u8]) -> Result {
        let account = self.owned(key)?;
        let payer = self.get(payer)?;
        let required = self.rent.minimum_balance(data.len());
        let lamports = account.lamports();
        if lamports < required {
            let ix = system_instruction::transfer(
                payer.key,
                account.key,
                required - lamports,
            );
            invoke(&ix, self.accounts)?;
        }
        resize(account, data.len())?;
        if lamports > required {
            move_lamports(account, payer, lamports - required)?;
        }
        account.try_borrow_mut_data()?.copy_from_slice(data);
        Ok(())
    }

    fn close(&mut self, key: &Pubkey, beneficiary: &Pubkey) -> Result {
        let account = self.owned(key)?;
        let beneficiary = self.get(beneficiary)?;
        move_lamports(account, beneficiary, account.lamports())?;
        resize(account, 0)?;
        account.assign(&solana_system_interface::program::ID);
        Ok(())
    }
}


#[allow(deprecated)]
fn resize(account: &AccountInfo, len: usize) -> Result {
    account.realloc(len, false)
}

/// Moves lamports between accounts without going through the system program.
///
/// `from` must be owned by the program.
fn move_lamports(
    from: &AccountInfo,
    to: &AccountInfo,
    lamports: u64,
) -> Result {
    if lamports == 0 || from.key == to.key {
        return Ok(());
    }
    let from_balance = from
        .lamports()
        .checked_sub(lamports)
        .ok_or(ProgramError::InsufficientFunds)?;
    let to_balance = to
        .lamports()
        .checked_add(lamports)
        .ok_or(ProgramError::ArithmeticOverflow)?;
    **from.try_borrow_mut_lamports()? = from_balance;
    **to.try_borrow_mut_lamports()? = to_balance;
    Ok(())
}
