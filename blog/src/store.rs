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

//! Storage of post accounts.
//!
//! [`Store`] abstracts over where accounts live so that the processor can be
//! driven by the Solana runtime (see [`crate::entrypoint::AccountInfoStore`])
//! as well as by the in-memory [`MemoryStore`].

use std::collections::BTreeMap;

use solana_program::program_error::ProgramError;
use solana_program::pubkey::Pubkey;
use solana_program::rent::Rent;

type Result<T = (), E = ProgramError> = core::result::Result<T, E>;


/// Account storage used by the processor.
///
/// Implementations must apply each method atomically: either the whole
/// change happens or, when an error is returned, nothing changes.
pub trait Store {
    /// Returns data of the program-owned account at `key`.
    ///
    /// Returns `None` if no such account exists or the account holds no data.
    fn load(&self, key: &Pubkey) -> Result<Option<Vec<u8>>>;

    /// Creates a program-owned account at `key` holding `data`.
    ///
    /// `payer` funds rent exemption of the new account.  Fails if an account
    /// with data or owned by another program already exists at `key`.
    fn allocate(&mut self, key: &Pubkey, payer: &Pubkey, data: &[u8])
        -> Result;

    /// Replaces data of the program-owned account at `key`.
    ///
    /// Resizes the account if the length of `data` differs from current size.
    /// `payer` funds additional rent when the account grows and receives the
    /// excess when it shrinks.
    fn store(&mut self, key: &Pubkey, payer: &Pubkey, data: &[u8]) -> Result;

    /// Removes the program-owned account at `key` transferring all of its
    /// lamports to `beneficiary`.  The address may be allocated again
    /// afterwards.
    fn close(&mut self, key: &Pubkey, beneficiary: &Pubkey) -> Result;
}


/// State of an account held in [`MemoryStore`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Account {
    pub lamports: u64,
    pub data: Vec<u8>,
    pub owner: Pubkey,
}


/// In-memory account store.
///
/// Keeps balances, data and owners of accounts and requires every
/// program-owned account to be rent exempt the same way the Solana runtime
/// does.  Wallets are funded with [`MemoryStore::airdrop`].
#[derive(Clone, Debug)]
pub struct MemoryStore {
    program_id: Pubkey,
    rent: Rent,
    accounts: BTreeMap<Pubkey, Account>,
}

impl MemoryStore {
    /// Creates an empty store for accounts owned by `program_id`.
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id, rent: Rent::default(), accounts: BTreeMap::new() }
    }

    /// Sets rent parameters used to compute rent-exempt balances.
    pub fn with_rent(mut self, rent: Rent) -> Self {
        self.rent = rent;
        self
    }

    pub fn program_id(&self) -> &Pubkey { &self.program_id }

    pub fn rent(&self) -> &Rent { &self.rent }

    /// Credits `lamports` to a system-owned account at `key` creating the
    /// account if necessary.
    pub fn airdrop(&mut self, key: Pubkey, lamports: u64) -> Result {
        let balance = self.balance(&key).checked_add(lamports);
        let balance = balance.ok_or(ProgramError::ArithmeticOverflow)?;
        self.accounts
            .entry(key)
            .or_insert_with(|| Account {
                owner: solana_system_interface::program::ID,
                ..Account::default()
            })
            .lamports = balance;
        Ok(())
    }

    /// Returns account at given address if it exists.
    pub fn account(&self, key: &Pubkey) -> Option<&Account> {
        self.accounts.get(key)
    }

    /// Returns balance of account at given address; zero if there’s no
    /// account.
    pub fn balance(&self, key: &Pubkey) -> u64 {
        self.accounts.get(key).map_or(0, |acc| acc.lamports)
    }

    /// Returns the account at `key` if it’s owned by the program.
    fn owned(&self, key: &Pubkey) -> Result<&Account> {
        self.accounts
            .get(key)
            .filter(|acc| acc.owner == self.program_id)
            .ok_or(ProgramError::UninitializedAccount)
    }

    /// Moves `lamports` from `from` to `to`.  Missing `to` account is created
    /// as a system-owned account.
    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, lamports: u64) -> Result {
        if lamports == 0 || from == to {
            return Ok(());
        }
        let from_balance = self
            .balance(from)
            .checked_sub(lamports)
            .ok_or(ProgramError::InsufficientFunds)?;
        let to_balance = self
            .balance(to)
            .checked_add(lamports)
            .ok_or(ProgramError::ArithmeticOverflow)?;
        if let Some(acc) = self.accounts.get_mut(from) {
            acc.lamports = from_balance;
        }
        self.airdrop(*to, 0)?;
        if let Some(acc) = self.accounts.get_mut(to) {
            acc.lamports = to_balance;
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &Pubkey) -> Result<Option<Vec<u8>>> {
        Ok(self
            .accounts
            .get(key)
            .filter(|acc| acc.owner == self.program_id && !acc.data.is_empty())
            .map(|acc| acc.data.clone()))
    }

    fn allocate(
        &mut self,
        key: &Pubkey,
        payer: &Pubkey,
        data: &[u8],
    ) -> Result {
        let existing = self.accounts.get(key);
        if existing.is_some_and(|acc| {
            acc.owner != solana_system_interface::program::ID ||
                !acc.data.is_empty()
        }) {
            return Err(ProgramError::AccountAlreadyInitialized);
        }
        // Lamports already held by the address count towards rent exemption.
        let required = self
            .rent
            .minimum_balance(data.len())
            .saturating_sub(existing.map_or(0, |acc| acc.lamports));
        self.transfer(payer, key, required)?;
        self.airdrop(*key, 0)?;
        if let Some(acc) = self.accounts.get_mut(key) {
            acc.data = data.to_vec();
            acc.owner = self.program_id;
        }
        Ok(())
    }

    fn store(&mut self, key: &Pubkey, payer: &Pubkey, data: &[u8]) -> Result {
        let lamports = self.owned(key)?.lamports;
        let required = self.rent.minimum_balance(data.len());
        if lamports < required {
            self.transfer(payer, key, required - lamports)?;
        } else {
            self.transfer(key, payer, lamports - required)?;
        }
        if let Some(acc) = self.accounts.get_mut(key) {
            acc.data = data.to_vec();
        }
        Ok(())
    }

    fn close(&mut self, key: &Pubkey, beneficiary: &Pubkey) -> Result {
        let lamports = self.owned(key)?.lamports;
        self.transfer(key, beneficiary, lamports)?;
        self.accounts.remove(key);
        Ok(())
    }
}
