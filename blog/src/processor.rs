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

//! Processing of program instructions.
//!
//! Every operation validates all of its preconditions before touching the
//! store so a failed instruction leaves accounts unchanged.

use solana_program::clock::UnixTimestamp;
use solana_program::instruction::AccountMeta;
use solana_program::msg;
use solana_program::program_error::ProgramError;
use solana_program::pubkey::Pubkey;

use crate::error::Error;
use crate::instruction::{Instruction, PostArgs};
use crate::state::Post;
use crate::store::Store;

type Result<T = (), E = Error> = core::result::Result<T, E>;


/// Maximum lengths of post fields, counted in characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub max_title_len: usize,
    pub max_content_len: usize,
}

impl Limits {
    pub const DEFAULT: Self = Self { max_title_len: 50, max_content_len: 500 };

    /// Checks that title and content fit the limits.
    pub fn check(&self, args: &PostArgs) -> Result {
        if args.title.chars().count() > self.max_title_len {
            Err(Error::TitleTooLong)
        } else if args.content.chars().count() > self.max_content_len {
            Err(Error::ContentTooLong)
        } else {
            Ok(())
        }
    }
}

impl Default for Limits {
    fn default() -> Self { Self::DEFAULT }
}


/// Result of a successfully processed instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Address of the post account the instruction operated on.
    pub address: Pubkey,
    /// State of the post after the instruction; `None` if it was deleted.
    pub post: Option<Post>,
}


/// Processes a single instruction.
///
/// `accounts` lists accounts referenced by the instruction together with
/// their signer and writable flags and `data` is the instruction data.  `now`
/// is recorded as creation time of new posts.
pub fn process(
    store: &mut impl Store,
    limits: &Limits,
    now: UnixTimestamp,
    accounts: &[AccountMeta],
    data: &[u8],
) -> Result<Receipt> {
    let instruction = Instruction::parse(data)?;
    msg!("Instruction: {}", instruction.kind());
    match instruction {
        Instruction::CreatePost(args) => {
            create_post(store, limits, now, accounts, args)
        }
        Instruction::UpdatePost(args) => {
            update_post(store, limits, accounts, args)
        }
        Instruction::DeletePost => delete_post(store, accounts),
    }
}


/// Reads post stored at given address.
///
/// Fails with [`Error::AccountNotFound`] if there’s no live post at the
/// address.
pub fn fetch(store: &impl Store, key: &Pubkey) -> Result<Post> {
    let data = store.load(key)?.filter(|data| !is_zeroed(data));
    Post::decode(&data.ok_or(Error::AccountNotFound)?)
}


/// Creates a new post.
///
/// Accounts: `[post (signer, writable), author (signer, writable),
/// system_program]`.  Author pays for the post account.
fn create_post(
    store: &mut impl Store,
    limits: &Limits,
    now: UnixTimestamp,
    accounts: &[AccountMeta],
    args: PostArgs,
) -> Result<Receipt> {
    let mut accounts = accounts.iter();
    let post = next_account(&mut accounts)?;
    let author = next_account(&mut accounts)?;
    let system = next_account(&mut accounts)?;
    check_signer(post)?;
    check_writable(post)?;
    check_signer(author)?;
    check_writable(author)?;
    if system.pubkey != solana_system_interface::program::ID {
        return Err(ProgramError::IncorrectProgramId.into());
    }
    if post.pubkey == author.pubkey {
        return Err(ProgramError::InvalidArgument.into());
    }
    limits.check(&args)?;

    let record = Post {
        title: args.title,
        content: args.content,
        author: author.pubkey,
        timestamp: now,
    };
    let data = record.encode()?;
    match store.load(&post.pubkey)? {
        Some(old) if !is_zeroed(&old) => {
            return Err(Error::AccountAlreadyExists)
        }
        // Zeroed account is still owned by us; reuse it.
        Some(_) => store.store(&post.pubkey, &author.pubkey, &data)?,
        None => store.allocate(&post.pubkey, &author.pubkey, &data)?,
    }
    Ok(Receipt { address: post.pubkey, post: Some(record) })
}


/// Replaces title and content of a post.
///
/// Accounts: `[post (writable), author (signer)]`.  The author must match
/// author stored in the post and must be writable if the post changes size
/// since it pays or receives the rent difference.  Author and timestamp are
/// preserved.
fn update_post(
    store: &mut impl Store,
    limits: &Limits,
    accounts: &[AccountMeta],
    args: PostArgs,
) -> Result<Receipt> {
    let (post, author, mut record) = authorised_post(
        &*store,
        accounts,
        Error::UnauthorizedPostUpdate,
    )?;
    limits.check(&args)?;

    let old_len = record.encoded_len();
    record.title = args.title;
    record.content = args.content;
    if record.encoded_len() != old_len {
        check_writable(author)?;
    }
    store.store(&post, &record.author, &record.encode()?)?;
    Ok(Receipt { address: post, post: Some(record) })
}


/// Deletes a post refunding its balance to the author.
///
/// Accounts: `[post (writable), author (signer, writable)]`.  The author must
/// match author stored in the post.
fn delete_post(
    store: &mut impl Store,
    accounts: &[AccountMeta],
) -> Result<Receipt> {
    let (post, author, record) = authorised_post(
        &*store,
        accounts,
        Error::UnauthorizedPostDeletion,
    )?;
    check_writable(author)?;
    store.close(&post, &record.author)?;
    Ok(Receipt { address: post, post: None })
}


/// Loads the post an update or delete operates on and checks the signing
/// author owns it.
///
/// The author account is compared with the author stored in the post, never
/// with a value supplied in instruction data.  Returns `unauthorised` if they
/// differ.
fn authorised_post<'a>(
    store: &impl Store,
    accounts: &'a [AccountMeta],
    unauthorised: Error,
) -> Result<(Pubkey, &'a AccountMeta, Post)> {
    let mut accounts = accounts.iter();
    let post = next_account(&mut accounts)?;
    let author = next_account(&mut accounts)?;
    check_writable(post)?;
    let record = fetch(store, &post.pubkey)?;
    check_signer(author)?;
    if record.author != author.pubkey {
        return Err(unauthorised);
    }
    Ok((post.pubkey, author, record))
}


fn next_account<'a>(
    accounts: &mut impl Iterator<Item = &'a AccountMeta>,
) -> Result<&'a AccountMeta> {
    accounts.next().ok_or(ProgramError::NotEnoughAccountKeys.into())
}

fn check_signer(account: &AccountMeta) -> Result {
    if account.is_signer {
        Ok(())
    } else {
        Err(ProgramError::MissingRequiredSignature.into())
    }
}

fn check_writable(account: &AccountMeta) -> Result {
    if account.is_writable {
        Ok(())
    } else {
        Err(ProgramError::InvalidArgument.into())
    }
}

/// Whether account data has been wiped.
fn is_zeroed(data: &[u8]) -> bool { data.iter().all(|byte| *byte == 0) }
