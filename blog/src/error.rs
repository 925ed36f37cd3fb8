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

//! Errors reported by the blog program.

use solana_program::program_error::ProgramError;


/// Offset of the first custom error code.
///
/// Matches numbering used by Anchor for program-defined errors so that
/// existing clients decode the codes correctly.
const ERROR_CODE_OFFSET: u32 = 6000;


/// Error returned by the program.
///
/// All variants but [`Error::Program`] are program-specific failures with
/// a stable error code (see [`Error::code`]).  [`Error::Program`] wraps
/// failures reported by the host such as missing signatures or insufficient
/// funds.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum Error {
    #[display("You are not authorized to update this post")]
    UnauthorizedPostUpdate,
    #[display("You are not authorized to delete this post")]
    UnauthorizedPostDeletion,
    #[display("Post title is too long")]
    TitleTooLong,
    #[display("Post content is too long")]
    ContentTooLong,
    #[display("Account does not hold a valid post")]
    MalformedAccount,
    #[display("Malformed instruction arguments")]
    MalformedArguments,
    #[display("Unknown instruction")]
    UnknownOperation,
    #[display("Account does not exist")]
    AccountNotFound,
    #[display("Account already exists")]
    AccountAlreadyExists,
    #[from]
    Program(ProgramError),
}

/// Program-specific errors.  Position in the array determines the error code.
const CODED: [Error; 9] = [
    Error::UnauthorizedPostUpdate,
    Error::UnauthorizedPostDeletion,
    Error::TitleTooLong,
    Error::ContentTooLong,
    Error::MalformedAccount,
    Error::MalformedArguments,
    Error::UnknownOperation,
    Error::AccountNotFound,
    Error::AccountAlreadyExists,
];

impl Error {
    /// Returns custom error code of a program-specific error or `None` for
    /// [`Error::Program`].
    pub fn code(&self) -> Option<u32> {
        let index = CODED.iter().position(|err| err == self)?;
        u32::try_from(index).ok().map(|index| ERROR_CODE_OFFSET + index)
    }

    /// Maps a custom error code back to the program-specific error.
    ///
    /// Useful for clients inspecting a failed transaction.  Returns `None` if
    /// the code doesn’t correspond to any error defined by this program.
    pub fn from_code(code: u32) -> Option<Self> {
        let index = code.checked_sub(ERROR_CODE_OFFSET)?;
        CODED.get(usize::try_from(index).ok()?).cloned()
    }
}

impl std::error::Error for Error {}

impl From<Error> for ProgramError {
    fn from(error: Error) -> Self {
        match error {
            Error::Program(error) => error,
            error => error
                .code()
                .map_or(ProgramError::InvalidArgument, ProgramError::Custom),
        }
    }
}
