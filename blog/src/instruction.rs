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

//! Instruction data parsing.
//!
//! Instruction data starts with an 8-byte discriminator selecting the
//! operation.  It’s followed by borsh-serialised arguments of the operation:
//! title and content strings for [`Instruction::CreatePost`] and
//! [`Instruction::UpdatePost`] and nothing for [`Instruction::DeletePost`].

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::program_error::ProgramError;

use crate::error::Error;

type Result<T = (), E = Error> = core::result::Result<T, E>;


/// Kind of operation the program performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OperationKind {
    CreatePost,
    UpdatePost,
    DeletePost,
}

impl OperationKind {
    pub const ALL: [Self; 3] =
        [Self::CreatePost, Self::UpdatePost, Self::DeletePost];

    /// Returns discriminator of the operation.
    ///
    /// The value is the first eight bytes of `sha256("global:<name>")` where
    /// `<name>` is snake-case name of the operation.  Clients compute the
    /// discriminators the same way so the values must never change.
    pub const fn discriminator(self) -> [u8; 8] {
        match self {
            Self::CreatePost => [123, 92, 184, 29, 231, 24, 15, 202],
            Self::UpdatePost => [151, 128, 207, 107, 169, 246, 241, 107],
            Self::DeletePost => [208, 39, 67, 161, 55, 13, 153, 42],
        }
    }

    /// Looks up operation with given discriminator.
    pub fn from_discriminator(discriminator: &[u8; 8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.discriminator() == *discriminator)
    }
}


/// Arguments of [`Instruction::CreatePost`] and [`Instruction::UpdatePost`].
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PostArgs {
    pub title: String,
    pub content: String,
}


/// Decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    CreatePost(PostArgs),
    UpdatePost(PostArgs),
    DeletePost,
}

impl Instruction {
    /// Parses instruction data.
    ///
    /// Data shorter than a discriminator is treated as an unknown operation.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let (discriminator, args) = data
            .split_first_chunk::<8>()
            .ok_or(Error::UnknownOperation)?;
        route(discriminator, args)
    }

    /// Returns kind of the operation.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::CreatePost(_) => OperationKind::CreatePost,
            Self::UpdatePost(_) => OperationKind::UpdatePost,
            Self::DeletePost => OperationKind::DeletePost,
        }
    }

    /// Serialises the instruction into instruction data.
    ///
    /// This is the inverse of [`Instruction::parse`].
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut data = self.kind().discriminator().to_vec();
        match self {
            Self::CreatePost(args) | Self::UpdatePost(args) => {
                borsh::to_writer(&mut data, args)
                    .map_err(|_| ProgramError::ArithmeticOverflow)?;
            }
            Self::DeletePost => (),
        }
        Ok(data)
    }
}


/// Selects operation by its discriminator and decodes its arguments.
///
/// Fails with [`Error::UnknownOperation`] if the discriminator doesn’t match
/// any operation and with [`Error::MalformedArguments`] if `args` don’t
/// decode into exactly the arguments the operation expects.
pub fn route(discriminator: &[u8; 8], args: &[u8]) -> Result<Instruction> {
    let kind = OperationKind::from_discriminator(discriminator)
        .ok_or(Error::UnknownOperation)?;
    let post_args = || {
        borsh::from_slice::<PostArgs>(args)
            .map_err(|_| Error::MalformedArguments)
    };
    Ok(match kind {
        OperationKind::CreatePost => Instruction::CreatePost(post_args()?),
        OperationKind::UpdatePost => Instruction::UpdatePost(post_args()?),
        OperationKind::DeletePost if args.is_empty() => Instruction::DeletePost,
        OperationKind::DeletePost => return Err(Error::MalformedArguments),
    })
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(title: &str, content: &str) -> PostArgs {
        PostArgs { title: title.into(), content: content.into() }
    }

    #[test]
    fn test_discriminators() {
        for (kind, name) in [
            (OperationKind::CreatePost, "create_post"),
            (OperationKind::UpdatePost, "update_post"),
            (OperationKind::DeletePost, "delete_post"),
        ] {
            let preimage = format!("global:{name}");
            let hash = solana_program::hash::hash(preimage.as_bytes());
            assert_eq!(&hash.to_bytes()[..8], &kind.discriminator()[..]);
            assert_eq!(
                Some(kind),
                OperationKind::from_discriminator(&kind.discriminator())
            );
        }
    }

    #[test]
    fn test_parse() {
        let data = [
            &OperationKind::CreatePost.discriminator()[..],
            &[10, 0, 0, 0][..],
            b"First Post",
            &[13, 0, 0, 0][..],
            b"Hello Solana!",
        ]
        .concat();
        let want = Instruction::CreatePost(args("First Post", "Hello Solana!"));
        assert_eq!(Ok(want.clone()), Instruction::parse(&data));
        assert_eq!(Ok(data), want.encode());

        let data = OperationKind::DeletePost.discriminator();
        assert_eq!(Ok(Instruction::DeletePost), Instruction::parse(&data));

        let ix = Instruction::UpdatePost(args("", "edited"));
        let data = ix.encode().unwrap();
        assert_eq!(Ok(ix), Instruction::parse(&data));
    }

    #[test]
    fn test_unknown_operation() {
        assert_eq!(Err(Error::UnknownOperation), Instruction::parse(&[]));
        assert_eq!(
            Err(Error::UnknownOperation),
            Instruction::parse(&[123, 92, 184, 29])
        );
        assert_eq!(Err(Error::UnknownOperation), route(&[0; 8], &[]));
        // Account discriminator is not an operation.
        assert_eq!(
            Err(Error::UnknownOperation),
            route(&crate::state::Post::DISCRIMINATOR, &[])
        );
    }

    #[test]
    fn test_malformed_arguments() {
        let create = OperationKind::CreatePost.discriminator();
        let update = OperationKind::UpdatePost.discriminator();
        let delete = OperationKind::DeletePost.discriminator();
        let good = borsh::to_vec(&args("title", "content")).unwrap();

        let check = |discriminator: &[u8; 8], args: &[u8]| {
            let got = route(discriminator, args);
            assert_eq!(Err(Error::MalformedArguments), got);
        };

        // Missing arguments.
        check(&create, &[]);
        check(&update, &[]);
        // Truncated content.
        check(&create, &good[..good.len() - 1]);
        // Missing content.
        check(&update, &good[..9]);
        // Unconsumed trailing bytes.
        check(&create, &[&good[..], &[0][..]].concat());
        check(&delete, &[0]);
        // Invalid UTF-8.
        check(&update, &[1, 0, 0, 0, 0xff, 0, 0, 0, 0]);
    }
}
