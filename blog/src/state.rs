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

//! Post account state and its serialisation.
//!
//! Post account data consists of an 8-byte discriminator followed by
//! borsh-serialised fields:
//!
//! ```text
//! discriminator  [u8; 8]
//! title          u32 length (little endian) + UTF-8 bytes
//! content        u32 length (little endian) + UTF-8 bytes
//! author         [u8; 32]
//! timestamp      i64 (little endian), Unix seconds
//! ```
//!
//! The account holds no trailing bytes.  Its size always equals the encoded
//! length of the post it stores.

use borsh::io;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::clock::UnixTimestamp;
use solana_program::program_error::ProgramError;
use solana_program::pubkey::Pubkey;

use crate::error::Error;


/// A blog post stored in a program-owned account.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Post {
    pub title: String,
    pub content: String,
    /// Identity which created the post.  Never changes once set.
    pub author: Pubkey,
    /// Creation time.  Editing the post doesn’t refresh it.
    pub timestamp: UnixTimestamp,
}

impl Post {
    /// Discriminator identifying post accounts.
    ///
    /// First eight bytes of `sha256("account:Post")`.
    pub const DISCRIMINATOR: [u8; 8] = [8, 147, 90, 186, 185, 56, 192, 150];

    /// Returns length of the encoded account data.
    pub fn encoded_len(&self) -> usize {
        Self::DISCRIMINATOR.len() +
            4 +
            self.title.len() +
            4 +
            self.content.len() +
            32 +
            8
    }

    /// Serialises the post into account data including the discriminator.
    ///
    /// Fails only if title or content is longer than 4 GiB and thus its
    /// length doesn’t fit the length prefix.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        let mut data = Vec::with_capacity(self.encoded_len());
        data.extend_from_slice(&Self::DISCRIMINATOR);
        borsh::to_writer(&mut data, self)
            .map_err(|_| ProgramError::ArithmeticOverflow)?;
        Ok(data)
    }

    /// Deserialises account data into a post.
    ///
    /// Fails with [`Error::MalformedAccount`] if the data doesn’t start with
    /// post discriminator, is truncated, holds trailing bytes or any of the
    /// text fields isn’t valid UTF-8.
    pub fn decode(data: &[u8]) -> Result<Self, Error> {
        let data = data
            .strip_prefix(&Self::DISCRIMINATOR[..])
            .ok_or(Error::MalformedAccount)?;
        borsh::from_slice(data).map_err(|_| Error::MalformedAccount)
    }
}

impl BorshSerialize for Post {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.title.serialize(writer)?;
        self.content.serialize(writer)?;
        writer.write_all(self.author.as_ref())?;
        self.timestamp.serialize(writer)
    }
}

impl BorshDeserialize for Post {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            title: String::deserialize_reader(reader)?,
            content: String::deserialize_reader(reader)?,
            author: Pubkey::new_from_array(<[u8; 32]>::deserialize_reader(
                reader,
            )?),
            timestamp: UnixTimestamp::deserialize_reader(reader)?,
        })
    }
}
