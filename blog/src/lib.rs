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

//! Solana program storing blog posts.
//!
//! Each post lives in its own account owned by the program.  The account
//! records the post’s title, content, author and creation time.  Anyone can
//! create a post paying for its account; only the post’s author can edit or
//! delete it.  Deleting a post closes its account and refunds its balance to
//! the author.
//!
//! The program understands three instructions (see [`instruction`]):
//! CreatePost, UpdatePost and DeletePost.  Instruction and account
//! discriminators as well as error codes follow Anchor conventions so Anchor
//! clients of the blog program keep working.
//!
//! [`processor`] implements the operations on top of a [`store::Store`] which
//! on chain is backed by accounts passed to the instruction
//! ([`entrypoint::AccountInfoStore`]) and off chain can be the in-memory
//! [`store::MemoryStore`].
//!
//! # Features
#![doc = document_features::document_features!()]

pub mod entrypoint;
pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;
pub mod store;

pub use error::Error;
pub use instruction::{Instruction, OperationKind, PostArgs};
pub use processor::{fetch, process, Limits, Receipt};
pub use state::Post;

solana_program::declare_id!("8ouoyWWRuMmzGcJ64kpbQ8DCERKPX1k1JqDKbPJNN9ra");
