//!
//! Value types and codecs shared by every DFT token surface.
//!
//! - `subaccount` derives the 32-byte sub-identifiers.
//! - `account` derives, renders and parses checksummed account identifiers.
//! - `amount` converts human decimal amounts to and from integer base units.
//! - `holder` and `fee` build the ledger-facing values on top of those codecs.
//!
//! Everything here is pure: no I/O, no logging, no shared state.
//!

pub mod account;
pub mod amount;
pub mod encoding;
pub mod error;
pub mod fee;
pub mod holder;
pub mod subaccount;

pub use account::*;
pub use amount::*;
pub use error::{CodecError, ErrorClass};
pub use fee::TokenFee;
pub use holder::TokenHolder;
pub use subaccount::*;

//
// common types
//

pub use candid::{Nat, Principal};
