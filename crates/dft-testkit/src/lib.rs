//!
//! Host-side glue for driving DFT token canisters from test steps.
//!
//! - `config` parses and validates the harness TOML.
//! - `identity` maps test identity names to principals and derived accounts.
//! - `token` names the deployed token variants.
//! - `kit` ties them together into the context object step code receives.
//!
//! The codecs themselves live in `dft-types` and are re-exported as `types`.
//!

pub mod config;
pub mod error;
pub mod identity;
pub mod kit;
pub mod log;
pub mod token;

pub use error::TestkitError;
pub use kit::TestKit;

pub use ::dft_types as types;
