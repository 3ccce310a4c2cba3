#![doc = include_str!("../README.md")]

mod clients;
mod error;
mod traits;
mod utils;
mod waits;

pub use clients::*;
pub use error::*;
pub use traits::*;
pub use utils::*;
pub use waits::*;
