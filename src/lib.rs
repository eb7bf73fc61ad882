#![no_std]

#[cfg(test)]
extern crate std;

mod error;

pub mod config;
pub mod device;
pub mod interface;
pub mod params;
pub mod registers;

pub use crate::device::Mcp3911;
pub use crate::error::{Error, InvalidChannel, Result};
