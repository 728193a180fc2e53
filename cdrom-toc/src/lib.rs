//! Synthesis of lead-in TOC / Q-subchannel data from abstract track layouts.
//!
//! Image formats like CUE sheets only record approximate track layout, but
//! emulating a physical drive requires the exact byte-level lead-in TOC a real
//! drive would read. This crate derives Red-Book-compliant Q-subchannel
//! payloads (BCD fields, MSF timestamps, pointer entries, CRC) from abstract
//! session/track metadata supplied by an image parser, and hands the finished
//! entry list to the sector synthesis stage.

pub mod bcd;
pub mod cdtime;
pub mod jobs;
pub mod layout;
pub mod subq;

use thiserror::Error;

/// Length of one raw Q-subchannel payload in bytes.
pub const SUBCHANNEL_Q_LEN: usize = 12;

/// Lead-in pointer entry sentinels (POINT field values).
pub const POINT_FIRST_TRACK: u8 = 0xA0;
pub const POINT_LAST_TRACK: u8 = 0xA1;
pub const POINT_LEAD_OUT: u8 = 0xA2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TocError {
    #[error("Unsupported/invalid disc session format")]
    InvalidSessionFormat,
    #[error("Decimal value {value} is out of range for a BCD field (must be 0-99)")]
    OutOfRange { value: u8 },
    #[error("Malformed BCD byte {byte:#04X}: nibble greater than 9")]
    Malformed { byte: u8 },
    #[error("Inconsistent disc layout: {0}")]
    InconsistentLayout(String),
}

pub type TocResult<T> = Result<T, TocError>;
