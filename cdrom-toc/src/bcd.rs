//! Binary-coded decimal bytes as used throughout the Q subchannel

use crate::{TocError, TocResult};
use bincode::{Decode, Encode};
use std::fmt::{Display, Formatter};

/// A single byte with two views: a decimal value in 0-99, or the raw BCD byte
/// where each nibble encodes one decimal digit.
///
/// Only the byte is stored; both views read and write the same storage, so a
/// mutation through one view is always visible through the other. Raw bytes
/// with a nibble greater than 9 are representable (the lead-in pointer
/// sentinels 0xA0-0xA2 travel through the raw view) but have no decimal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode)]
pub struct BcdValue(u8);

impl BcdValue {
    pub const ZERO: Self = Self(0);

    /// Encode a decimal value in 0-99 as a BCD byte.
    ///
    /// # Errors
    ///
    /// Returns [`TocError::OutOfRange`] if `value` is greater than 99. That is
    /// a caller bug rather than bad disc data, so it is reported immediately
    /// instead of being truncated.
    pub fn from_decimal(value: u8) -> TocResult<Self> {
        if value > 99 {
            return Err(TocError::OutOfRange { value });
        }
        Ok(Self(((value / 10) << 4) | (value % 10)))
    }

    /// Reinterpret a raw byte as BCD without validation.
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Decode the stored byte to its decimal value.
    ///
    /// # Errors
    ///
    /// Returns [`TocError::Malformed`] if either nibble is greater than 9,
    /// which signals corrupt input when decoding untrusted disc bytes.
    pub fn to_decimal(self) -> TocResult<u8> {
        let (hi, lo) = (self.0 >> 4, self.0 & 0x0F);
        if hi > 9 || lo > 9 {
            return Err(TocError::Malformed { byte: self.0 });
        }
        Ok(10 * hi + lo)
    }

    #[must_use]
    pub fn to_byte(self) -> u8 {
        self.0
    }
}

impl Display for BcdValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_to_bcd_round_trips() {
        for d in 0..=99 {
            let bcd = BcdValue::from_decimal(d).unwrap();
            assert_eq!(bcd.to_decimal().unwrap(), d);
        }
    }

    #[test]
    fn bcd_to_decimal_round_trips() {
        for hi in 0..=9_u8 {
            for lo in 0..=9_u8 {
                let byte = (hi << 4) | lo;
                let decimal = BcdValue::from_byte(byte).to_decimal().unwrap();
                assert_eq!(BcdValue::from_decimal(decimal).unwrap().to_byte(), byte);
            }
        }
    }

    #[test]
    fn known_encodings() {
        assert_eq!(BcdValue::from_decimal(0).unwrap().to_byte(), 0x00);
        assert_eq!(BcdValue::from_decimal(10).unwrap().to_byte(), 0x10);
        assert_eq!(BcdValue::from_decimal(74).unwrap().to_byte(), 0x74);
        assert_eq!(BcdValue::from_decimal(99).unwrap().to_byte(), 0x99);
    }

    #[test]
    fn out_of_range_decimal_rejected() {
        assert_eq!(BcdValue::from_decimal(100), Err(TocError::OutOfRange { value: 100 }));
        assert_eq!(BcdValue::from_decimal(255), Err(TocError::OutOfRange { value: 255 }));
    }

    #[test]
    fn malformed_nibbles_rejected() {
        assert_eq!(
            BcdValue::from_byte(0xA0).to_decimal(),
            Err(TocError::Malformed { byte: 0xA0 })
        );
        assert_eq!(
            BcdValue::from_byte(0x1F).to_decimal(),
            Err(TocError::Malformed { byte: 0x1F })
        );
    }
}
