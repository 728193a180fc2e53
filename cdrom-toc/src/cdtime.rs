//! MSF (minutes/seconds/frames) timestamps and sector addressing

use crate::bcd::BcdValue;
use bincode::{Decode, Encode};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode)]
pub struct CdTime {
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
}

impl CdTime {
    pub const ZERO: Self = Self { minutes: 0, seconds: 0, frames: 0 };

    /// Fixed 2-second lead-in offset between absolute and logical addressing;
    /// absolute MSF 00:02:00 corresponds to logical block address 0.
    pub const LEAD_IN_OFFSET: Self = Self { minutes: 0, seconds: 2, frames: 0 };

    pub const MAX_MINUTES: u8 = 100;
    pub const SECONDS_PER_MINUTE: u8 = 60;
    pub const FRAMES_PER_SECOND: u8 = 75;

    // 100 minutes of 60 seconds of 75 frames; Red Book tops out at 99:59:74
    pub const MAX_SECTORS: u32 = 450000;

    /// # Panics
    ///
    /// Panics if any component is out of range (minutes > 99, seconds > 59,
    /// frames > 74).
    #[must_use]
    pub fn new(minutes: u8, seconds: u8, frames: u8) -> Self {
        assert!(minutes < Self::MAX_MINUTES, "Minutes must be less than {}", Self::MAX_MINUTES);
        assert!(
            seconds < Self::SECONDS_PER_MINUTE,
            "Seconds must be less than {}",
            Self::SECONDS_PER_MINUTE
        );
        assert!(
            frames < Self::FRAMES_PER_SECOND,
            "Frames must be less than {}",
            Self::FRAMES_PER_SECOND
        );

        Self { minutes, seconds, frames }
    }

    #[must_use]
    pub fn new_checked(minutes: u8, seconds: u8, frames: u8) -> Option<Self> {
        (minutes < Self::MAX_MINUTES
            && seconds < Self::SECONDS_PER_MINUTE
            && frames < Self::FRAMES_PER_SECOND)
            .then_some(Self { minutes, seconds, frames })
    }

    /// Convert to an absolute sector address: `((minutes * 60) + seconds) * 75 + frames`
    #[must_use]
    pub fn to_sector_number(self) -> u32 {
        (u32::from(Self::SECONDS_PER_MINUTE) * u32::from(self.minutes) + u32::from(self.seconds))
            * u32::from(Self::FRAMES_PER_SECOND)
            + u32::from(self.frames)
    }

    /// # Panics
    ///
    /// Panics if `sector_number` is past the end of a 99:59:74 disc.
    #[must_use]
    pub fn from_sector_number(sector_number: u32) -> Self {
        assert!(sector_number < Self::MAX_SECTORS, "Invalid sector number: {sector_number}");

        let frames = sector_number % u32::from(Self::FRAMES_PER_SECOND);
        let seconds = (sector_number / u32::from(Self::FRAMES_PER_SECOND))
            % u32::from(Self::SECONDS_PER_MINUTE);
        let minutes = sector_number
            / (u32::from(Self::FRAMES_PER_SECOND) * u32::from(Self::SECONDS_PER_MINUTE));

        Self::new(minutes as u8, seconds as u8, frames as u8)
    }

    /// Convert to a logical block address by subtracting the 150-sector
    /// lead-in offset.
    ///
    /// # Panics
    ///
    /// Panics if the absolute address is inside the 2-second lead-in.
    #[must_use]
    pub fn to_lba(self) -> u32 {
        self.to_sector_number() - Self::LEAD_IN_OFFSET.to_sector_number()
    }

    /// # Panics
    ///
    /// Panics if `lba` plus the 150-sector lead-in offset is past the end of
    /// a 99:59:74 disc.
    #[must_use]
    pub fn from_lba(lba: u32) -> Self {
        Self::from_sector_number(lba + Self::LEAD_IN_OFFSET.to_sector_number())
    }

    /// Encode each component as a BCD byte. Total because component invariants
    /// keep every value at or below 99.
    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub fn to_bcd(self) -> (BcdValue, BcdValue, BcdValue) {
        (
            BcdValue::from_decimal(self.minutes).unwrap(),
            BcdValue::from_decimal(self.seconds).unwrap(),
            BcdValue::from_decimal(self.frames).unwrap(),
        )
    }
}

impl Add for CdTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let (frames, carried) = add(self.frames, rhs.frames, false, Self::FRAMES_PER_SECOND);
        let (seconds, carried) = add(self.seconds, rhs.seconds, carried, Self::SECONDS_PER_MINUTE);
        let (minutes, _) = add(self.minutes, rhs.minutes, carried, Self::MAX_MINUTES);

        Self { minutes, seconds, frames }
    }
}

impl AddAssign for CdTime {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for CdTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let (frames, borrowed) = sub(self.frames, rhs.frames, false, Self::FRAMES_PER_SECOND);
        let (seconds, borrowed) =
            sub(self.seconds, rhs.seconds, borrowed, Self::SECONDS_PER_MINUTE);
        let (minutes, _) = sub(self.minutes, rhs.minutes, borrowed, Self::MAX_MINUTES);

        Self { minutes, seconds, frames }
    }
}

impl SubAssign for CdTime {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl PartialOrd for CdTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CdTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.minutes
            .cmp(&other.minutes)
            .then(self.seconds.cmp(&other.seconds))
            .then(self.frames.cmp(&other.frames))
    }
}

fn add(a: u8, b: u8, overflow: bool, base: u8) -> (u8, bool) {
    let sum = a + b + u8::from(overflow);
    (sum % base, sum >= base)
}

fn sub(a: u8, b: u8, overflow: bool, base: u8) -> (u8, bool) {
    let operand_r = b + u8::from(overflow);
    if a < operand_r { (base - (operand_r - a), true) } else { (a - operand_r, false) }
}

impl Display for CdTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.minutes, self.seconds, self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cd_time_add() {
        // No carries
        assert_eq!(CdTime::new(10, 20, 30) + CdTime::new(15, 25, 35), CdTime::new(25, 45, 65));

        // Frames carry
        assert_eq!(CdTime::new(10, 20, 30) + CdTime::new(15, 25, 55), CdTime::new(25, 46, 10));

        // Seconds carry
        assert_eq!(CdTime::new(10, 20, 30) + CdTime::new(15, 55, 35), CdTime::new(26, 15, 65));
    }

    #[test]
    fn cd_time_sub() {
        // No borrows
        assert_eq!(CdTime::new(12, 13, 14) - CdTime::new(7, 7, 7), CdTime::new(5, 6, 7));

        // Frames borrow
        assert_eq!(CdTime::new(5, 4, 3) - CdTime::new(1, 1, 10), CdTime::new(4, 2, 68));

        // Seconds borrow
        assert_eq!(CdTime::new(15, 5, 39) - CdTime::new(13, 16, 25), CdTime::new(1, 49, 14));
    }

    #[test]
    fn sector_number_round_trips() {
        for sector_number in [0, 1, 149, 150, 4500, 280000, CdTime::MAX_SECTORS - 1] {
            let time = CdTime::from_sector_number(sector_number);
            assert_eq!(time.to_sector_number(), sector_number);
        }

        assert_eq!(CdTime::from_sector_number(280000), CdTime::new(62, 13, 25));
        assert_eq!(CdTime::from_sector_number(CdTime::MAX_SECTORS - 1), CdTime::new(99, 59, 74));
    }

    #[test]
    fn lead_in_offset() {
        assert_eq!(CdTime::LEAD_IN_OFFSET.to_sector_number(), 150);
        assert_eq!(CdTime::from_lba(0), CdTime::new(0, 2, 0));
        assert_eq!(CdTime::new(0, 2, 0).to_lba(), 0);
        assert_eq!(CdTime::from_lba(16).to_lba(), 16);
    }

    #[test]
    fn bcd_components() {
        let (m, s, f) = CdTime::new(62, 13, 25).to_bcd();
        assert_eq!((m.to_byte(), s.to_byte(), f.to_byte()), (0x62, 0x13, 0x25));
    }
}
