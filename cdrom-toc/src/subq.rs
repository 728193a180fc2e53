//! The 12-byte Q-subchannel payload carried by each lead-in TOC entry

use crate::bcd::BcdValue;
use crate::cdtime::CdTime;
use crate::SUBCHANNEL_Q_LEN;
use bincode::{Decode, Encode};
use crc::Crc;

// Q-subchannel CRC per Red Book: CCITT polynomial 0x1021, initial value
// 0xFFFF, no bit reflection, output complemented before transmission
const QSUB_CRC: Crc<u16> = Crc::<u16>::new(&crc::CRC_16_GENIBUS);

/// One Q-subchannel payload:
/// `[status][tno][index][min][sec][frame][zero][ap_min][ap_sec][ap_frame][crc]`
///
/// The status byte packs the 4-bit control field into the high nibble and the
/// 4-bit ADR field into the low nibble. All other single-byte fields are
/// [`BcdValue`]s, which expose both the decimal and the raw-byte view of one
/// stored byte; in lead-in entries `index` holds either a BCD track number or
/// one of the 0xA0-0xA2 pointer sentinels, and the `ap_*` fields hold either
/// a real timestamp or a track number / session tag depending on `index`.
///
/// The byte layout produced by [`SubchannelQ::to_bytes`] is the wire contract
/// toward the sector synthesizer; no alternate representation diverges from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode)]
pub struct SubchannelQ {
    pub status: u8,
    pub tno: BcdValue,
    pub index: BcdValue,
    pub min: BcdValue,
    pub sec: BcdValue,
    pub frame: BcdValue,
    pub zero: u8,
    pub ap_min: BcdValue,
    pub ap_sec: BcdValue,
    pub ap_frame: BcdValue,
    pub crc: u16,
}

impl SubchannelQ {
    /// Pack the status byte from a 4-bit ADR (Q data format) and a 4-bit
    /// control field.
    pub fn set_status(&mut self, adr: u8, control: u8) {
        self.status = ((control & 0x0F) << 4) | (adr & 0x0F);
    }

    #[must_use]
    pub fn adr(self) -> u8 {
        self.status & 0x0F
    }

    #[must_use]
    pub fn control(self) -> u8 {
        self.status >> 4
    }

    /// Set the absolute pointer timestamp fields from an absolute sector
    /// address in one call.
    ///
    /// # Panics
    ///
    /// Panics if `address` is past the end of a 99:59:74 disc.
    pub fn set_ap_timestamp(&mut self, address: u32) {
        let (min, sec, frame) = CdTime::from_sector_number(address).to_bcd();
        self.ap_min = min;
        self.ap_sec = sec;
        self.ap_frame = frame;
    }

    /// Absolute pointer timestamp as a sector address, if the `ap_*` fields
    /// currently hold a valid BCD timestamp.
    #[must_use]
    pub fn ap_timestamp(self) -> Option<u32> {
        let minutes = self.ap_min.to_decimal().ok()?;
        let seconds = self.ap_sec.to_decimal().ok()?;
        let frames = self.ap_frame.to_decimal().ok()?;
        Some(CdTime::new_checked(minutes, seconds, frames)?.to_sector_number())
    }

    /// Set the relative (track-local) timestamp fields.
    pub fn set_relative_timestamp(&mut self, time: CdTime) {
        let (min, sec, frame) = time.to_bcd();
        self.min = min;
        self.sec = sec;
        self.frame = frame;
    }

    /// Compute the CRC over bytes [0..9] and store it into the CRC field.
    ///
    /// The CRC is only computed here, never on individual field writes, so
    /// repeated mutation while building an entry is cheap and the stored CRC
    /// reflects the state at the last `finalize` call.
    pub fn finalize(&mut self) {
        self.crc = QSUB_CRC.checksum(&self.to_bytes()[..10]);
    }

    /// Serialize to the canonical 12-byte wire layout, CRC big-endian.
    #[must_use]
    pub fn to_bytes(self) -> [u8; SUBCHANNEL_Q_LEN] {
        let [crc_hi, crc_lo] = self.crc.to_be_bytes();
        [
            self.status,
            self.tno.to_byte(),
            self.index.to_byte(),
            self.min.to_byte(),
            self.sec.to_byte(),
            self.frame.to_byte(),
            self.zero,
            self.ap_min.to_byte(),
            self.ap_sec.to_byte(),
            self.ap_frame.to_byte(),
            crc_hi,
            crc_lo,
        ]
    }
}

/// One Q-subchannel payload positioned within an ordered lead-in sequence.
/// Entries have no identity beyond their position in the owning list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode)]
pub struct RawTocEntry {
    pub q: SubchannelQ,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc_check_value() {
        // Standard check input for CRC-16/GENIBUS
        assert_eq!(QSUB_CRC.checksum(b"123456789"), 0xD64E);
    }

    #[test]
    fn finalize_matches_reference_vector() {
        // First-track pointer entry for track 1, CD-ROM/CD-DA session
        let mut sq = SubchannelQ::default();
        sq.set_status(1, 0);
        sq.index = BcdValue::from_byte(0xA0);
        sq.ap_min = BcdValue::from_decimal(1).unwrap();
        sq.finalize();

        assert_eq!(sq.crc, 0xC05A);
        assert_eq!(
            sq.to_bytes(),
            [0x01, 0x00, 0xA0, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0xC0, 0x5A]
        );
    }

    #[test]
    fn finalize_reflects_final_state_only() {
        let mut sq = SubchannelQ::default();
        sq.set_status(1, 0);
        sq.index = BcdValue::from_byte(0xA2);
        sq.set_ap_timestamp(280000);
        sq.finalize();
        let first_crc = sq.crc;

        sq.set_ap_timestamp(150);
        assert_eq!(sq.crc, first_crc);

        sq.finalize();
        assert_ne!(sq.crc, first_crc);
    }

    #[test]
    fn status_packing() {
        let mut sq = SubchannelQ::default();
        sq.set_status(1, 4);
        assert_eq!(sq.status, 0x41);
        assert_eq!(sq.adr(), 1);
        assert_eq!(sq.control(), 4);
    }

    #[test]
    fn ap_timestamp_round_trips() {
        let mut sq = SubchannelQ::default();
        sq.set_ap_timestamp(280000);
        assert_eq!(sq.ap_min.to_byte(), 0x62);
        assert_eq!(sq.ap_sec.to_byte(), 0x13);
        assert_eq!(sq.ap_frame.to_byte(), 0x25);
        assert_eq!(sq.ap_timestamp(), Some(280000));
    }

    #[test]
    fn ap_timestamp_none_for_non_bcd_fields() {
        let mut sq = SubchannelQ::default();
        sq.ap_sec = BcdValue::from_byte(0x7A);
        assert_eq!(sq.ap_timestamp(), None);
    }
}
