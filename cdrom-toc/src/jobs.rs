//! Synthesis jobs that build up the lead-in TOC entry list
//!
//! Each job is an immutable parameter bundle with a single apply-to-list
//! operation. The orchestrating pipeline runs a sequence of jobs against one
//! accumulating entry list, then hands the finished list to the sector
//! synthesis stage. A job either fully succeeds or leaves the list untouched,
//! and the final layout is determined by each job's documented insertion
//! policy rather than by the order jobs were run in.

use crate::bcd::BcdValue;
use crate::cdtime::CdTime;
use crate::layout::{SessionFormat, TrackPointer};
use crate::subq::{RawTocEntry, SubchannelQ};
use crate::{TocError, TocResult, POINT_FIRST_TRACK, POINT_LAST_TRACK, POINT_LEAD_OUT};

// ADR (Q mode) is always 1 for lead-in TOC entries
const ADR_TOC: u8 = 1;

// Pointer entries carry no usable control field in this version
const CONTROL_UNSPECIFIED: u8 = 0;

pub trait TocSynthJob {
    /// Apply this job to the given entry list.
    ///
    /// Jobs are not idempotent: running the same job twice inserts its entries
    /// twice rather than upserting.
    ///
    /// # Errors
    ///
    /// On error the list is byte-for-byte unchanged.
    fn run(&self, entries: &mut Vec<RawTocEntry>) -> TocResult<()>;
}

/// Synthesizes the three pointer entries every lead-in TOC must contain:
/// first recorded track (A0), last recorded track (A1), and lead-out start
/// (A2).
///
/// Reusable by any image format that can supply the track number range, the
/// session format, and the lead-out address.
#[derive(Debug, Clone)]
pub struct LeadInPointersJob {
    first_track: u8,
    last_track: u8,
    session_format: SessionFormat,
    leadout_address: u32,
}

impl LeadInPointersJob {
    /// # Errors
    ///
    /// Returns [`TocError::InconsistentLayout`] unless
    /// `1 <= first_track <= last_track <= 99` and `leadout_address` is on the
    /// disc. A malformed range must fail here rather than synthesize a TOC
    /// that corrupts downstream indexing.
    pub fn new(
        first_track: u8,
        last_track: u8,
        session_format: SessionFormat,
        leadout_address: u32,
    ) -> TocResult<Self> {
        if !(1..=99).contains(&first_track) {
            return Err(TocError::InconsistentLayout(format!(
                "first track number must be in 1-99, got {first_track}"
            )));
        }
        if !(first_track..=99).contains(&last_track) {
            return Err(TocError::InconsistentLayout(format!(
                "last track number must be in {first_track}-99, got {last_track}"
            )));
        }
        if leadout_address >= CdTime::MAX_SECTORS {
            return Err(TocError::InconsistentLayout(format!(
                "lead-out address {leadout_address} is past the end of the disc"
            )));
        }

        Ok(Self { first_track, last_track, session_format, leadout_address })
    }
}

impl TocSynthJob for LeadInPointersJob {
    /// Inserts exactly `[A0, A1, A2]` at the front of the list; pre-existing
    /// entries are shifted after them in their original relative order.
    ///
    /// # Errors
    ///
    /// Returns [`TocError::InvalidSessionFormat`] if the session format is
    /// [`SessionFormat::None`]; the list is untouched on failure.
    fn run(&self, entries: &mut Vec<RawTocEntry>) -> TocResult<()> {
        let session_tag = self.session_format.a0_session_tag()?;

        let mut sq = SubchannelQ::default();
        sq.set_status(ADR_TOC, CONTROL_UNSPECIFIED);

        // A0: first recorded track number, with the session format tag in the
        // ap_sec field. The tag is a literal byte, so it bypasses the decimal
        // view of the field.
        sq.index = BcdValue::from_byte(POINT_FIRST_TRACK);
        sq.ap_min = BcdValue::from_decimal(self.first_track)?;
        sq.ap_sec = BcdValue::from_byte(session_tag);
        sq.ap_frame = BcdValue::ZERO;
        sq.finalize();
        let a0 = RawTocEntry { q: sq };

        // A1: last recorded track number
        sq.index = BcdValue::from_byte(POINT_LAST_TRACK);
        sq.ap_min = BcdValue::from_decimal(self.last_track)?;
        sq.ap_sec = BcdValue::ZERO;
        sq.ap_frame = BcdValue::ZERO;
        sq.finalize();
        let a1 = RawTocEntry { q: sq };

        // A2: lead-out start timestamp
        sq.index = BcdValue::from_byte(POINT_LEAD_OUT);
        sq.set_ap_timestamp(self.leadout_address);
        sq.finalize();
        let a2 = RawTocEntry { q: sq };

        log::trace!(
            "Synthesized lead-in pointers: tracks {}-{}, lead-out at {}",
            self.first_track,
            self.last_track,
            CdTime::from_sector_number(self.leadout_address)
        );

        // Pointer entries always go at the front, ahead of whatever other
        // jobs have already inserted
        entries.splice(0..0, [a0, a1, a2]);

        Ok(())
    }
}

/// Synthesizes one lead-in entry per track, carrying the track's start
/// timestamp and control field.
#[derive(Debug, Clone)]
pub struct TrackPointersJob {
    tracks: Vec<TrackPointer>,
}

impl TrackPointersJob {
    /// # Errors
    ///
    /// Returns [`TocError::InconsistentLayout`] if the track list is empty,
    /// track numbers are not strictly increasing within 1-99, or any start
    /// address is past the end of the disc.
    pub fn new(tracks: Vec<TrackPointer>) -> TocResult<Self> {
        if tracks.is_empty() {
            return Err(TocError::InconsistentLayout("track list must not be empty".into()));
        }

        let mut last_number = 0;
        for track in &tracks {
            if !(1..=99).contains(&track.number) {
                return Err(TocError::InconsistentLayout(format!(
                    "track number must be in 1-99, got {}",
                    track.number
                )));
            }
            if track.number <= last_number {
                return Err(TocError::InconsistentLayout(format!(
                    "track numbers must be strictly increasing: {} follows {last_number}",
                    track.number
                )));
            }
            if track.start_address >= CdTime::MAX_SECTORS {
                return Err(TocError::InconsistentLayout(format!(
                    "track {} start address {} is past the end of the disc",
                    track.number, track.start_address
                )));
            }
            last_number = track.number;
        }

        Ok(Self { tracks })
    }
}

impl TocSynthJob for TrackPointersJob {
    /// Appends one entry per track at the end of the list, in track order.
    fn run(&self, entries: &mut Vec<RawTocEntry>) -> TocResult<()> {
        let mut synthesized = Vec::with_capacity(self.tracks.len());
        for track in &self.tracks {
            let mut sq = SubchannelQ::default();
            sq.set_status(ADR_TOC, track.track_type.control_nibble());
            sq.index = BcdValue::from_decimal(track.number)?;
            sq.set_ap_timestamp(track.start_address);
            sq.finalize();
            synthesized.push(RawTocEntry { q: sq });
        }

        log::trace!(
            "Synthesized {} track pointer entries for tracks {}-{}",
            self.tracks.len(),
            self.tracks[0].number,
            self.tracks[self.tracks.len() - 1].number
        );

        entries.extend(synthesized);

        Ok(())
    }
}
