//! Abstract session/track metadata handed over by the image format parsers

use crate::{TocError, TocResult};
use bincode::{Decode, Encode};

/// Disc data format of a session, as recorded in the A0 pointer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum SessionFormat {
    /// CD-ROM or CD-DA (Red Book / Yellow Book)
    CdRomCdda,
    /// CD-Interactive (Green Book)
    Cdi,
    /// CD-ROM XA
    CdXa,
    /// Format could not be determined from the source image
    None,
}

impl SessionFormat {
    /// The tag byte stored in the A0 entry's `ap_sec` field.
    ///
    /// These are literal byte values (0x10, 0x20), not BCD encodings of a
    /// decimal, and must be written through the raw-byte view of the field.
    ///
    /// # Errors
    ///
    /// Returns [`TocError::InvalidSessionFormat`] for [`SessionFormat::None`],
    /// which is never valid for synthesis.
    pub fn a0_session_tag(self) -> TocResult<u8> {
        match self {
            Self::CdRomCdda => Ok(0x00),
            Self::Cdi => Ok(0x10),
            Self::CdXa => Ok(0x20),
            Self::None => Err(TocError::InvalidSessionFormat),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub enum TrackType {
    Data,
    Audio,
}

impl TrackType {
    /// Control nibble for this track's lead-in entry; data tracks set the
    /// "data track" control bit.
    #[must_use]
    pub fn control_nibble(self) -> u8 {
        match self {
            Self::Data => 0x4,
            Self::Audio => 0x0,
        }
    }
}

/// Per-track input to track-pointer synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct TrackPointer {
    pub number: u8,
    pub track_type: TrackType,
    /// Absolute sector address of the track's index 1
    pub start_address: u32,
}
