//! Audio payload entities.
//!
//! [`AudioSource`] is the single immutable clip that flows through the
//! pipeline — either assembled by the [`Recorder`](crate::audio::Recorder)
//! from capture fragments or supplied directly by an upload.
//! [`AudioFragment`] is one buffer of raw bytes as delivered by the capture
//! capability's callback.

// ---------------------------------------------------------------------------
// AudioFragment
// ---------------------------------------------------------------------------

/// A single buffer of encoded audio as delivered by the capture capability.
///
/// Fragments are opaque to the pipeline — they are concatenated in arrival
/// order into one [`AudioSource`] when recording stops.
#[derive(Debug, Clone)]
pub struct AudioFragment {
    /// Raw encoded bytes for this fragment.
    pub bytes: Vec<u8>,
}

impl AudioFragment {
    /// Wrap raw bytes in a fragment.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

// ---------------------------------------------------------------------------
// AudioSource
// ---------------------------------------------------------------------------

/// One captured or uploaded audio clip: a byte payload plus its declared
/// media type.
///
/// Immutable once created — there are no mutating accessors. Exactly one
/// `AudioSource` is active per pipeline run; starting a new recording or
/// ingesting a new upload replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSource {
    bytes: Vec<u8>,
    media_type: String,
}

impl AudioSource {
    /// Create a source from a finished payload.
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type: media_type.into(),
        }
    }

    /// Assemble a source by concatenating capture fragments in order.
    pub fn from_fragments(fragments: Vec<AudioFragment>, media_type: impl Into<String>) -> Self {
        let total: usize = fragments.iter().map(|f| f.bytes.len()).sum();
        let mut bytes = Vec::with_capacity(total);
        for fragment in fragments {
            bytes.extend_from_slice(&fragment.bytes);
        }
        Self::new(bytes, media_type)
    }

    /// The raw encoded payload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The declared media type (e.g. `"audio/webm"`, `"audio/wav"`).
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` when the payload is empty (a stopped recording that captured
    /// no fragments still produces a valid, empty source).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Media-type validation
// ---------------------------------------------------------------------------

/// Returns `true` when `media_type` declares an audio payload.
///
/// The check is an ASCII case-insensitive match on the `audio/` top-level
/// type, ignoring surrounding whitespace. Parameters after the subtype
/// (`audio/webm;codecs=opus`) are accepted.
pub fn is_audio_media_type(media_type: &str) -> bool {
    const PREFIX: &[u8] = b"audio/";
    // Compare on bytes — slicing the &str could land inside a multi-byte
    // character in a caller-supplied type.
    let trimmed = media_type.trim().as_bytes();
    trimmed.len() > PREFIX.len()
        && trimmed
            .get(..PREFIX.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(PREFIX))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
