/// Validated node labels and the deterministic label allocator.
///
/// A [`Label`] is the sole identity of a node in a sketch: short,
/// human-readable, and totally ordered. The lexical ordering of labels is
/// load-bearing — the cycle detector anchors its DFS at the smallest label of
/// each cycle and canonicalises reported cycles by this ordering, so `Ord`
/// here must stay derived from the inner string.
///
/// [`LabelAllocator`] hands out the fixed sequence `A, B, … Z` for nodes
/// created without an explicit label. The sequence only ever advances; a
/// label freed by node deletion is never handed out again. Running past `Z`
/// is a signalled failure ([`LabelError::SpaceExhausted`]), not a silent
/// wraparound.
use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced by label construction and allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The string did not match the expected label shape.
    InvalidFormat {
        /// The input that was rejected.
        got: String,
    },
    /// The allocator ran past the end of the single-letter sequence.
    SpaceExhausted,
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { got } => {
                write!(
                    f,
                    "invalid label: expected 1-8 uppercase ASCII letters, got {got:?}"
                )
            }
            Self::SpaceExhausted => {
                write!(f, "label space exhausted: allocator ran past 'Z'")
            }
        }
    }
}

impl std::error::Error for LabelError {}

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// Matches 1 to 8 uppercase ASCII letters.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{1,8}$").unwrap_or_else(|_| {
        // Never reached: the pattern above is always valid. "a^" never
        // matches anything, so it is a safe fallback that satisfies the
        // workspace ban on unwrap() and expect().
        Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken"))
    })
});

/// A node label: 1-8 uppercase ASCII letters.
///
/// Construct with [`TryFrom<&str>`]; the inner string is immutable once
/// validated. Serde `Deserialize` re-runs validation so malformed labels
/// cannot enter through untrusted JSON.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(String);

impl TryFrom<&str> for Label {
    type Error = LabelError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if LABEL_RE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(LabelError::InvalidFormat { got: s.to_owned() })
        }
    }
}

impl Label {
    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Label {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Self::try_from(s.as_str()).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// LabelAllocator
// ---------------------------------------------------------------------------

/// Deterministic single-letter label sequence `A, B, … Z`.
///
/// The allocator is a dumb counter: it does not know which labels are live.
/// [`crate::sketch::Sketch::add_node`] skips over labels that are currently
/// taken, which advances the sequence — consistent with the rule that the
/// allocator only moves forward and never re-issues a label.
#[derive(Debug, Clone, Default)]
pub struct LabelAllocator {
    /// Offset into the `A..=Z` range; 26 means the sequence is spent.
    next: u8,
}

/// Number of labels in the single-letter sequence.
const SEQUENCE_LEN: u8 = 26;

impl LabelAllocator {
    /// Creates an allocator positioned at `A`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next label in the sequence and advances.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::SpaceExhausted`] once the sequence has run past
    /// `Z`. The allocator stays exhausted; further calls keep failing.
    pub fn next_label(&mut self) -> Result<Label, LabelError> {
        if self.next >= SEQUENCE_LEN {
            return Err(LabelError::SpaceExhausted);
        }
        let letter = char::from(b'A' + self.next);
        self.next += 1;
        Label::try_from(letter.to_string().as_str())
    }

    /// Returns how many labels remain in the sequence.
    pub fn remaining(&self) -> usize {
        usize::from(SEQUENCE_LEN - self.next.min(SEQUENCE_LEN))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
