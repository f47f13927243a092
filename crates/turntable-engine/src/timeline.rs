//! Timeline data model.
//!
//! A timeline is an ordered list of segments sent verbatim to the turntable
//! service. The service decides how `delay`, `duration`, `rotate` and the
//! easing records are played back; this module only carries the structure.

use serde::{Deserialize, Serialize, Serializer};

/// Easing applied at the start or end of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ease {
    /// Length of the easing ramp.
    #[serde(serialize_with = "serialize_number")]
    pub duration: f64,
    /// Curve order / intensity.
    #[serde(serialize_with = "serialize_number")]
    pub level: f64,
}

impl Ease {
    pub const fn new(duration: f64, level: f64) -> Self {
        Self { duration, level }
    }

    /// The two-second, first-order ramp used by every shipped preset.
    pub const fn standard() -> Self {
        Self::new(2.0, 1.0)
    }
}

impl Default for Ease {
    fn default() -> Self {
        Self::standard()
    }
}

/// Motion parameters of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionParams {
    /// Signed angle in degrees. Negative and positive values turn in
    /// opposite directions.
    #[serde(serialize_with = "serialize_number")]
    pub rotate: f64,
    pub ease_in: Ease,
    pub ease_out: Ease,
}

impl MotionParams {
    pub const fn new(rotate: f64, ease_in: Ease, ease_out: Ease) -> Self {
        Self {
            rotate,
            ease_in,
            ease_out,
        }
    }

    /// A rotation with standard easing on both ends.
    pub const fn rotate(rotate: f64) -> Self {
        Self::new(rotate, Ease::standard(), Ease::standard())
    }
}

/// One timed motion instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Wait before this segment starts.
    #[serde(serialize_with = "serialize_number")]
    pub delay: f64,
    /// Length of the segment.
    #[serde(serialize_with = "serialize_number")]
    pub duration: f64,
    pub params: MotionParams,
}

impl Segment {
    pub const fn new(delay: f64, duration: f64, params: MotionParams) -> Self {
        Self {
            delay,
            duration,
            params,
        }
    }

    /// Time from the start of the segment's delay to the end of its motion.
    pub fn span(&self) -> f64 {
        self.delay + self.duration
    }
}

/// An ordered sequence of segments.
///
/// Serializes as a bare JSON array. An empty timeline is valid and is sent
/// as `[]`, which the service treats as a no-op.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline(Vec<Segment>);

impl Timeline {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.0.iter()
    }

    /// Sum of `delay + duration` over all segments.
    pub fn total_duration(&self) -> f64 {
        self.0.iter().map(Segment::span).sum()
    }

    /// Convert to a JSON value suitable for a request body.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.0.iter().map(segment_to_json).collect())
    }
}

impl From<Vec<Segment>> for Timeline {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn segment_to_json(segment: &Segment) -> serde_json::Value {
    // Serialization of plain structs into a Value cannot fail.
    serde_json::to_value(segment).unwrap_or(serde_json::Value::Null)
}

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Write integral numbers without a fractional part so bodies match the
/// hand-written tables (`0`, not `0.0`).
#[allow(clippy::trivially_copy_pass_by_ref, clippy::cast_possible_truncation)]
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
