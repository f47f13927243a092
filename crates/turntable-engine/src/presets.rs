//! Preset timeline tables and the triggers bound to them.
//!
//! Two revisions of the preset table exist and disagree on the direction of
//! `FULL_CAPTURE` and on whether a `360` preset is offered. Both ship here;
//! configuration picks one.

use crate::timeline::{MotionParams, Segment, Timeline};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const FULL_CAPTURE: &str = "FULL_CAPTURE";
pub const PIVOT: &str = "PIVOT";
pub const FULL_TURN: &str = "360";
pub const NOTHING: &str = "NOTHING";

/// Which revision of the built-in preset table to start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PresetRevision {
    /// Counter-clockwise capture start, includes `360`.
    #[default]
    Current,
    /// Clockwise capture start, no `360`.
    Legacy,
}

impl std::fmt::Display for PresetRevision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

impl std::str::FromStr for PresetRevision {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "current" => Ok(Self::Current),
            "legacy" => Ok(Self::Legacy),
            other => Err(PresetError::UnknownRevision(other.to_string())),
        }
    }
}

/// An ordered mapping from preset name to timeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetTable {
    entries: Vec<(String, Timeline)>,
}

impl PresetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the built-in table for a revision.
    pub fn for_revision(revision: PresetRevision) -> Self {
        let mut table = Self::new();
        match revision {
            PresetRevision::Current => {
                table.insert(
                    FULL_CAPTURE,
                    Timeline::new(vec![
                        Segment::new(0.0, 10.0, MotionParams::rotate(-45.0)),
                        Segment::new(2.0, 96.0, MotionParams::rotate(740.0)),
                    ]),
                );
                table.insert(PIVOT, pivot());
                table.insert(
                    FULL_TURN,
                    Timeline::new(vec![Segment::new(0.0, 51.0, MotionParams::rotate(-392.0))]),
                );
            }
            PresetRevision::Legacy => {
                table.insert(
                    FULL_CAPTURE,
                    Timeline::new(vec![
                        Segment::new(0.0, 10.0, MotionParams::rotate(45.0)),
                        Segment::new(2.0, 96.0, MotionParams::rotate(-740.0)),
                    ]),
                );
                table.insert(PIVOT, pivot());
            }
        }
        table.insert(NOTHING, Timeline::empty());
        table
    }

    /// Insert a preset. An existing name keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, timeline: Timeline) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = timeline;
        } else {
            self.entries.push((name, timeline));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Timeline> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, timeline)| timeline)
    }

    /// Look up a preset, failing with the missing name.
    pub fn require(&self, name: &str) -> Result<&Timeline, PresetError> {
        self.get(name)
            .ok_or_else(|| PresetError::Unknown(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Timeline)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PresetTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, timeline) in &self.entries {
            map.serialize_entry(name, timeline)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PresetTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = PresetTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of preset names to timelines")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = PresetTable::new();
                while let Some((name, timeline)) = access.next_entry::<String, Timeline>()? {
                    table.insert(name, timeline);
                }
                Ok(table)
            }
        }

        // Entries keep document order.
        deserializer.deserialize_map(TableVisitor)
    }
}

fn pivot() -> Timeline {
    Timeline::new(vec![Segment::new(0.0, 30.0, MotionParams::rotate(-90.0))])
}

/// An operator-facing action bound to a preset name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Button label.
    pub label: String,
    /// Name of the preset sent when activated.
    pub preset: String,
}

impl Trigger {
    pub fn new(label: impl Into<String>, preset: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            preset: preset.into(),
        }
    }

    /// The four triggers of the dispatcher. `Action Shot` and `Front Arc`
    /// both send the empty timeline.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Full Capture", FULL_CAPTURE),
            Self::new("Pivot", PIVOT),
            Self::new("Action Shot", NOTHING),
            Self::new("Front Arc", NOTHING),
        ]
    }
}

/// Resolve the timeline a trigger sends.
pub fn resolve_trigger<'a>(
    table: &'a PresetTable,
    trigger: &Trigger,
) -> Result<&'a Timeline, PresetError> {
    table.require(&trigger.preset)
}

/// Errors from preset lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresetError {
    /// No preset with this name.
    #[error("Unknown preset: {0}")]
    Unknown(String),

    /// Unrecognized revision name.
    #[error("Unknown preset revision: {0} (expected \"current\" or \"legacy\")")]
    UnknownRevision(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_current_revision_names() {
        let table = PresetTable::for_revision(PresetRevision::Current);
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["FULL_CAPTURE", "PIVOT", "360", "NOTHING"]);
    }

    #[test]
    fn test_legacy_revision_has_no_full_turn() {
        let table = PresetTable::for_revision(PresetRevision::Legacy);
        assert!(table.get(FULL_TURN).is_none());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_revisions_disagree_on_capture_direction() {
        let current = PresetTable::for_revision(PresetRevision::Current);
        let legacy = PresetTable::for_revision(PresetRevision::Legacy);
        let current_first = current.get(FULL_CAPTURE).unwrap().segments()[0];
        let legacy_first = legacy.get(FULL_CAPTURE).unwrap().segments()[0];
        assert!((current_first.params.rotate + legacy_first.params.rotate).abs() < f64::EPSILON);
        assert!((current_first.params.rotate - -45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pivot_body() {
        let table = PresetTable::for_revision(PresetRevision::Current);
        assert_eq!(
            table.get(PIVOT).unwrap().to_json(),
            json!([{
                "delay": 0,
                "duration": 30,
                "params": {
                    "rotate": -90,
                    "easeIn": { "duration": 2, "level": 1 },
                    "easeOut": { "duration": 2, "level": 1 }
                }
            }])
        );
    }

    #[test]
    fn test_nothing_is_empty() {
        let table = PresetTable::for_revision(PresetRevision::Legacy);
        assert!(table.get(NOTHING).unwrap().is_empty());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut table = PresetTable::for_revision(PresetRevision::Current);
        table.insert(PIVOT, Timeline::empty());
        table.insert("SPIN", Timeline::empty());
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["FULL_CAPTURE", "PIVOT", "360", "NOTHING", "SPIN"]);
        assert!(table.get(PIVOT).unwrap().is_empty());
    }

    #[test]
    fn test_default_triggers_resolve() {
        let table = PresetTable::for_revision(PresetRevision::Current);
        let triggers = Trigger::defaults();
        assert_eq!(triggers.len(), 4);
        for trigger in &triggers {
            assert!(resolve_trigger(&table, trigger).is_ok());
        }
        assert_eq!(triggers[2].preset, triggers[3].preset);
    }

    #[test]
    fn test_unknown_trigger() {
        let table = PresetTable::new();
        let err = resolve_trigger(&table, &Trigger::new("Spin", "SPIN")).unwrap_err();
        assert_eq!(err, PresetError::Unknown("SPIN".into()));
        assert_eq!(err.to_string(), "Unknown preset: SPIN");
    }

    #[test]
    fn test_revision_from_str() {
        assert_eq!("Legacy".parse::<PresetRevision>().unwrap(), PresetRevision::Legacy);
        assert!("newest".parse::<PresetRevision>().is_err());
    }

    #[test]
    fn test_table_serializes_in_order() {
        let table = PresetTable::for_revision(PresetRevision::Legacy);
        let text = serde_json::to_string(&table).unwrap();
        let capture = text.find("FULL_CAPTURE").unwrap();
        let pivot = text.find("PIVOT").unwrap();
        let nothing = text.find("NOTHING").unwrap();
        assert!(capture < pivot && pivot < nothing);
        assert!(text.ends_with("\"NOTHING\":[]}"));
    }
}
