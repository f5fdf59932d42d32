//! Event context — an [`Event`] plus what is known about how it happened.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Event;

/// Default intensity hint when the sensor did not report one.
pub const DEFAULT_EVENT_INTENSITY: f64 = 0.5;

/// Additional information about an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventContext {
    /// What happened.
    pub event: Event,
    /// How strong, loud or fast it was (0.0 to 1.0).
    pub intensity: f64,
    /// Where it came from, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Free-form extra details.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl EventContext {
    /// Create a context with the default intensity and no source.
    #[must_use]
    pub fn new(event: Event) -> Self {
        Self {
            event,
            intensity: DEFAULT_EVENT_INTENSITY,
            source: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Set the intensity hint, clamped into `[0.0, 1.0]`.
    #[must_use]
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = if intensity.is_nan() {
            DEFAULT_EVENT_INTENSITY
        } else {
            intensity.clamp(0.0, 1.0)
        };
        self
    }

    /// Set the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach one metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl From<Event> for EventContext {
    fn from(event: Event) -> Self {
        Self::new(event)
    }
}
