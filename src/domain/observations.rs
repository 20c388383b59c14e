//! Typed observations extracted from upstream payloads.
//!
//! Parsing never fails on a bad field or entry: those become
//! [`SchemaWarning`]s and the remaining data is still returned. Only a wrong
//! top-level shape is an error.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Services reported by the status endpoint
pub const KNOWN_SERVICES: [&str; 2] = ["character_service", "event_service"];

/// Recoverable schema problem found in a payload
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaWarning {
    MissingField { field: &'static str, payload: String },
    NonNumericField { field: &'static str, value: String },
    InvalidWorldState { entry: String },
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field, payload } => write!(f, "Missing {}: {}", field, payload),
            Self::NonNumericField { field, value } => {
                write!(f, "Non-numeric {}: {}", field, value)
            }
            Self::InvalidWorldState { entry } => write!(f, "Invalid world state info: {}", entry),
        }
    }
}

/// Top-level payload shape did not match what the endpoint should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMismatch {
    pub expected: &'static str,
    pub found: &'static str,
}

/// Values parsed from a payload together with the warnings raised on the way
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<SchemaWarning>,
}

pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Numeric metric value: a JSON number or a string holding one
pub fn metric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Up/down state of one service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceStatus {
    pub service: &'static str,
    pub up: bool,
}

impl ServiceStatus {
    /// One status per known service. Only a literal `true` counts as up;
    /// a missing field, `false`, or a non-object payload all read as down.
    pub fn from_payload(payload: &Value) -> Vec<Self> {
        KNOWN_SERVICES
            .iter()
            .map(|&service| Self {
                service,
                up: matches!(payload.get(service), Some(Value::Bool(true))),
            })
            .collect()
    }

    pub fn value(&self) -> f64 {
        if self.up { 1.0 } else { 0.0 }
    }
}

/// Fields of the live-event payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveEventField {
    Sno,
    StartTime,
    EndTime,
}

impl LiveEventField {
    pub const ALL: [Self; 3] = [Self::Sno, Self::StartTime, Self::EndTime];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Sno => "liveEventSno",
            Self::StartTime => "liveEventStartTime",
            Self::EndTime => "liveEventEndTime",
        }
    }
}

/// Current live event. Each field is independent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LiveEventWindow {
    pub sno: Option<f64>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
}

impl LiveEventWindow {
    pub fn get(&self, field: LiveEventField) -> Option<f64> {
        match field {
            LiveEventField::Sno => self.sno,
            LiveEventField::StartTime => self.start_time,
            LiveEventField::EndTime => self.end_time,
        }
    }

    fn slot(&mut self, field: LiveEventField) -> &mut Option<f64> {
        match field {
            LiveEventField::Sno => &mut self.sno,
            LiveEventField::StartTime => &mut self.start_time,
            LiveEventField::EndTime => &mut self.end_time,
        }
    }

    pub fn from_payload(payload: &Value) -> Result<Parsed<Self>, ShapeMismatch> {
        let object = payload.as_object().ok_or(ShapeMismatch {
            expected: "object",
            found: json_kind(payload),
        })?;

        let mut window = Self::default();
        let mut warnings = Vec::new();
        for field in LiveEventField::ALL {
            match object.get(field.key()) {
                None => warnings.push(SchemaWarning::MissingField {
                    field: field.key(),
                    payload: payload.to_string(),
                }),
                Some(raw) => match metric_value(raw) {
                    Some(v) => *window.slot(field) = Some(v),
                    None => warnings.push(SchemaWarning::NonNumericField {
                        field: field.key(),
                        value: raw.to_string(),
                    }),
                },
            }
        }

        Ok(Parsed {
            value: window,
            warnings,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawWorldState {
    #[serde(rename = "worldState")]
    world_state: String,
    #[serde(rename = "nValue")]
    n_value: Value,
}

/// Value of one world state
#[derive(Debug, Clone, PartialEq)]
pub struct WorldStateValue {
    pub world_state: String,
    pub value: f64,
}

impl WorldStateValue {
    /// `null` is an empty list. Entries without a string `worldState` and a
    /// numeric `nValue` are skipped with a warning.
    pub fn from_payload(payload: &Value) -> Result<Parsed<Vec<Self>>, ShapeMismatch> {
        let entries: &[Value] = match payload {
            Value::Null => &[],
            Value::Array(entries) => entries,
            other => {
                return Err(ShapeMismatch {
                    expected: "array",
                    found: json_kind(other),
                });
            }
        };

        let mut values = Vec::with_capacity(entries.len());
        let mut warnings = Vec::new();
        for entry in entries {
            let parsed = RawWorldState::deserialize(entry)
                .ok()
                .and_then(|raw| {
                    metric_value(&raw.n_value).map(|value| Self {
                        world_state: raw.world_state,
                        value,
                    })
                });
            match parsed {
                Some(v) => values.push(v),
                None => warnings.push(SchemaWarning::InvalidWorldState {
                    entry: entry.to_string(),
                }),
            }
        }

        Ok(Parsed {
            value: values,
            warnings,
        })
    }
}
