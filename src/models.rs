use crate::countdown::Countdown;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_EVENT_NAME: &str = "Midsummer Eve";
pub const DEFAULT_EVENT_DATE: &str = "2026-06-21";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    pub name: String,
    pub date: String,
}

impl Default for EventData {
    fn default() -> Self {
        Self {
            name: DEFAULT_EVENT_NAME.to_string(),
            date: DEFAULT_EVENT_DATE.to_string(),
        }
    }
}

/// String-keyed, string-valued document persisted to disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageData {
    #[serde(default)]
    pub items: BTreeMap<String, String>,
}

/// Either field may be omitted; the other keeps its current value.
#[derive(Debug, Default, Deserialize)]
pub struct EventUpdate {
    pub name: Option<String>,
    pub date: Option<String>,
}

impl EventUpdate {
    pub fn apply(self, current: &EventData) -> EventData {
        EventData {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            date: self.date.unwrap_or_else(|| current.date.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownResponse {
    pub name: String,
    pub date: String,
    pub title: String,
    pub countdown: Option<Countdown>,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct FitRequest {
    pub text: String,
    pub client_width: f64,
    #[serde(default)]
    pub padding_left: f64,
    #[serde(default)]
    pub padding_right: f64,
}
