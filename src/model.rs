use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// One entry of the server's activity map, with its key folded in as `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl Activity {
    /// Capacity minus roster size. Negative when the server overfills an activity.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

#[derive(Debug, Deserialize)]
struct Details {
    description: String,
    schedule: String,
    max_participants: u32,
    participants: Vec<String>,
}

impl Details {
    fn named(self, name: String) -> Activity {
        Activity {
            name,
            description: self.description,
            schedule: self.schedule,
            max_participants: self.max_participants,
            participants: self.participants,
        }
    }
}

/// Activities in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityMap(Vec<Activity>);

impl ActivityMap {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Activity> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|a| a.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.0.iter().find(|a| a.name == name)
    }
}

impl<'de> Deserialize<'de> for ActivityMap {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ActivityMapVisitor)
    }
}

struct ActivityMapVisitor;

impl<'de> Visitor<'de> for ActivityMapVisitor {
    type Value = ActivityMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object keyed by activity name")
    }

    fn visit_map<A>(self, mut access: A) -> core::result::Result<ActivityMap, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut activities: Vec<Activity> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, details)) = access.next_entry::<String, Details>()? {
            let activity = details.named(name);
            // A repeated key keeps its first position but takes the later value.
            match activities.iter_mut().find(|a| a.name == activity.name) {
                Some(slot) => *slot = activity,
                None => activities.push(activity),
            }
        }
        Ok(ActivityMap(activities))
    }
}
