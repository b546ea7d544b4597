use crate::catalog::Catalog;
use crate::error::{SchedForgeError, SfResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One activity's (room, time, facilitator) triple, as catalog indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub room: u16,
    pub time: u16,
    pub facilitator: u16,
}

/// A complete candidate schedule: `slots[i]` is the assignment of
/// `catalog.activities[i]`. Fixed shape, every activity exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub slots: Vec<Assignment>,
}

pub type Population = Vec<Schedule>;

/// Name-based assignment form used at the JSON boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedAssignment {
    pub room: String,
    pub time: String,
    pub facilitator: String,
}

impl Schedule {
    pub fn is_valid(&self, catalog: &Catalog) -> bool {
        if self.slots.len() != catalog.activities.len() {
            return false;
        }
        self.slots.iter().all(|a| {
            (a.room as usize) < catalog.rooms.len()
                && (a.time as usize) < catalog.time_slots.len()
                && (a.facilitator as usize) < catalog.facilitators.len()
        })
    }

    /// Resolves a name-keyed schedule against the catalog. Every activity in
    /// the catalog must appear exactly once.
    pub fn from_named(
        named: &BTreeMap<String, NamedAssignment>,
        catalog: &Catalog,
    ) -> SfResult<Self> {
        if named.len() != catalog.activities.len() {
            return Err(SchedForgeError::Validation(format!(
                "schedule covers {} activities, catalog has {}",
                named.len(),
                catalog.activities.len()
            )));
        }
        let mut slots = Vec::with_capacity(catalog.activities.len());
        for activity in &catalog.activities {
            let entry = named.get(&activity.name).ok_or_else(|| {
                SchedForgeError::Validation(format!("activity '{}' missing", activity.name))
            })?;
            let room = catalog.room_index(&entry.room).ok_or_else(|| {
                SchedForgeError::Validation(format!("unknown room '{}'", entry.room))
            })?;
            let time = catalog.time_index(&entry.time).ok_or_else(|| {
                SchedForgeError::Validation(format!("unknown time slot '{}'", entry.time))
            })?;
            let facilitator = catalog.facilitator_index(&entry.facilitator).ok_or_else(|| {
                SchedForgeError::Validation(format!(
                    "unknown facilitator '{}'",
                    entry.facilitator
                ))
            })?;
            slots.push(Assignment {
                room,
                time,
                facilitator,
            });
        }
        Ok(Schedule { slots })
    }

    /// BTreeMap keeps the export order deterministic.
    pub fn to_named(&self, catalog: &Catalog) -> BTreeMap<String, NamedAssignment> {
        self.slots
            .iter()
            .zip(&catalog.activities)
            .map(|(a, activity)| {
                (
                    activity.name.clone(),
                    NamedAssignment {
                        room: catalog.rooms[a.room as usize].name.clone(),
                        time: catalog.time_slots[a.time as usize].clone(),
                        facilitator: catalog.facilitators[a.facilitator as usize].name.clone(),
                    },
                )
            })
            .collect()
    }
}
