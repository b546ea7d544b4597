use crate::error::{SchedForgeError, SfResult};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub enrollment: u32,
    #[serde(default)]
    pub preferred: Vec<String>,
    #[serde(default)]
    pub others: Vec<String>,
    #[serde(default)]
    pub needs_lab: bool,
    #[serde(default)]
    pub needs_projector: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub has_lab: bool,
    #[serde(default)]
    pub has_projector: bool,
}

impl Room {
    /// Building is the first token of the room name ("Roman 216" -> "Roman").
    pub fn building(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimePref {
    pub slot: String,
    pub adjust: f32,
}

fn default_underload_floor() -> u32 {
    1
}
fn default_min_load() -> u32 {
    3
}
fn default_max_load() -> u32 {
    4
}

/// A facilitator with per-person load thresholds.
///
/// Loads in `[underload_floor, min_load)` are penalized as underuse,
/// loads above `max_load` as overload. The thresholds live on the
/// facilitator so exceptions are data, not special cases in the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facilitator {
    pub name: String,
    #[serde(default = "default_underload_floor")]
    pub underload_floor: u32,
    #[serde(default = "default_min_load")]
    pub min_load: u32,
    #[serde(default = "default_max_load")]
    pub max_load: u32,
    #[serde(default)]
    pub time_prefs: Vec<TimePref>,
}

impl Facilitator {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            underload_floor: default_underload_floor(),
            min_load: default_min_load(),
            max_load: default_max_load(),
            time_prefs: Vec::new(),
        }
    }
}

/// The immutable problem instance. Loaded once, never mutated by the search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub activities: Vec<Activity>,
    pub rooms: Vec<Room>,
    /// Ordered; the index of a slot is its position for gap arithmetic.
    pub time_slots: Vec<String>,
    pub facilitators: Vec<Facilitator>,
    /// Two sections of the same course that should be spaced apart.
    #[serde(default)]
    pub section_pairs: Vec<[String; 2]>,
    /// Cross-course section pairs with the adjacency bonus/penalty curve.
    #[serde(default)]
    pub cross_pairs: Vec<[String; 2]>,
    /// Buildings where a consecutive-slot pair must not be split across campus.
    #[serde(default)]
    pub split_buildings: Vec<String>,
}

impl Catalog {
    pub fn load_from_file(path: &str) -> SfResult<Self> {
        info!("📂 Loading catalog: {}", path);
        let content = fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Rejects catalogs the random initializer cannot draw from.
    pub fn validate(&self) -> SfResult<()> {
        if self.activities.is_empty() {
            return Err(SchedForgeError::Validation(
                "domain exhausted: catalog has no activities".to_string(),
            ));
        }
        if self.rooms.is_empty() {
            return Err(SchedForgeError::Validation(
                "domain exhausted: catalog has no rooms".to_string(),
            ));
        }
        if self.time_slots.is_empty() {
            return Err(SchedForgeError::Validation(
                "domain exhausted: catalog has no time slots".to_string(),
            ));
        }
        if self.facilitators.is_empty() {
            return Err(SchedForgeError::Validation(
                "domain exhausted: catalog has no facilitators".to_string(),
            ));
        }
        for (i, a) in self.activities.iter().enumerate() {
            if self.activities[..i].iter().any(|b| b.name == a.name) {
                return Err(SchedForgeError::Validation(format!(
                    "duplicate activity name '{}'",
                    a.name
                )));
            }
        }
        Ok(())
    }

    pub fn activity_index(&self, name: &str) -> Option<u16> {
        self.activities
            .iter()
            .position(|a| a.name == name)
            .map(|i| i as u16)
    }

    pub fn room_index(&self, name: &str) -> Option<u16> {
        self.rooms.iter().position(|r| r.name == name).map(|i| i as u16)
    }

    pub fn time_index(&self, name: &str) -> Option<u16> {
        self.time_slots
            .iter()
            .position(|t| t == name)
            .map(|i| i as u16)
    }

    pub fn facilitator_index(&self, name: &str) -> Option<u16> {
        self.facilitators
            .iter()
            .position(|f| f.name == name)
            .map(|i| i as u16)
    }

    /// The built-in SLA course scheduling instance.
    pub fn sla() -> Self {
        fn act(
            name: &str,
            enrollment: u32,
            preferred: &[&str],
            others: &[&str],
            needs_lab: bool,
            needs_projector: bool,
        ) -> Activity {
            Activity {
                name: name.to_string(),
                enrollment,
                preferred: preferred.iter().map(|s| s.to_string()).collect(),
                others: others.iter().map(|s| s.to_string()).collect(),
                needs_lab,
                needs_projector,
            }
        }

        fn room(name: &str, capacity: u32, has_lab: bool, has_projector: bool) -> Room {
            Room {
                name: name.to_string(),
                capacity,
                has_lab,
                has_projector,
            }
        }

        fn prefs(fac: &mut Facilitator, entries: &[(&str, f32)]) {
            fac.time_prefs = entries
                .iter()
                .map(|(slot, adjust)| TimePref {
                    slot: slot.to_string(),
                    adjust: *adjust,
                })
                .collect();
        }

        let intro_pref = ["Glen", "Lock", "Banks"];
        let intro_others = ["Numen", "Richards", "Shaw", "Singer"];
        let mid_pref = ["Glen", "Banks", "Zeldin", "Lock", "Singer"];
        let mid_others = ["Richards", "Uther", "Shaw"];

        let activities = vec![
            act("SLA101A", 40, &intro_pref, &intro_others, false, false),
            act("SLA101B", 35, &intro_pref, &intro_others, false, false),
            act("SLA191A", 45, &intro_pref, &intro_others, true, false),
            act("SLA191B", 40, &intro_pref, &intro_others, true, false),
            act("SLA201", 60, &mid_pref, &mid_others, false, false),
            act("SLA291", 50, &mid_pref, &mid_others, true, false),
            act("SLA303", 25, &["Glen", "Zeldin"], &["Banks"], true, true),
            act("SLA304", 20, &["Singer", "Uther"], &["Richards"], true, false),
            act(
                "SLA394",
                15,
                &["Tyler", "Singer"],
                &["Richards", "Zeldin"],
                false,
                false,
            ),
            act(
                "SLA449",
                30,
                &["Tyler", "Zeldin", "Uther"],
                &["Zeldin", "Shaw"],
                false,
                true,
            ),
            act(
                "SLA451",
                90,
                &["Lock", "Banks", "Zeldin"],
                &["Tyler", "Singer", "Shaw", "Glen"],
                true,
                true,
            ),
        ];

        let rooms = vec![
            room("Beach 201", 18, false, true),
            room("Beach 301", 25, true, true),
            room("Frank 119", 95, true, true),
            room("Loft 206", 55, false, false),
            room("Loft 310", 48, true, false),
            room("James 325", 110, true, true),
            room("Roman 201", 40, false, false),
            room("Roman 216", 80, true, true),
            room("Slater 003", 32, true, true),
        ];

        let time_slots = ["10 AM", "11 AM", "12 PM", "1 PM", "2 PM", "3 PM"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut facilitators: Vec<Facilitator> = [
            "Lock", "Glen", "Banks", "Richards", "Shaw", "Singer", "Uther", "Tyler", "Numen",
            "Zeldin",
        ]
        .iter()
        .map(|n| Facilitator::named(n))
        .collect();

        for fac in facilitators.iter_mut() {
            match fac.name.as_str() {
                "Glen" => prefs(fac, &[("10 AM", 0.1), ("11 AM", 0.1), ("3 PM", -0.2)]),
                "Banks" => prefs(
                    fac,
                    &[("10 AM", 0.1), ("12 PM", 0.1), ("11 AM", -0.1), ("1 PM", -0.1)],
                ),
                "Tyler" => {
                    // Light teaching duty: no underuse penalty below 2 activities.
                    fac.underload_floor = 2;
                    prefs(
                        fac,
                        &[("2 PM", 0.1), ("3 PM", 0.1), ("10 AM", -0.2), ("11 AM", -0.2)],
                    );
                }
                "Singer" => prefs(fac, &[("12 PM", -0.3)]),
                _ => {}
            }
        }

        Catalog {
            activities,
            rooms,
            time_slots,
            facilitators,
            section_pairs: vec![
                ["SLA101A".to_string(), "SLA101B".to_string()],
                ["SLA191A".to_string(), "SLA191B".to_string()],
            ],
            cross_pairs: vec![
                ["SLA101A".to_string(), "SLA191A".to_string()],
                ["SLA101A".to_string(), "SLA191B".to_string()],
                ["SLA101B".to_string(), "SLA191A".to_string()],
                ["SLA101B".to_string(), "SLA191B".to_string()],
            ],
            split_buildings: vec!["Roman".to_string(), "Beach".to_string()],
        }
    }
}
