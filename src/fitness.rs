use crate::catalog::Catalog;
use crate::config::FitnessWeights;
use crate::error::{SchedForgeError, SfResult};
use crate::schedule::Schedule;
use serde::Serialize;
use std::sync::Arc;

/// Per-category subtotals. `total` is the schedule's fitness.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FitnessBreakdown {
    pub room_size: f32,
    pub room_conflicts: f32,
    pub facilitator_pref: f32,
    pub slot_load: f32,
    pub total_load: f32,
    pub pairing: f32,
    pub time_prefs: f32,
    pub equipment: f32,
    pub total: f32,
}

/// Pure schedule scorer. All name lookups are resolved to index tables at
/// construction so the evaluation loop is branch-light and allocation-free
/// apart from three small count buffers.
#[derive(Debug)]
pub struct Evaluator {
    pub catalog: Arc<Catalog>,
    pub weights: FitnessWeights,

    // --- Precomputed index tables ---
    preferred: Vec<Vec<u16>>,
    listed: Vec<Vec<u16>>,
    section_pairs: Vec<(u16, u16)>,
    cross_pairs: Vec<(u16, u16)>,
    // [facilitator][time slot] -> signed preference adjustment
    time_adjust: Vec<Vec<f32>>,
    split_room: Vec<bool>,
}

impl Evaluator {
    pub fn new(catalog: Arc<Catalog>, weights: FitnessWeights) -> SfResult<Self> {
        catalog.validate()?;

        let resolve_facilitators = |names: &[String], activity: &str| -> SfResult<Vec<u16>> {
            names
                .iter()
                .map(|n| {
                    catalog.facilitator_index(n).ok_or_else(|| {
                        SchedForgeError::Validation(format!(
                            "activity '{}' lists unknown facilitator '{}'",
                            activity, n
                        ))
                    })
                })
                .collect()
        };

        let mut preferred = Vec::with_capacity(catalog.activities.len());
        let mut listed = Vec::with_capacity(catalog.activities.len());
        for activity in &catalog.activities {
            preferred.push(resolve_facilitators(&activity.preferred, &activity.name)?);
            listed.push(resolve_facilitators(&activity.others, &activity.name)?);
        }

        let resolve_pair = |pair: &[String; 2]| -> SfResult<(u16, u16)> {
            let a = catalog.activity_index(&pair[0]).ok_or_else(|| {
                SchedForgeError::Validation(format!("pair rule names unknown activity '{}'", pair[0]))
            })?;
            let b = catalog.activity_index(&pair[1]).ok_or_else(|| {
                SchedForgeError::Validation(format!("pair rule names unknown activity '{}'", pair[1]))
            })?;
            Ok((a, b))
        };

        let section_pairs = catalog
            .section_pairs
            .iter()
            .map(resolve_pair)
            .collect::<SfResult<Vec<_>>>()?;
        let cross_pairs = catalog
            .cross_pairs
            .iter()
            .map(resolve_pair)
            .collect::<SfResult<Vec<_>>>()?;

        let mut time_adjust = Vec::with_capacity(catalog.facilitators.len());
        for fac in &catalog.facilitators {
            let mut row = vec![0.0f32; catalog.time_slots.len()];
            for pref in &fac.time_prefs {
                let idx = catalog.time_index(&pref.slot).ok_or_else(|| {
                    SchedForgeError::Validation(format!(
                        "facilitator '{}' prefers unknown time slot '{}'",
                        fac.name, pref.slot
                    ))
                })?;
                row[idx as usize] += pref.adjust;
            }
            time_adjust.push(row);
        }

        let split_room = catalog
            .rooms
            .iter()
            .map(|r| catalog.split_buildings.iter().any(|b| b == r.building()))
            .collect();

        Ok(Self {
            catalog,
            weights,
            preferred,
            listed,
            section_pairs,
            cross_pairs,
            time_adjust,
            split_room,
        })
    }

    pub fn evaluate(&self, schedule: &Schedule) -> f32 {
        self.evaluate_detailed(schedule).total
    }

    pub fn evaluate_detailed(&self, schedule: &Schedule) -> FitnessBreakdown {
        debug_assert!(schedule.is_valid(&self.catalog));

        let w = &self.weights;
        let n_rooms = self.catalog.rooms.len();
        let n_times = self.catalog.time_slots.len();
        let n_facs = self.catalog.facilitators.len();

        // Occupancy counts drive the conflict and load rules.
        let mut room_time = vec![0u32; n_rooms * n_times];
        let mut fac_time = vec![0u32; n_facs * n_times];
        let mut fac_load = vec![0u32; n_facs];
        for a in &schedule.slots {
            room_time[a.room as usize * n_times + a.time as usize] += 1;
            fac_time[a.facilitator as usize * n_times + a.time as usize] += 1;
            fac_load[a.facilitator as usize] += 1;
        }

        let mut out = FitnessBreakdown::default();

        for (idx, a) in schedule.slots.iter().enumerate() {
            let activity = &self.catalog.activities[idx];
            let room = &self.catalog.rooms[a.room as usize];
            let fac = a.facilitator as usize;
            let time = a.time as usize;

            // Room conflict, applied to every activity in the clash.
            if room_time[a.room as usize * n_times + time] > 1 {
                out.room_conflicts -= w.penalty_room_conflict;
            }

            // Room size bands.
            let capacity = room.capacity as f32;
            let enrollment = activity.enrollment as f32;
            if capacity < enrollment {
                let shortfall = (enrollment - capacity) / enrollment;
                out.room_size -= w.penalty_room_too_small * (1.0 + shortfall);
            } else {
                let ratio = capacity / enrollment;
                if ratio > w.oversize_wide_ratio {
                    out.room_size -= w.penalty_room_oversize_wide;
                } else if ratio > w.oversize_loose_ratio {
                    out.room_size -= w.penalty_room_oversize_loose;
                } else {
                    out.room_size += w.bonus_room_fit;
                }
            }

            // Facilitator preference tiers.
            if self.preferred[idx].contains(&a.facilitator) {
                out.facilitator_pref += w.bonus_preferred_facilitator;
            } else if self.listed[idx].contains(&a.facilitator) {
                out.facilitator_pref += w.bonus_listed_facilitator;
            } else {
                out.facilitator_pref -= w.penalty_unlisted_facilitator;
            }

            // Per-slot facilitator booking.
            match fac_time[fac * n_times + time] {
                1 => out.slot_load += w.bonus_single_booking,
                n if n > 1 => out.slot_load -= w.penalty_double_booking,
                _ => {}
            }

            if w.time_preferences {
                out.time_prefs += self.time_adjust[fac][time];
            }

            if w.equipment && (activity.needs_lab || activity.needs_projector) {
                let mut required = 0u32;
                let mut satisfied = 0u32;
                if activity.needs_lab {
                    required += 1;
                    if room.has_lab {
                        satisfied += 1;
                    }
                }
                if activity.needs_projector {
                    required += 1;
                    if room.has_projector {
                        satisfied += 1;
                    }
                }
                if satisfied == required {
                    out.equipment += w.bonus_equipment_full;
                } else if satisfied > 0 {
                    out.equipment -= w.penalty_equipment_partial;
                } else {
                    out.equipment -= w.penalty_equipment_none;
                }
            }
        }

        // Total load per facilitator, using each facilitator's own thresholds.
        for (fac, &load) in fac_load.iter().enumerate() {
            let policy = &self.catalog.facilitators[fac];
            if load > policy.max_load {
                out.total_load -= w.penalty_overload;
            }
            if load >= policy.underload_floor && load < policy.min_load {
                out.total_load -= w.penalty_underload;
            }
        }

        // Same-course section spacing.
        for &(a, b) in &self.section_pairs {
            let ta = schedule.slots[a as usize].time as i32;
            let tb = schedule.slots[b as usize].time as i32;
            let gap = (ta - tb).unsigned_abs() as usize;
            if gap > w.section_spread_gap {
                out.pairing += w.bonus_section_spread;
            }
            if gap == 0 {
                out.pairing -= w.penalty_section_same_slot;
            }
        }

        // Cross-course adjacency curve.
        for &(a, b) in &self.cross_pairs {
            let sa = &schedule.slots[a as usize];
            let sb = &schedule.slots[b as usize];
            let gap = (sa.time as i32 - sb.time as i32).unsigned_abs();
            match gap {
                0 => out.pairing -= w.penalty_cross_same_slot,
                1 => {
                    out.pairing += w.bonus_cross_consecutive;
                    // Back-to-back sections split across campus.
                    if self.split_room[sa.room as usize] != self.split_room[sb.room as usize] {
                        out.pairing -= w.penalty_cross_building_split;
                    }
                }
                2 => out.pairing += w.bonus_cross_one_gap,
                _ => {}
            }
        }

        out.total = out.room_size
            + out.room_conflicts
            + out.facilitator_pref
            + out.slot_load
            + out.total_load
            + out.pairing
            + out.time_prefs
            + out.equipment;
        out
    }
}
