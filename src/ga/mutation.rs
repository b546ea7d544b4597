use crate::catalog::Catalog;
use crate::schedule::{Assignment, Population, Schedule};
use fastrand::Rng;

/// Uniform draw over the full catalog domains. Preference lists are a
/// scoring concern, not a sampling one.
pub fn random_assignment(catalog: &Catalog, rng: &mut Rng) -> Assignment {
    Assignment {
        room: rng.usize(0..catalog.rooms.len()) as u16,
        time: rng.usize(0..catalog.time_slots.len()) as u16,
        facilitator: rng.usize(0..catalog.facilitators.len()) as u16,
    }
}

pub fn random_schedule(catalog: &Catalog, rng: &mut Rng) -> Schedule {
    let slots = (0..catalog.activities.len())
        .map(|_| random_assignment(catalog, rng))
        .collect();
    Schedule { slots }
}

pub fn initialize_population(catalog: &Catalog, size: usize, rng: &mut Rng) -> Population {
    (0..size).map(|_| random_schedule(catalog, rng)).collect()
}

/// Field-wise mutation: each of room, time, and facilitator of every
/// activity is independently resampled with probability `rate`.
pub fn mutate(schedule: &mut Schedule, rate: f32, catalog: &Catalog, rng: &mut Rng) {
    let n_rooms = catalog.rooms.len();
    let n_times = catalog.time_slots.len();
    let n_facs = catalog.facilitators.len();

    for slot in &mut schedule.slots {
        if rng.f32() < rate {
            slot.room = rng.usize(0..n_rooms) as u16;
        }
        if rng.f32() < rate {
            slot.time = rng.usize(0..n_times) as u16;
        }
        if rng.f32() < rate {
            slot.facilitator = rng.usize(0..n_facs) as u16;
        }
    }
}
