use crate::schedule::Schedule;
use fastrand::Rng;

/// Uniform crossover at activity granularity: each activity inherits its
/// full (room, time, facilitator) triple from one parent, never a mix.
pub fn crossover_uniform(p1: &Schedule, p2: &Schedule, rng: &mut Rng) -> Schedule {
    debug_assert_eq!(p1.slots.len(), p2.slots.len());
    let slots = p1
        .slots
        .iter()
        .zip(&p2.slots)
        .map(|(a, b)| if rng.bool() { *a } else { *b })
        .collect();
    Schedule { slots }
}
