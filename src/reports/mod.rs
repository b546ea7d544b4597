use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Table};
use schedforge::catalog::Catalog;
use schedforge::error::SfResult;
use schedforge::fitness::FitnessBreakdown;
use schedforge::ga::GenerationStats;
use schedforge::schedule::Schedule;
use strum_macros::{Display, EnumString};

/// Sort order for the printed schedule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ScheduleOrder {
    Time,
    Activity,
}

pub fn print_schedule_table(schedule: &Schedule, catalog: &Catalog, order: ScheduleOrder) {
    let mut rows: Vec<(usize, &str, u16, u16, u16, u32)> = schedule
        .slots
        .iter()
        .enumerate()
        .map(|(i, a)| {
            (
                i,
                catalog.activities[i].name.as_str(),
                a.time,
                a.room,
                a.facilitator,
                catalog.activities[i].enrollment,
            )
        })
        .collect();

    match order {
        ScheduleOrder::Time => rows.sort_by(|a, b| {
            (a.2, &catalog.rooms[a.3 as usize].name, a.1)
                .cmp(&(b.2, &catalog.rooms[b.3 as usize].name, b.1))
        }),
        ScheduleOrder::Activity => rows.sort_by(|a, b| a.1.cmp(b.1)),
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Activity").add_attribute(Attribute::Bold),
        Cell::new("Time").add_attribute(Attribute::Bold),
        Cell::new("Room").add_attribute(Attribute::Bold),
        Cell::new("Facilitator").add_attribute(Attribute::Bold),
        Cell::new("Enroll").add_attribute(Attribute::Bold),
    ]);

    for (_, name, time, room, fac, enrollment) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(&catalog.time_slots[time as usize]),
            Cell::new(&catalog.rooms[room as usize].name),
            Cell::new(&catalog.facilitators[fac as usize].name),
            Cell::new(enrollment).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{table}");
}

pub fn print_breakdown_table(breakdown: &FitnessBreakdown) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Score").add_attribute(Attribute::Bold),
    ]);

    let rows = [
        ("Room size", breakdown.room_size),
        ("Room conflicts", breakdown.room_conflicts),
        ("Facilitator preference", breakdown.facilitator_pref),
        ("Slot load", breakdown.slot_load),
        ("Total load", breakdown.total_load),
        ("Paired activities", breakdown.pairing),
        ("Time preferences", breakdown.time_prefs),
        ("Equipment", breakdown.equipment),
    ];
    for (name, score) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{:+.3}", score)).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(format!("{:+.3}", breakdown.total))
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
    ]);

    println!("{table}");
}

/// One row per generation, straight from GenerationStats.
pub fn write_history_csv(path: &str, history: &[GenerationStats]) -> SfResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for stats in history {
        writer.serialize(stats)?;
    }
    writer.flush()?;
    Ok(())
}
