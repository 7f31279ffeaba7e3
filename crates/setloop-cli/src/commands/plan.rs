use setloop_core::storage::DURATION_OPTIONS;
use setloop_core::{format, SegmentKind, SetPlan};

use super::open_config;

pub fn plan(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let persisted = open_config();
    let plan = SetPlan::for_config(persisted.config())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    for (i, segment) in plan.segments.iter().enumerate() {
        let detail = match (segment.kind, segment.exercise_index) {
            (SegmentKind::Exercise, Some(index)) => plan.exercises[index].clone(),
            (SegmentKind::Rest, Some(index)) => format!("next: {}", plan.exercises[index + 1]),
            _ => format!("next: {}", plan.exercises[0]),
        };
        println!(
            "{:>2}. {:<12} {:>5}  {detail}",
            i + 1,
            segment.kind.label(),
            format::clock(segment.duration_secs)
        );
    }
    println!(
        "per set: {} active, {} with break",
        format::clock(plan.active_secs()),
        format::clock(plan.total_secs())
    );
    Ok(())
}

pub fn durations() -> Result<(), Box<dyn std::error::Error>> {
    for secs in DURATION_OPTIONS {
        println!("{secs}");
    }
    Ok(())
}
