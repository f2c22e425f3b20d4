use crate::output::print_json;
use anyhow::bail;
use guardias_core::report::format_day;
use guardias_core::{Backend, KeyStyle, ShiftRecord, ShiftStore};

pub fn run(
    backend: Backend,
    key_style: KeyStyle,
    person: &str,
    date: &str,
    weeks: i64,
    json: bool,
) -> anyhow::Result<()> {
    if backend == Backend::Memory {
        bail!("`add` needs a shift file; drop --memory");
    }

    let mut store = ShiftStore::load(backend, key_style);
    let added = store.register(person, date, weeks)?;

    if json {
        let records: Vec<ShiftRecord> = added.into_iter().map(ShiftRecord::from).collect();
        print_json(&records)?;
    } else {
        for shift in &added {
            println!(
                "Registered {}: {} → {}",
                shift.person(),
                format_day(shift.start_date()),
                format_day(shift.end_date())
            );
        }
    }
    Ok(())
}
