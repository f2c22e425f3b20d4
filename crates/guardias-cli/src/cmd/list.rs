use crate::output::{print_json, print_table};
use guardias_core::report::format_day;
use guardias_core::{Backend, KeyStyle, Shift, ShiftStore};

pub fn run(backend: Backend, key_style: KeyStyle, json: bool) -> anyhow::Result<()> {
    let store = ShiftStore::load(backend, key_style);

    if json {
        // Same shape as the shift file
        print_json(store.groups())?;
        return Ok(());
    }

    if store.is_empty() {
        println!("No shifts registered.");
        return Ok(());
    }

    let mut shifts: Vec<&Shift> = store.shifts().collect();
    shifts.sort_by_key(|s| s.start_date());
    let rows: Vec<Vec<String>> = shifts
        .iter()
        .map(|s| {
            vec![
                format_day(s.start_date()),
                format_day(s.end_date()),
                s.person().to_string(),
            ]
        })
        .collect();
    print_table(&["START", "END", "PERSON"], rows);
    Ok(())
}
