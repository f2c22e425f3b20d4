use crate::output::print_json;
use chrono::{Datelike, Local};
use guardias_core::{Backend, KeyStyle, ShiftRecord, ShiftReport, ShiftStore};

pub fn run(
    backend: Backend,
    key_style: KeyStyle,
    year: Option<i32>,
    month: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.month());

    let store = ShiftStore::load(backend, key_style);
    let report = ShiftReport::new(&store);

    if json {
        let shifts: Vec<ShiftRecord> = report
            .shifts_in_month(year, month)
            .into_iter()
            .cloned()
            .map(ShiftRecord::from)
            .collect();
        print_json(&serde_json::json!({
            "year": year,
            "month": month,
            "shifts": shifts,
        }))?;
    } else {
        println!("{}", report.render(year, month).trim_end());
    }
    Ok(())
}
