use crate::shift::{month_name, weekday_name, Shift, DISPLAY_FORMAT};
use crate::store::ShiftStore;
use chrono::{Datelike, NaiveDate};
use std::fmt::Write as _;

pub const NO_SHIFTS: &str = "No hay guardias registradas";

/// Read-only text views over a [`ShiftStore`].
pub struct ShiftReport<'a> {
    store: &'a ShiftStore,
}

impl<'a> ShiftReport<'a> {
    pub fn new(store: &'a ShiftStore) -> Self {
        Self { store }
    }

    /// Shifts starting in `year`/`month`, by start date. Equal start dates
    /// keep insertion order.
    pub fn shifts_in_month(&self, year: i32, month: u32) -> Vec<&'a Shift> {
        let mut selected: Vec<&Shift> = self
            .store
            .shifts()
            .filter(|s| s.starts_in(year, month))
            .collect();
        selected.sort_by_key(|s| s.start_date());
        selected
    }

    /// Month report. A shift that crosses into the next month is listed only
    /// under the month it starts in.
    ///
    /// The month is not validated here: anything outside 1..=12 matches no
    /// shift and renders the empty-month message.
    pub fn render(&self, year: i32, month: u32) -> String {
        let label = month_label(year, month);
        let shifts = self.shifts_in_month(year, month);
        if shifts.is_empty() {
            return format!("{NO_SHIFTS} para {label}");
        }

        let mut out = format!("📅 GUARDIAS DE {}:\n\n", label.to_uppercase());
        for shift in shifts {
            let _ = writeln!(out, "👤 {}", shift.person());
            let _ = writeln!(
                out,
                "📆 {} → {}\n",
                format_day(shift.start_date()),
                format_day(shift.end_date())
            );
        }
        out
    }

    /// Every registered shift grouped by start date.
    pub fn render_all(&self) -> String {
        let mut by_date: Vec<(NaiveDate, Vec<&str>)> = Vec::new();
        let mut shifts: Vec<&Shift> = self.store.shifts().collect();
        shifts.sort_by_key(|s| s.start_date());
        for shift in shifts {
            if let Some((date, people)) = by_date.last_mut() {
                if *date == shift.start_date() {
                    people.push(shift.person());
                    continue;
                }
            }
            by_date.push((shift.start_date(), vec![shift.person()]));
        }
        if by_date.is_empty() {
            return NO_SHIFTS.to_string();
        }

        let mut out = String::from("📅 GUARDIAS REGISTRADAS:\n\n");
        for (date, people) in by_date {
            let _ = writeln!(out, "📆 {}", format_day(date));
            let _ = writeln!(out, "👥 {}\n", people.join(", "));
        }
        out
    }
}

/// `25/12/2024 (miércoles)`
pub fn format_day(date: NaiveDate) -> String {
    format!(
        "{} ({})",
        date.format(DISPLAY_FORMAT),
        weekday_name(date.weekday())
    )
}

fn month_label(year: i32, month: u32) -> String {
    match month_name(month) {
        Some(name) => format!("{name} {year}"),
        None => format!("{month:02}/{year}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::KeyStyle;

    fn store_with(entries: &[(&str, &str, i64)], style: KeyStyle) -> ShiftStore {
        let mut store = ShiftStore::in_memory(style);
        for (person, date, weeks) in entries {
            store.register(person, date, *weeks).unwrap();
        }
        store
    }

    #[test]
    fn month_report_uses_start_month_filing() {
        let store = store_with(&[("Juan", "2024-12-25", 3)], KeyStyle::Date);
        let report = ShiftReport::new(&store);

        let december = report.render(2024, 12);
        assert!(december.contains("👤 Juan"));
        assert!(december.contains("25/12/2024 (miércoles) → 31/12/2024 (martes)"));
        assert!(!december.contains("01/01/2025"));
        assert!(!december.contains("08/01/2025"));

        let january = report.shifts_in_month(2025, 1);
        assert_eq!(january.len(), 2);
    }

    #[test]
    fn shift_spanning_into_next_month_not_listed_there() {
        let store = store_with(&[("Ana", "2024-11-28", 1)], KeyStyle::Date);
        let report = ShiftReport::new(&store);
        assert!(report.shifts_in_month(2024, 12).is_empty());
        assert!(report.render(2024, 12).starts_with(NO_SHIFTS));
    }

    #[test]
    fn empty_month_renders_message() {
        let store = ShiftStore::in_memory(KeyStyle::Date);
        let text = ShiftReport::new(&store).render(2024, 12);
        assert_eq!(text, "No hay guardias registradas para diciembre 2024");
    }

    #[test]
    fn invalid_month_renders_empty_message() {
        let store = store_with(&[("Juan", "2024-12-25", 1)], KeyStyle::Date);
        let text = ShiftReport::new(&store).render(2024, 13);
        assert_eq!(text, "No hay guardias registradas para 13/2024");
    }

    #[test]
    fn entries_sorted_by_start_date_with_stable_ties() {
        let store = store_with(
            &[
                ("Carla", "2024-12-16", 1),
                ("Ana", "2024-12-02", 1),
                ("Beto", "2024-12-16", 1),
            ],
            KeyStyle::IsoWeek,
        );
        let people: Vec<_> = ShiftReport::new(&store)
            .shifts_in_month(2024, 12)
            .iter()
            .map(|s| s.person())
            .collect();
        assert_eq!(people, vec!["Ana", "Carla", "Beto"]);
    }

    #[test]
    fn iso_week_store_sorts_within_week() {
        // Both land in 2024-W49; the later registration starts earlier.
        let store = store_with(
            &[("Tarde", "2024-12-06", 1), ("Temprano", "2024-12-02", 1)],
            KeyStyle::IsoWeek,
        );
        let text = ShiftReport::new(&store).render(2024, 12);
        let first = text.find("Temprano").unwrap();
        let second = text.find("Tarde").unwrap();
        assert!(first < second);
    }

    #[test]
    fn render_all_groups_people_by_date() {
        let store = store_with(
            &[
                ("Juan", "2024-12-25", 1),
                ("Ana", "2024-12-02", 1),
                ("Luis", "2024-12-25", 1),
            ],
            KeyStyle::Date,
        );
        let text = ShiftReport::new(&store).render_all();
        assert!(text.starts_with("📅 GUARDIAS REGISTRADAS"));
        assert!(text.contains("📆 25/12/2024 (miércoles)\n👥 Juan, Luis"));
        assert!(text.find("02/12/2024").unwrap() < text.find("25/12/2024").unwrap());
    }

    #[test]
    fn render_all_empty_store() {
        let store = ShiftStore::in_memory(KeyStyle::Date);
        assert_eq!(ShiftReport::new(&store).render_all(), NO_SHIFTS);
    }
}
