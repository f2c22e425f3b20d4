use axum::extract::{Query, State};
use axum::Json;
use chrono::{Datelike, Local};
use guardias_core::{GuardiasError, ShiftRecord, ShiftReport};

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct MonthParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// GET /api/shifts?year=<y>&month=<m>: shifts starting in the month, by
/// start date, plus the rendered chat report. Defaults to the current month.
pub async fn list_month(
    State(app): State<AppState>,
    Query(params): Query<MonthParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let today = Local::now().date_naive();
    let year = params.year.unwrap_or(today.year());
    let month = params.month.unwrap_or(today.month());
    if !(1..=12).contains(&month) {
        return Err(GuardiasError::InvalidMonth(month).into());
    }

    let store = app.store.lock().await;
    let report = ShiftReport::new(&store);
    let shifts: Vec<ShiftRecord> = report
        .shifts_in_month(year, month)
        .into_iter()
        .cloned()
        .map(ShiftRecord::from)
        .collect();

    Ok(Json(serde_json::json!({
        "year": year,
        "month": month,
        "shifts": shifts,
        "report": report.render(year, month),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardias_core::{KeyStyle, ShiftStore};

    fn app_with(entries: &[(&str, &str, i64)]) -> AppState {
        let mut store = ShiftStore::in_memory(KeyStyle::Date);
        for (person, date, weeks) in entries {
            store.register(person, date, *weeks).unwrap();
        }
        AppState::new(store.into_shared())
    }

    #[tokio::test]
    async fn list_month_filters_by_start_month() {
        let app = app_with(&[("Juan", "2024-12-25", 3)]);
        let params = MonthParams {
            year: Some(2024),
            month: Some(12),
        };
        let json = list_month(State(app), Query(params)).await.unwrap().0;
        let shifts = json["shifts"].as_array().unwrap();
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0]["person"], "Juan");
        assert_eq!(shifts[0]["end_date"], "2024-12-31");
    }

    #[tokio::test]
    async fn list_month_rejects_bad_month() {
        let app = app_with(&[]);
        let params = MonthParams {
            year: Some(2024),
            month: Some(0),
        };
        assert!(list_month(State(app), Query(params)).await.is_err());
    }
}
