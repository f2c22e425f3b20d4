use chrono::{Datelike, Local, NaiveDate};
use guardias_core::report::format_day;
use guardias_core::{GuardiasError, SharedStore, ShiftReport};

use crate::command::{Command, Usage};

pub const START_TEXT: &str = "🚨 Bot de Guardias Activo 🚨

Comandos disponibles:
/agregar Juan 2024-12-25 - Agregar guardia de una semana
/agregar Juan 2024-12-25 3 - Agregar tres semanas seguidas
/guardias - Ver las guardias del mes actual
/guardias 2024 12 - Ver las guardias de un mes
/todas - Ver todas las guardias
/ayuda - Ver esta ayuda";

pub const HELP_TEXT: &str = "📋 AYUDA DEL BOT:

/agregar NOMBRE YYYY-MM-DD [SEMANAS]
Registra una guardia de 7 días desde la fecha indicada.
Con SEMANAS se registran varias semanas consecutivas.

/guardias [AÑO MES]
Guardias que empiezan en el mes indicado (por defecto el actual).

/todas
Todas las guardias registradas.

/start
Mensaje de inicio

Formato de fecha: YYYY-MM-DD
Ejemplo: 2024-12-25";

const REGISTER_USAGE: &str =
    "❌ Uso: /agregar NOMBRE YYYY-MM-DD [SEMANAS]\nEjemplo: /agregar Juan 2024-12-25";

/// Most weeks a single chat command may register.
pub const MAX_WEEKS_PER_COMMAND: i64 = 52;

const MONTH_USAGE: &str = "❌ Uso: /guardias [AÑO MES]\nEjemplo: /guardias 2024 12";

// ─── Dispatcher ───────────────────────────────────────────────────────────

/// Runs parsed commands against the store and produces reply text.
///
/// All user-facing wording lives here; the core only reports error kinds.
#[derive(Clone)]
pub struct Dispatcher {
    store: SharedStore,
}

impl Dispatcher {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Reply for `cmd`, or `None` when the bot stays silent.
    pub async fn handle(&self, cmd: Command) -> Option<String> {
        self.handle_on(cmd, Local::now().date_naive()).await
    }

    /// Like [`handle`](Self::handle) with an explicit "today" for the
    /// current-month default.
    pub async fn handle_on(&self, cmd: Command, today: NaiveDate) -> Option<String> {
        let reply = match cmd {
            Command::Start => START_TEXT.to_string(),
            Command::Help => HELP_TEXT.to_string(),
            Command::Usage(Usage::Register) => REGISTER_USAGE.to_string(),
            Command::Usage(Usage::Month) => MONTH_USAGE.to_string(),
            Command::Register {
                person,
                date,
                weeks,
            } => self.register(&person, &date, weeks.as_deref()).await,
            Command::Month(period) => {
                let (year, month) = period.unwrap_or((today.year(), today.month()));
                self.month(year, month).await
            }
            Command::All => {
                let store = self.store.lock().await;
                let text = ShiftReport::new(&store).render_all();
                text
            }
            Command::Unknown(name) => {
                tracing::debug!(command = %name, "ignoring unknown command");
                return None;
            }
        };
        Some(reply)
    }

    async fn register(&self, person: &str, date: &str, weeks: Option<&str>) -> String {
        let week_count = match weeks.map(str::parse::<i64>) {
            None => 1,
            Some(Ok(n)) if n <= MAX_WEEKS_PER_COMMAND => n,
            Some(_) => {
                let raw = weeks.unwrap_or_default().to_string();
                return error_reply(&GuardiasError::InvalidWeekCount(raw));
            }
        };

        let result = self.store.lock().await.register(person, date, week_count);
        match result {
            Ok(added) => {
                let mut reply = if added.len() == 1 {
                    format!("✅ Guardia agregada:\n👤 {person}\n")
                } else {
                    format!("✅ {} guardias agregadas:\n👤 {person}\n", added.len())
                };
                for shift in &added {
                    reply.push_str(&format!(
                        "📅 {} → {}\n",
                        format_day(shift.start_date()),
                        format_day(shift.end_date())
                    ));
                }
                reply
            }
            Err(e) => error_reply(&e),
        }
    }

    async fn month(&self, year: i32, month: u32) -> String {
        if !(1..=12).contains(&month) {
            return error_reply(&GuardiasError::InvalidMonth(month));
        }
        let store = self.store.lock().await;
        let text = ShiftReport::new(&store).render(year, month);
        text
    }
}

/// User-facing text for a core error.
pub fn error_reply(err: &GuardiasError) -> String {
    match err {
        GuardiasError::InvalidDateFormat(_) | GuardiasError::DateOutOfRange(_) => {
            "❌ Fecha inválida. Usar formato: YYYY-MM-DD".to_string()
        }
        GuardiasError::InvalidWeekCount(_) => {
            format!("❌ Número de semanas inválido. Debe ser un entero entre 1 y {MAX_WEEKS_PER_COMMAND}")
        }
        GuardiasError::InvalidMonth(_) => "❌ Mes inválido. Debe estar entre 1 y 12".to_string(),
        GuardiasError::StorageUnavailable { .. } | GuardiasError::Json(_) => {
            tracing::error!(error = %err, "could not persist shifts");
            "❌ Error al guardar la guardia".to_string()
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
