//! Guard duty shifts: registration, persistence and monthly reports.

pub mod error;
pub mod io;
pub mod report;
pub mod shift;
pub mod store;

pub use error::{GuardiasError, Result};
pub use report::ShiftReport;
pub use shift::{KeyStyle, Shift, ShiftRecord};
pub use store::{Backend, SharedStore, ShiftStore};
