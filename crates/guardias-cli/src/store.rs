use guardias_core::Backend;
use std::path::{Path, PathBuf};

/// Shift file used when neither `--file` nor `GUARDIAS_FILE` is given.
pub const DEFAULT_FILE: &str = "guardias.json";

/// Resolve where shifts live.
///
/// Priority:
/// 1. `--memory` → in-memory store
/// 2. `--file` flag / `GUARDIAS_FILE` env var (passed in as `explicit`)
/// 3. `guardias.json` in the current directory
pub fn resolve_backend(explicit: Option<&Path>, memory: bool) -> Backend {
    if memory {
        return Backend::Memory;
    }
    match explicit {
        Some(p) => Backend::File(p.to_path_buf()),
        None => Backend::File(PathBuf::from(DEFAULT_FILE)),
    }
}
