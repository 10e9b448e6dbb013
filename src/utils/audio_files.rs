use std::path::{Path, PathBuf};
use tracing::debug;

pub const OUTPUT_PREFIX: &str = "doctor_voice_";
pub const OUTPUT_EXT: &str = "mp3";

/// Time-based output filename for a synthesized reply, collision-resistant
/// across sequential requests.
pub fn output_filename(dir: &Path) -> PathBuf {
    dir.join(format!(
        "{OUTPUT_PREFIX}{}.{OUTPUT_EXT}",
        chrono::Utc::now().timestamp_millis()
    ))
}

/// Whether a path matches the synthesized-output naming pattern.
pub fn is_output_file(path: &Path) -> bool {
    let name_matches = path
        .file_stem()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with(OUTPUT_PREFIX))
        .unwrap_or(false);
    let ext_matches = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(OUTPUT_EXT))
        .unwrap_or(false);
    name_matches && ext_matches
}

/// Best-effort removal of previously synthesized files so the output
/// directory never accumulates stale audio. Failures are swallowed.
pub fn clear_output_files(dir: &Path) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if is_output_file(&path) {
            if let Err(e) = std::fs::remove_file(&path) {
                debug!("Could not remove old audio file {}: {e}", path.display());
            }
        }
    }
}
