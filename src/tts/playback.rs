use anyhow::Result;
use std::path::Path;
use tokio::process::Command;

use crate::error::ServiceError;

/// Player command line for a given OS family, `None` when unsupported.
pub fn playback_command(os: &str) -> Option<(&'static str, &'static [&'static str])> {
    match os {
        "macos" => Some(("afplay", &[])),
        "windows" => Some(("ffplay", &["-nodisp", "-autoexit"])),
        "linux" => Some(("aplay", &[])),
        _ => None,
    }
}

/// Play an audio file through the host OS player. Callers treat a failure
/// here (including an unsupported OS) as a warning, not a request failure.
pub async fn play(path: &Path) -> Result<()> {
    let os = std::env::consts::OS;
    let (program, args) = playback_command(os).ok_or_else(|| {
        ServiceError::Playback(format!("unsupported operating system: {os}"))
    })?;

    let status = Command::new(program)
        .args(args)
        .arg(path)
        .status()
        .await
        .map_err(|e| ServiceError::Playback(format!("{program}: {e}")))?;

    if !status.success() {
        return Err(ServiceError::Playback(format!("{program} exited with {status}")).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_command_per_os() {
        assert_eq!(playback_command("macos").unwrap().0, "afplay");
        assert_eq!(playback_command("linux").unwrap().0, "aplay");

        let (program, args) = playback_command("windows").unwrap();
        assert_eq!(program, "ffplay");
        assert_eq!(args, &["-nodisp", "-autoexit"]);

        assert!(playback_command("freebsd").is_none());
    }
}
