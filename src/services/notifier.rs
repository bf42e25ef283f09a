//! Completion sound

use std::io::Write;

use tokio::process::Command;
use tracing::{debug, info};

/// Play the notification sound: run `sound_command` (program then arguments) when
/// set, otherwise ring the terminal bell
pub async fn play_notification(sound_command: &[String]) -> Result<(), String> {
    match sound_command.split_first() {
        Some((program, args)) => {
            debug!("Playing notification with {}", program);

            let output = Command::new(program)
                .args(args)
                .output()
                .await
                .map_err(|e| format!("Failed to execute {}: {}", program, e))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(format!("{} failed: {}", program, stderr));
            }

            info!("Notification sound played");
            Ok(())
        }
        None => ring_bell(),
    }
}

fn ring_bell() -> Result<(), String> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(b"\x07")
        .and_then(|_| stdout.flush())
        .map_err(|e| format!("Failed to ring terminal bell: {}", e))?;
    debug!("Terminal bell rung");
    Ok(())
}
