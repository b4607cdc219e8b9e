use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use crate::global_constants::{
    LOG_TAG_INSTANCE, SCREENSHOT_FILE_EXTENSION, SCREENSHOT_FILE_PREFIX, TIMESTAMP_FORMAT,
};

const LOCK_FILE_NAME: &str = "quicksnip.lock";

/// Claims the tray-resident slot for this process. Any older instance found
/// through the lock file is killed first, so the new launch always wins.
pub fn ensure_single_instance() -> bool {
    let lock_file_path = std::env::temp_dir().join(LOCK_FILE_NAME);

    if lock_file_path.exists() {
        if let Ok(pid_string) = fs::read_to_string(&lock_file_path) {
            if let Ok(pid) = pid_string.trim().parse::<u32>() {
                log::info!("{} found existing instance with PID: {}", LOG_TAG_INSTANCE, pid);

                let mut system = System::new();
                system.refresh_processes_specifics(
                    ProcessesToUpdate::All,
                    true,
                    ProcessRefreshKind::nothing(),
                );

                if let Some(process) = system.process(Pid::from_u32(pid)) {
                    log::warn!("{} killing existing instance (PID: {})", LOG_TAG_INSTANCE, pid);
                    process.kill();
                    std::thread::sleep(std::time::Duration::from_millis(500));
                } else {
                    log::info!(
                        "{} previous instance (PID: {}) is gone, cleaning up stale lock file",
                        LOG_TAG_INSTANCE,
                        pid
                    );
                }

                let _ = fs::remove_file(&lock_file_path);
            }
        }
    }

    let current_pid = std::process::id();
    if let Err(e) = fs::File::create(&lock_file_path)
        .and_then(|mut file| file.write_all(current_pid.to_string().as_bytes()))
    {
        log::error!("{} failed to create lock file: {}", LOG_TAG_INSTANCE, e);
        return false;
    }

    log::info!("{} created lock file with PID: {}", LOG_TAG_INSTANCE, current_pid);
    true
}

/// Builds the destination path for a fresh capture, named by local wall time
/// down to the second.
pub fn timestamped_screenshot_path(folder: &Path) -> PathBuf {
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
    folder.join(format!(
        "{}{}.{}",
        SCREENSHOT_FILE_PREFIX, timestamp, SCREENSHOT_FILE_EXTENSION
    ))
}
