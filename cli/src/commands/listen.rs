use std::process::Command;
use std::thread;
use std::time::Duration;

use tracing::{error, warn};
use wakewatch_common::config::Config;
use wakewatch_common::device::{Action, Device, Registry};

use crate::commands::ButtonArg;

pub fn listen(
    interface: String,
    buttons: Vec<ButtonArg>,
    debounce_ms: Option<u64>,
) -> anyhow::Result<()> {
    if !is_root::is_root() {
        warn!("not running as root, opening the capture handle will likely fail");
    }

    let mut devices = Vec::with_capacity(buttons.len());
    for button in buttons {
        let action = ShellAction::new(button.command);
        devices.push(Device::new(button.name, &button.hw_addr, action)?);
    }
    let registry = Registry::new(devices)?;

    let config = Config {
        debounce: debounce_ms.map(Duration::from_millis),
    };

    wakewatch_core::listen(&registry, &interface, &config)?;
    Ok(())
}

/// Runs a shell command on each press, detached: the listening loop never
/// waits on the child, so a slow command cannot stall later presses.
pub struct ShellAction {
    command: String,
}

impl ShellAction {
    pub fn new(command: String) -> Self {
        Self { command }
    }
}

impl Action for ShellAction {
    fn invoke(&self) {
        match Command::new("sh").arg("-c").arg(&self.command).spawn() {
            Ok(mut child) => {
                // reap in the background so the child never lingers as a zombie
                thread::spawn(move || match child.wait() {
                    Ok(status) if !status.success() => {
                        warn!(%status, "action command exited with failure")
                    }
                    Err(e) => warn!("failed to collect action command: {e}"),
                    _ => {}
                });
            }
            Err(e) => {
                error!(command = %self.command, "failed to launch action command: {e}")
            }
        }
    }
}
