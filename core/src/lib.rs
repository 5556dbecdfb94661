//! # wakewatch core
//!
//! The capture/filter/dispatch pipeline behind the `wakewatch` binary:
//! open a live capture on an interface, install a filter derived from the
//! device registry, and hand every captured frame to the dispatcher until
//! the process dies.

pub mod capture;
pub mod dispatch;

pub use capture::{CaptureError, CaptureSession, FrameSource, press_filter};
pub use dispatch::Dispatcher;

use tracing::info;
use wakewatch_common::config::Config;
use wakewatch_common::device::Registry;

/// Opens a live capture on `interface` and dispatches presses from
/// `registry` until the frame feed ends.
///
/// Under normal operation the feed never ends, so this blocks for the
/// lifetime of the process. Setup failures (missing interface, missing
/// privileges, filter rejection) are returned; per-frame failures are
/// logged and survived.
pub fn listen(registry: &Registry, interface: &str, config: &Config) -> Result<(), CaptureError> {
    info!(interface, devices = registry.len(), "starting up");
    let mut session = CaptureSession::open(interface, registry)?;
    info!("filter installed, listening for button presses");
    Dispatcher::new(registry, config).run(&mut session);
    Ok(())
}
