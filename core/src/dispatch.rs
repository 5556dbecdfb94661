//! The per-frame decision loop.
//!
//! One state, "listening", with one transition per arriving frame that loops
//! back to itself. Frames are handled strictly in arrival order, one at a
//! time, so presses are never reordered across devices. Nothing a frame can
//! contain terminates the loop; only the end of the feed does.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use pnet::packet::ethernet::EthernetPacket;
use pnet::util::MacAddr;
use tracing::{debug, error, info, warn};
use wakewatch_common::config::Config;
use wakewatch_common::device::Registry;

use crate::capture::FrameSource;

pub struct Dispatcher<'a> {
    registry: &'a Registry,
    config: Config,
    last_press: HashMap<MacAddr, Instant>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a Registry, config: &Config) -> Self {
        Self {
            registry,
            config: config.clone(),
            last_press: HashMap::new(),
        }
    }

    /// Consumes `frames` until the feed ends. Blocking.
    pub fn run(&mut self, frames: &mut dyn FrameSource) {
        while let Some(frame) = frames.next_frame() {
            self.handle_frame(&frame);
        }
    }

    fn handle_frame(&mut self, bytes: &[u8]) {
        let Some(eth) = EthernetPacket::new(bytes) else {
            error!(
                len = bytes.len(),
                "dropping frame too short for an Ethernet header"
            );
            return;
        };

        let source = eth.get_source();
        let Some(device) = self.registry.find(source) else {
            // The installed filter only admits registered sources, so a miss
            // here points at a filter/registry mismatch.
            warn!(%source, "captured frame from unregistered source");
            return;
        };

        if self.suppressed(source) {
            debug!(device = device.name(), "retransmit within debounce window");
            return;
        }

        info!(device = device.name(), %source, "button pressed");

        // Actions are opaque caller code; a panic in one must not end
        // dispatch for later frames.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| device.action().invoke()));
        if outcome.is_err() {
            error!(device = device.name(), "action panicked");
        }
    }

    /// True when a debounce window is configured and `source` already pressed
    /// within it. The window runs from the last accepted press, so a
    /// retransmit burst collapses into the press that started it.
    fn suppressed(&mut self, source: MacAddr) -> bool {
        let Some(window) = self.config.debounce else {
            return false;
        };
        let now = Instant::now();
        match self.last_press.get(&source) {
            Some(prev) if now.duration_since(*prev) < window => true,
            _ => {
                self.last_press.insert(source, now);
                false
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
