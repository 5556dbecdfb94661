//! # Capture Session
//!
//! Owns the live capture handle on an interface and the filter expression
//! derived from the registry. The kernel-side filter discards everything but
//! ARP frames from registered sources, so the dispatch loop only ever sees
//! traffic it asked for.

use pcap::{Active, Capture, Linktype};
use thiserror::Error;
use tracing::{debug, error};
use wakewatch_common::device::Registry;

/// Snapshot length for the live handle. An Ethernet header plus ARP payload
/// is 42 bytes; 128 leaves room for VLAN tags.
const SNAPLEN: i32 = 128;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to open capture on interface `{interface}`: {source}")]
    Open {
        interface: String,
        source: pcap::Error,
    },
    #[error("interface `{interface}` delivers {linktype:?} frames, expected Ethernet")]
    LinkType {
        interface: String,
        linktype: Linktype,
    },
    #[error("failed to install capture filter `{filter}`: {source}")]
    Filter { filter: String, source: pcap::Error },
}

/// A sequential, blocking feed of raw link-layer frames.
///
/// The live session implements this over the capture handle; tests implement
/// it over a finite in-memory script.
pub trait FrameSource {
    /// Blocks until the next frame arrives. `None` means the feed has ended
    /// and will not produce again.
    fn next_frame(&mut self) -> Option<Vec<u8>>;
}

/// A live capture bound to one interface, filter installed, ready to feed
/// frames. The underlying handle is closed when the session drops, on every
/// exit path.
pub struct CaptureSession {
    cap: Capture<Active>,
}

impl CaptureSession {
    /// Opens a promiscuous live capture on `interface` and installs the
    /// press filter for `registry`.
    ///
    /// A read timeout of zero blocks until a frame arrives instead of
    /// polling. Open and filter failures are unrecoverable environment
    /// errors; the operator fixes permissions or configuration and restarts.
    pub fn open(interface: &str, registry: &Registry) -> Result<Self, CaptureError> {
        let cap = Capture::from_device(interface)
            .and_then(|inactive| inactive.promisc(true).snaplen(SNAPLEN).timeout(0).open())
            .map_err(|source| CaptureError::Open {
                interface: interface.to_string(),
                source,
            })?;

        let linktype = cap.get_datalink();
        if linktype != Linktype::ETHERNET {
            return Err(CaptureError::LinkType {
                interface: interface.to_string(),
                linktype,
            });
        }

        let mut cap = cap;
        let filter = press_filter(registry);
        cap.filter(&filter, true)
            .map_err(|source| CaptureError::Filter {
                filter: filter.clone(),
                source,
            })?;
        debug!(%filter, "capture filter installed");

        Ok(Self { cap })
    }
}

impl FrameSource for CaptureSession {
    fn next_frame(&mut self) -> Option<Vec<u8>> {
        loop {
            match self.cap.next_packet() {
                Ok(packet) => return Some(packet.data.to_vec()),
                // A zero read timeout should block forever, but some
                // backends still wake up empty-handed. Keep waiting.
                Err(pcap::Error::TimeoutExpired) => continue,
                Err(e) => {
                    error!("capture feed ended: {e}");
                    return None;
                }
            }
        }
    }
}

/// Builds the filter expression selecting ARP frames whose source is a
/// registered device. Addresses are sorted so registries holding the same
/// set produce the identical expression regardless of registration order.
pub fn press_filter(registry: &Registry) -> String {
    let mut sources: Vec<String> = registry
        .iter()
        .map(|device| format!("ether src {}", device.mac()))
        .collect();
    sources.sort();
    format!("arp and ({})", sources.join(" or "))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
