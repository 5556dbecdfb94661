//! # Device Registry
//!
//! The data model shared by the capture and dispatch stages: a device is a
//! named hardware address with an action bound to it, and the registry is the
//! ordered, read-only collection of devices a listening session works from.

use std::fmt;

use pnet::util::MacAddr;
use thiserror::Error;
use tracing::warn;

use crate::network::mac::{self, MacParseError};

/// A unit of work fired when a device presses in.
///
/// Any zero-argument closure is an action via the blanket implementation;
/// implement the trait directly when the action carries its own state.
pub trait Action: Send + Sync {
    fn invoke(&self);
}

impl<F> Action for F
where
    F: Fn() + Send + Sync,
{
    fn invoke(&self) {
        self()
    }
}

#[derive(Debug, Error)]
#[error("device `{name}`: {source}")]
pub struct DeviceError {
    name: String,
    source: MacParseError,
}

/// A registered button: a label for logging, the parsed hardware address it
/// transmits from, and the action to run when it does.
pub struct Device {
    name: String,
    mac: MacAddr,
    action: Box<dyn Action>,
}

impl Device {
    /// Builds a device from its textual hardware address.
    ///
    /// Parsing happens here, once. An address that does not parse is a
    /// configuration error and nothing downstream ever sees the device.
    pub fn new(
        name: impl Into<String>,
        hw_addr: &str,
        action: impl Action + 'static,
    ) -> Result<Self, DeviceError> {
        let name = name.into();
        let mac = mac::parse_mac(hw_addr).map_err(|source| DeviceError {
            name: name.clone(),
            source,
        })?;
        Ok(Self {
            name,
            mac,
            action: Box::new(action),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mac(&self) -> MacAddr {
        self.mac
    }

    pub fn action(&self) -> &dyn Action {
        self.action.as_ref()
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("name", &self.name)
            .field("mac", &self.mac)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no devices registered, nothing to listen for")]
    Empty,
}

/// The ordered set of devices a session listens for.
///
/// Created once before capture starts and read-only from then on. Hardware
/// addresses are expected to be unique; duplicates are not removed, the
/// earlier registration wins on lookup.
#[derive(Debug)]
pub struct Registry {
    devices: Vec<Device>,
}

impl Registry {
    pub fn new(devices: Vec<Device>) -> Result<Self, RegistryError> {
        if devices.is_empty() {
            return Err(RegistryError::Empty);
        }
        for (i, device) in devices.iter().enumerate() {
            if devices[..i].iter().any(|d| d.mac == device.mac) {
                warn!(
                    device = device.name(),
                    mac = %device.mac,
                    "duplicate hardware address, earlier registration wins"
                );
            }
        }
        Ok(Self { devices })
    }

    /// Byte-for-byte lookup on the 6-byte form. Linear scan; registries hold
    /// dozens of devices, not thousands.
    pub fn find(&self, mac: MacAddr) -> Option<&Device> {
        self.devices.iter().find(|d| d.mac == mac)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
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
