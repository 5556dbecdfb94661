use std::collections::VecDeque;
use std::net::Ipv4Addr;

use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, MutableEthernetPacket};
use pnet::util::MacAddr;
use wakewatch_core::FrameSource;

pub const ETH_HDR_LEN: usize = 14;
pub const ARP_LEN: usize = 28;

/// Builds the wake-up frame a button broadcasts: an ARP probe (sender
/// protocol address all zeroes) from `source`, addressed to everyone.
pub fn probe_frame(source: MacAddr) -> Vec<u8> {
    let mut buf = vec![0u8; ETH_HDR_LEN + ARP_LEN];
    {
        let mut eth = MutableEthernetPacket::new(&mut buf).expect("ethernet buffer");
        eth.set_destination(MacAddr::broadcast());
        eth.set_source(source);
        eth.set_ethertype(EtherTypes::Arp);
    }
    {
        let mut arp = MutableArpPacket::new(&mut buf[ETH_HDR_LEN..]).expect("arp buffer");
        arp.set_hardware_type(ArpHardwareTypes::Ethernet);
        arp.set_protocol_type(EtherTypes::Ipv4);
        arp.set_hw_addr_len(6);
        arp.set_proto_addr_len(4);
        arp.set_operation(ArpOperations::Request);
        arp.set_sender_hw_addr(source);
        arp.set_sender_proto_addr(Ipv4Addr::UNSPECIFIED);
        arp.set_target_hw_addr(MacAddr::zero());
        arp.set_target_proto_addr(Ipv4Addr::new(192, 168, 1, 1));
    }
    buf
}

/// A finite, in-memory frame feed standing in for a live capture.
pub struct ScriptedFrames {
    frames: VecDeque<Vec<u8>>,
}

impl ScriptedFrames {
    pub fn new(frames: Vec<Vec<u8>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl FrameSource for ScriptedFrames {
    fn next_frame(&mut self) -> Option<Vec<u8>> {
        self.frames.pop_front()
    }
}
