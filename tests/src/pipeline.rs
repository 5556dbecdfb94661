//! End-to-end dispatch over realistic ARP probe frames: registry in, counter
//! actions out, with the frame feed scripted instead of captured live.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pnet::util::MacAddr;
use wakewatch_common::config::Config;
use wakewatch_common::device::{Device, Registry};
use wakewatch_core::{Dispatcher, press_filter};

use crate::util::{ScriptedFrames, probe_frame};

const KITCHEN: MacAddr = MacAddr(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x01);
const GARAGE: MacAddr = MacAddr(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x02);
const STRANGER: MacAddr = MacAddr(0xff, 0xff, 0xff, 0xff, 0xff, 0xff);

fn counter_device(name: &str, addr: &str, counter: &Arc<AtomicUsize>) -> Device {
    let counter = counter.clone();
    Device::new(name, addr, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .expect("valid device")
}

#[test]
fn presses_route_to_the_matching_device_only() {
    let kitchen = Arc::new(AtomicUsize::new(0));
    let garage = Arc::new(AtomicUsize::new(0));
    let registry = Registry::new(vec![
        counter_device("kitchen", "AA:BB:CC:DD:EE:01", &kitchen),
        counter_device("garage", "AA:BB:CC:DD:EE:02", &garage),
    ])
    .expect("non-empty registry");

    let mut frames = ScriptedFrames::new(vec![
        probe_frame(KITCHEN),
        probe_frame(GARAGE),
        probe_frame(KITCHEN),
        probe_frame(STRANGER),
    ]);
    Dispatcher::new(&registry, &Config::default()).run(&mut frames);

    assert_eq!(kitchen.load(Ordering::SeqCst), 2);
    assert_eq!(garage.load(Ordering::SeqCst), 1);
}

#[test]
fn press_order_is_preserved_across_devices() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let recorder = |label: &'static str| {
        let order = order.clone();
        move || order.lock().unwrap().push(label)
    };
    let registry = Registry::new(vec![
        Device::new("kitchen", "aa:bb:cc:dd:ee:01", recorder("kitchen")).unwrap(),
        Device::new("garage", "aa:bb:cc:dd:ee:02", recorder("garage")).unwrap(),
    ])
    .unwrap();

    let mut frames = ScriptedFrames::new(vec![
        probe_frame(GARAGE),
        probe_frame(KITCHEN),
        probe_frame(GARAGE),
    ]);
    Dispatcher::new(&registry, &Config::default()).run(&mut frames);

    assert_eq!(*order.lock().unwrap(), vec!["garage", "kitchen", "garage"]);
}

#[test]
fn one_faulty_action_cannot_silence_the_rest() {
    let garage = Arc::new(AtomicUsize::new(0));
    let registry = Registry::new(vec![
        Device::new("kitchen", "aa:bb:cc:dd:ee:01", || panic!("bad action")).unwrap(),
        counter_device("garage", "aa:bb:cc:dd:ee:02", &garage),
    ])
    .unwrap();

    let mut frames = ScriptedFrames::new(vec![
        probe_frame(KITCHEN),
        probe_frame(GARAGE),
        probe_frame(KITCHEN),
        probe_frame(GARAGE),
    ]);
    Dispatcher::new(&registry, &Config::default()).run(&mut frames);

    assert_eq!(garage.load(Ordering::SeqCst), 2);
}

#[test]
fn retransmit_burst_counts_once_with_debounce() {
    let kitchen = Arc::new(AtomicUsize::new(0));
    let registry = Registry::new(vec![counter_device(
        "kitchen",
        "aa:bb:cc:dd:ee:01",
        &kitchen,
    )])
    .unwrap();
    let config = Config {
        debounce: Some(Duration::from_secs(30)),
    };

    let burst = vec![probe_frame(KITCHEN); 4];
    Dispatcher::new(&registry, &config).run(&mut ScriptedFrames::new(burst));

    assert_eq!(kitchen.load(Ordering::SeqCst), 1);
}

#[test]
fn filter_covers_every_registered_device() {
    let registry = Registry::new(vec![
        counter_device("kitchen", "aa:bb:cc:dd:ee:01", &Arc::new(AtomicUsize::new(0))),
        counter_device("garage", "aa-bb-cc-dd-ee-02", &Arc::new(AtomicUsize::new(0))),
    ])
    .unwrap();

    let filter = press_filter(&registry);
    assert!(filter.starts_with("arp and ("));
    assert!(filter.contains("ether src aa:bb:cc:dd:ee:01"));
    assert!(filter.contains("ether src aa:bb:cc:dd:ee:02"));
}

#[test]
fn an_empty_feed_dispatches_nothing_and_returns() {
    let kitchen = Arc::new(AtomicUsize::new(0));
    let registry = Registry::new(vec![counter_device(
        "kitchen",
        "aa:bb:cc:dd:ee:01",
        &kitchen,
    )])
    .unwrap();

    Dispatcher::new(&registry, &Config::default()).run(&mut ScriptedFrames::new(Vec::new()));

    assert_eq!(kitchen.load(Ordering::SeqCst), 0);
}
