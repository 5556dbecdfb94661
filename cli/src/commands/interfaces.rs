use pnet::datalink;

/// Prints the interfaces a capture could be opened on, so the operator can
/// pick a `--interface` value.
pub fn interfaces() {
    let mut interfaces = datalink::interfaces();
    interfaces.sort_by_key(|interface| interface.index);

    for interface in interfaces {
        let state = if interface.is_up() { "up" } else { "down" };
        let mac = interface
            .mac
            .map(|mac| mac.to_string())
            .unwrap_or_else(|| "-".to_string());
        let ips = interface
            .ips
            .iter()
            .map(|net| net.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        println!("{:<16} {:<5} {:<18} {}", interface.name, state, mac, ips);
    }
}
