use pnet::util::MacAddr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("`{text}` is not a valid hardware address")]
pub struct MacParseError {
    text: String,
}

/// Parses a textual hardware address into its 6-byte form.
///
/// Accepts colon- or hyphen-separated hex byte notation in either case
/// (`AA:BB:CC:DD:EE:01`, `aa-bb-cc-dd-ee-01`). Everything downstream works
/// on the returned [`MacAddr`], so textual quirks never reach the match path.
pub fn parse_mac(text: &str) -> Result<MacAddr, MacParseError> {
    text.trim()
        .replace('-', ":")
        .to_ascii_lowercase()
        .parse()
        .map_err(|_| MacParseError {
            text: text.to_string(),
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
