pub mod interfaces;
pub mod listen;

use std::str::FromStr;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wakewatch")]
#[command(about = "Run commands when wireless buttons wake up on the network.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Listen for button presses on an interface
    #[command(alias = "l")]
    Listen {
        /// Interface to capture on (see `wakewatch interfaces`)
        #[arg(short, long)]
        interface: String,
        /// Button registration as `name=MAC=command`, repeatable
        #[arg(short, long = "button", required = true)]
        buttons: Vec<ButtonArg>,
        /// Collapse probes retransmitted within this many milliseconds
        /// into a single press
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
    /// List capture-capable network interfaces
    #[command(alias = "i")]
    Interfaces,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// One `--button` occurrence: a label, the textual hardware address, and the
/// shell command to run on a press.
///
/// The address is kept textual here; it is parsed and validated when the
/// registry is built, before any capture starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonArg {
    pub name: String,
    pub hw_addr: String,
    pub command: String,
}

impl FromStr for ButtonArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '=');
        let name = parts.next().unwrap_or_default().trim();
        let hw_addr = parts.next().unwrap_or_default().trim();
        let command = parts.next().unwrap_or_default().trim();

        if name.is_empty() || hw_addr.is_empty() || command.is_empty() {
            return Err(format!("invalid button `{s}`, expected name=MAC=command"));
        }

        Ok(ButtonArg {
            name: name.to_string(),
            hw_addr: hw_addr.to_string(),
            command: command.to_string(),
        })
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
