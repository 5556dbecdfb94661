mod commands;
mod terminal;

use commands::{CommandLine, Commands, interfaces, listen};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    terminal::logging::init();

    match commands.command {
        Commands::Listen {
            interface,
            buttons,
            debounce_ms,
        } => listen::listen(interface, buttons, debounce_ms),
        Commands::Interfaces => Ok(interfaces::interfaces()),
    }
}
