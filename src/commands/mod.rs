// Command handlers module
pub mod config;
pub mod run;

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

// Re-exports for cleaner imports
pub use config::execute as config;
pub use run::execute as run;

fn face_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("fast-ms")
                .long("fast-ms")
                .value_name("MILLIS")
                .help("Clock, battery and activity refresh interval")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("slow-secs")
                .long("slow-secs")
                .value_name("SECONDS")
                .help("Weather refresh interval")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("bar-width")
                .long("bar-width")
                .value_name("CELLS")
                .help("Width of the battery bar")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("timeout-secs")
                .long("timeout-secs")
                .value_name("SECONDS")
                .help("Upper bound for a single feed request")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("lat")
                .long("lat")
                .value_name("DEGREES")
                .help("Fixed latitude for the weather (skips IP lookup)")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .requires("lon"),
        )
        .arg(
            Arg::new("lon")
                .long("lon")
                .value_name("DEGREES")
                .help("Fixed longitude for the weather")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .requires("lat"),
        )
        .arg(
            Arg::new("no-activity")
                .long("no-activity")
                .help("Do not read activity data")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("plain")
                .long("plain")
                .help("Print coloured text frames instead of the full-screen face")
                .action(ArgAction::SetTrue)
                .conflicts_with("json"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print one JSON snapshot per line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .help("Print a single frame and exit (waits for the weather up to the timeout)")
                .action(ArgAction::SetTrue),
        )
}

/// Command-line definition shared by the binary and the tests
pub fn build_cli() -> Command {
    let root = Command::new("termface")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A terminal-prompt styled status face")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Config file (defaults to <config dir>/termface/config.json)")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log feed activity to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(face_args(
            Command::new("run").about("Show the face (default when no subcommand is given)"),
        ))
        .subcommand(
            Command::new("config")
                .about("Show or create the config file")
                .arg(
                    Arg::new("init")
                        .long("init")
                        .help("Write a config file with the defaults")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Overwrite an existing file with --init")
                        .action(ArgAction::SetTrue)
                        .requires("init"),
                ),
        );

    face_args(root)
}
