use anyhow::Result;
use colored::*;

use termface::commands;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = commands::build_cli().get_matches();

    termface::init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run(sub_matches),
        Some(("config", sub_matches)) => commands::config(sub_matches),
        _ => commands::run(&matches),
    }
}
