// Steam only reports a library for public profiles, and the friends list
// for accounts that share it. Either one being private ends the run.

use api::HttpSteamApi;
use cache::CachedSteam;
use clap::ArgMatches;
use config::Config;
use error::Error;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

mod account;
mod api;
mod cache;
mod cli;
mod common;
mod config;
mod error;
mod game;

fn main() {
    let matches = cli::build_command().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("WARNING: failed to initialize logging.");
    }

    if let Err(err) = run(&matches) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let config = Config::load(cli::overrides(matches))?;

    let mut steam = CachedSteam::new(HttpSteamApi::new(&config.api_key), &config.steam_id);
    log::debug!("primary account: {}", steam.primary_id());

    let app_ids = common::games_in_common(&mut steam, &config.personas)?;
    let games = common::resolve_games(&mut steam, &app_ids)?;

    common::print_report(&config.tag, &common::coop_games(&games, &config.tag));

    Ok(())
}
