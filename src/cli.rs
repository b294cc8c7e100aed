use crate::config::{Overrides, API_KEY_ENV};
use clap::{command, Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::path::PathBuf;

pub fn build_command() -> Command {
    command!().args([
        Arg::new("api_key")
            .short('k')
            .long("api-key")
            .alias("key")
            .required(false)
            .value_hint(ValueHint::FilePath)
            .value_name("PATH")
            .help("Path to a file containing a Steam API key."),
        Arg::new("config")
            .short('c')
            .long("config-file")
            .alias("config")
            .required(false)
            .value_hint(ValueHint::FilePath)
            .value_name("PATH")
            .help("Path to the YAML config file."),
        Arg::new("steam_id")
            .short('s')
            .long("steam-id")
            .required(false)
            .value_name("ID")
            .help("Steam ID of the account whose friends are compared."),
        Arg::new("personas")
            .short('p')
            .long("personas")
            .alias("friends")
            .required(false)
            .value_delimiter(',')
            .value_name("NAMES")
            .help("Comma-separated persona names of the friends to compare with."),
        Arg::new("tag")
            .short('t')
            .long("tag")
            .required(false)
            .value_name("CATEGORY")
            .help("Store category a game must have. Defaults to \"online co-op\"."),
        Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Log every request."),
    ])
}

/// Collects the command line, plus `$STEAM_API_KEY`, into config overrides.
pub fn overrides(matches: &ArgMatches) -> Overrides {
    let string = |id: &str| matches.get_one::<String>(id).cloned();

    Overrides {
        config_file: string("config").map(PathBuf::from),
        api_key_file: string("api_key").map(PathBuf::from),
        api_key: std::env::var(API_KEY_ENV).ok(),
        steam_id: string("steam_id"),
        personas: matches
            .get_many::<String>("personas")
            .map(|names| names.cloned().collect()),
        tag: string("tag"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn personas_are_split_on_commas() {
        let matches = build_command()
            .try_get_matches_from(["coop-common", "--steam-id", "1", "--personas", "brey,kat"])
            .unwrap();
        let overrides = overrides(&matches);

        assert_eq!(overrides.steam_id.as_deref(), Some("1"));
        assert_eq!(
            overrides.personas,
            Some(vec!["brey".to_string(), "kat".to_string()])
        );
        assert!(overrides.config_file.is_none());
    }

    #[test]
    fn command_is_well_formed() {
        build_command().debug_assert();
    }
}
