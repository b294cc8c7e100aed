use crate::api::SteamApi;
use crate::cache::CachedSteam;
use crate::error::Error;
use crate::game::Game;
use log::info;
use std::collections::{BTreeSet, HashSet};

/// App IDs owned by the primary account and by every contact whose
/// persona name is in `personas`.
///
/// Names must already be lowercase. A name that matches nobody is ignored.
/// Distinct accounts sharing a name each narrow the result.
pub fn games_in_common<A: SteamApi>(
    steam: &mut CachedSteam<A>,
    personas: &HashSet<String>,
) -> Result<BTreeSet<u32>, Error> {
    let mut common: BTreeSet<u32> = steam.owned_games(None)?.into_iter().collect();

    if personas.is_empty() {
        info!("{} games in common", common.len());
        return Ok(common);
    }

    let mut compared: HashSet<String> = HashSet::new();

    for contact in steam.contacts(None)? {
        if !personas.contains(&contact.persona_name) || !compared.insert(contact.steam_id.clone())
        {
            continue;
        }

        let theirs: HashSet<u32> = steam
            .owned_games(Some(contact.steam_id.as_str()))?
            .into_iter()
            .collect();
        info!("comparing games with {contact}");
        common.retain(|app_id| theirs.contains(app_id));
    }

    info!("{} games in common", common.len());
    Ok(common)
}

/// Store details for each app, in app ID order.
pub fn resolve_games<A: SteamApi>(
    steam: &mut CachedSteam<A>,
    app_ids: &BTreeSet<u32>,
) -> Result<Vec<Game>, Error> {
    app_ids.iter().map(|&id| steam.game_details(id)).collect()
}

/// Names of the games tagged with `tag`.
pub fn coop_games(games: &[Game], tag: &str) -> Vec<String> {
    games
        .iter()
        .filter(|g| g.has_category(tag))
        .map(|g| g.name.clone())
        .collect()
}

pub fn report_line(tag: &str, names: &[String]) -> String {
    format!("{tag} games in common: {names:?}")
}

pub fn print_report(tag: &str, names: &[String]) {
    println!("{}", report_line(tag, names));
}
