use crate::account::Account;
use crate::api::SteamApi;
use crate::error::Error;
use crate::game::Game;
use log::warn;
use std::collections::HashMap;

/// Memoizes lookups for the lifetime of one run.
///
/// Keys are Steam IDs or app IDs; `None` as a Steam ID means the primary
/// account and shares its entry. Failed lookups are not stored, so asking
/// again hits the network again.
pub struct CachedSteam<A> {
    api: A,
    primary_id: String,
    contacts: HashMap<String, Vec<Account>>,
    owned_games: HashMap<String, Vec<u32>>,
    details: HashMap<u32, Game>,
}

impl<A: SteamApi> CachedSteam<A> {
    pub fn new(api: A, primary_id: &str) -> Self {
        Self {
            api,
            primary_id: primary_id.to_string(),
            contacts: HashMap::new(),
            owned_games: HashMap::new(),
            details: HashMap::new(),
        }
    }

    pub fn primary_id(&self) -> &str {
        &self.primary_id
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    fn key(&self, steam_id: Option<&str>) -> String {
        steam_id.unwrap_or(self.primary_id.as_str()).to_string()
    }

    /// Contacts of `steam_id` (default: primary) with full profiles.
    pub fn contacts(&mut self, steam_id: Option<&str>) -> Result<Vec<Account>, Error> {
        let steam_id = self.key(steam_id);
        if let Some(hit) = self.contacts.get(&steam_id) {
            return Ok(hit.clone());
        }

        let ids = self.api.friend_ids(&steam_id)?;
        let accounts = if ids.is_empty() {
            Vec::new()
        } else {
            self.api.player_summaries(&ids)?
        };

        self.contacts.insert(steam_id, accounts.clone());
        Ok(accounts)
    }

    /// App IDs owned by `steam_id` (default: primary).
    pub fn owned_games(&mut self, steam_id: Option<&str>) -> Result<Vec<u32>, Error> {
        let steam_id = self.key(steam_id);
        if let Some(hit) = self.owned_games.get(&steam_id) {
            return Ok(hit.clone());
        }

        let games = self.api.owned_games(&steam_id)?;
        self.owned_games.insert(steam_id, games.clone());
        Ok(games)
    }

    /// Store details for `app_id`, or an empty placeholder if the store has none.
    pub fn game_details(&mut self, app_id: u32) -> Result<Game, Error> {
        if let Some(hit) = self.details.get(&app_id) {
            return Ok(hit.clone());
        }

        let game = match self.api.app_details(app_id)? {
            Some(game) => game,
            None => {
                warn!("unable to fetch for game ID {app_id}");
                Game::placeholder()
            }
        };

        self.details.insert(app_id, game.clone());
        Ok(game)
    }
}

/// In-memory Steam with call counters.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;

    #[derive(Default)]
    pub struct FakeSteam {
        pub friends: HashMap<String, Vec<String>>,
        pub players: HashMap<String, Account>,
        pub libraries: HashMap<String, Vec<u32>>,
        pub apps: HashMap<u32, Game>,
        /// Steam IDs whose next owned-games lookup fails with a rate limit.
        pub flaky: RefCell<HashSet<String>>,

        pub friend_calls: Cell<usize>,
        pub summary_calls: Cell<usize>,
        pub owned_calls: Cell<usize>,
        pub detail_calls: Cell<usize>,
    }

    impl FakeSteam {
        pub fn with_library(mut self, steam_id: &str, games: &[u32]) -> Self {
            self.libraries.insert(steam_id.to_string(), games.to_vec());
            self
        }

        pub fn with_friend(mut self, of: &str, friend: Account) -> Self {
            self.friends
                .entry(of.to_string())
                .or_default()
                .push(friend.steam_id.clone());
            self.players.insert(friend.steam_id.clone(), friend);
            self
        }

        pub fn with_app(mut self, app_id: u32, game: Game) -> Self {
            self.apps.insert(app_id, game);
            self
        }

        pub fn total_calls(&self) -> usize {
            self.friend_calls.get()
                + self.summary_calls.get()
                + self.owned_calls.get()
                + self.detail_calls.get()
        }
    }

    fn bump(counter: &Cell<usize>) {
        counter.set(counter.get() + 1);
    }

    impl SteamApi for FakeSteam {
        fn friend_ids(&self, steam_id: &str) -> Result<Vec<String>, Error> {
            bump(&self.friend_calls);
            Ok(self.friends.get(steam_id).cloned().unwrap_or_default())
        }

        fn player_summaries(&self, steam_ids: &[String]) -> Result<Vec<Account>, Error> {
            bump(&self.summary_calls);
            // Steam does not keep request order; neither do we.
            Ok(steam_ids
                .iter()
                .rev()
                .filter_map(|id| self.players.get(id).cloned())
                .collect())
        }

        fn owned_games(&self, steam_id: &str) -> Result<Vec<u32>, Error> {
            bump(&self.owned_calls);
            if self.flaky.borrow_mut().remove(steam_id) {
                return Err(Error::RateLimited);
            }
            self.libraries
                .get(steam_id)
                .cloned()
                .ok_or_else(|| Error::PrivateProfile(steam_id.to_string()))
        }

        fn app_details(&self, app_id: u32) -> Result<Option<Game>, Error> {
            bump(&self.detail_calls);
            Ok(self.apps.get(&app_id).cloned())
        }
    }
}
