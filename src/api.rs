use crate::account::{self, Account};
use crate::error::Error;
use crate::game::{self, Game};
use log::debug;
use reqwest::StatusCode;

const API_BASE: &str = "http://api.steampowered.com";
const STORE_BASE: &str = "http://store.steampowered.com";

const FRIEND_LIST_PATH: &str = "/ISteamUser/GetFriendList/v0001/";
const PLAYER_SUMMARIES_PATH: &str = "/ISteamUser/GetPlayerSummaries/v0002/";
const OWNED_GAMES_PATH: &str = "/IPlayerService/GetOwnedGames/v0001/";
const APP_DETAILS_PATH: &str = "/api/appdetails";

/// `GetPlayerSummaries` accepts at most this many IDs per request.
pub const SUMMARIES_BATCH: usize = 100;

/// Raw lookups against Steam. Every call goes over the network.
pub trait SteamApi {
    fn friend_ids(&self, steam_id: &str) -> Result<Vec<String>, Error>;

    /// Profiles for `steam_ids`, in whatever order Steam sends them back.
    fn player_summaries(&self, steam_ids: &[String]) -> Result<Vec<Account>, Error>;

    fn owned_games(&self, steam_id: &str) -> Result<Vec<u32>, Error>;

    /// `None` when the store has no data for the app.
    fn app_details(&self, app_id: u32) -> Result<Option<Game>, Error>;
}

pub struct HttpSteamApi {
    client: reqwest::blocking::Client,
    api_key: String,
    api_base: String,
    store_base: String,
}

impl HttpSteamApi {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.trim().to_string(),
            api_base: API_BASE.to_string(),
            store_base: STORE_BASE.to_string(),
        }
    }

    /// Same client aimed at local hosts, bypassing any configured proxy.
    #[cfg(test)]
    fn with_hosts(api_key: &str, api_base: &str, store_base: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .no_proxy()
                .build()
                .unwrap(),
            api_base: api_base.to_string(),
            store_base: store_base.to_string(),
            ..Self::new(api_key)
        }
    }

    fn get(&self, base: &str, path: &str, query: &[(&str, &str)]) -> Result<String, Error> {
        let url = format!("{base}{path}");
        debug!("GET {url}");

        let response = self.client.get(&url).query(query).send()?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimited),
            _ => Ok(response.error_for_status()?.text()?),
        }
    }
}

impl SteamApi for HttpSteamApi {
    fn friend_ids(&self, steam_id: &str) -> Result<Vec<String>, Error> {
        let body = self.get(
            &self.api_base,
            FRIEND_LIST_PATH,
            &[
                ("key", self.api_key.as_str()),
                ("steamid", steam_id),
                ("format", "json"),
            ],
        )?;

        account::decode_friend_ids(&body)
    }

    fn player_summaries(&self, steam_ids: &[String]) -> Result<Vec<Account>, Error> {
        let mut players = Vec::with_capacity(steam_ids.len());

        for batch in steam_ids.chunks(SUMMARIES_BATCH) {
            let ids = batch.join(",");
            let body = self.get(
                &self.api_base,
                PLAYER_SUMMARIES_PATH,
                &[
                    ("key", self.api_key.as_str()),
                    ("format", "json"),
                    ("steamids", ids.as_str()),
                ],
            )?;
            players.extend(account::decode_players(&body)?);
        }

        Ok(players)
    }

    fn owned_games(&self, steam_id: &str) -> Result<Vec<u32>, Error> {
        let body = self.get(
            &self.api_base,
            OWNED_GAMES_PATH,
            &[
                ("key", self.api_key.as_str()),
                ("steamid", steam_id),
                ("format", "json"),
            ],
        )?;

        game::decode_owned_games(&body, steam_id)
    }

    fn app_details(&self, app_id: u32) -> Result<Option<Game>, Error> {
        let app_id_str = app_id.to_string();
        let body = self.get(
            &self.store_base,
            APP_DETAILS_PATH,
            &[("appids", app_id_str.as_str())],
        )?;

        game::decode_app_details(&body, app_id)
    }
}
