use crate::error::Error;
use json::JsonValue;

/// A Steam user, as returned by `GetPlayerSummaries`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub steam_id: String,
    /// Always lowercase, so persona filters compare case-insensitively.
    pub persona_name: String,
    pub avatar: String,
    pub avatar_medium: String,
    pub avatar_full: String,
}

impl Account {
    #[cfg(test)]
    pub fn new(steam_id: &str, persona_name: &str) -> Self {
        Self {
            steam_id: steam_id.to_string(),
            persona_name: persona_name.to_lowercase(),
            avatar: String::new(),
            avatar_medium: String::new(),
            avatar_full: String::new(),
        }
    }

    fn from_json(player: &JsonValue) -> Result<Self, Error> {
        let url = |key: &str| player[key].as_str().unwrap_or_default().to_string();

        Ok(Self {
            steam_id: required_str(player, "steamid")?.to_string(),
            persona_name: required_str(player, "personaname")?.to_lowercase(),
            avatar: url("avatar"),
            avatar_medium: url("avatarmedium"),
            avatar_full: url("avatarfull"),
        })
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.persona_name)
    }
}

fn required_str<'a>(value: &'a JsonValue, key: &str) -> Result<&'a str, Error> {
    value[key]
        .as_str()
        .ok_or_else(|| Error::UnexpectedShape(format!("missing string field `{key}`")))
}

/// Parses a `GetFriendList` body into the contacts' Steam IDs.
pub fn decode_friend_ids(body: &str) -> Result<Vec<String>, Error> {
    let parsed = json::parse(body)?;
    let friends = &parsed["friendslist"]["friends"];

    if !friends.is_array() {
        return Err(Error::UnexpectedShape(
            "`friendslist.friends` is not an array".to_string(),
        ));
    }

    friends
        .members()
        .map(|f| required_str(f, "steamid").map(str::to_string))
        .collect()
}

/// Parses a `GetPlayerSummaries` body, keeping the order Steam returned.
pub fn decode_players(body: &str) -> Result<Vec<Account>, Error> {
    let parsed = json::parse(body)?;
    let players = &parsed["response"]["players"];

    if !players.is_array() {
        return Err(Error::UnexpectedShape(
            "`response.players` is not an array".to_string(),
        ));
    }

    players.members().map(Account::from_json).collect()
}
