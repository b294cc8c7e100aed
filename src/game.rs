use crate::error::Error;
use json::JsonValue;
use std::collections::HashSet;

/// Store metadata for one app.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    pub name: String,
    /// Lowercased category descriptions, e.g. `"online co-op"`.
    pub categories: HashSet<String>,
}

impl Game {
    #[cfg(test)]
    pub fn new(name: &str, categories: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            categories: categories.iter().map(|c| c.to_lowercase()).collect(),
        }
    }

    /// Stand-in for an app whose store page could not be fetched.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn has_category(&self, tag: &str) -> bool {
        self.categories.contains(tag)
    }

    fn from_json(data: &JsonValue) -> Result<Self, Error> {
        let Some(name) = data["name"].as_str() else {
            return Err(Error::UnexpectedShape(
                "app details without `name`".to_string(),
            ));
        };

        // Plenty of apps (soundtracks, tools) carry no categories at all.
        let categories = data["categories"]
            .members()
            .filter_map(|c| c["description"].as_str())
            .map(str::to_lowercase)
            .collect();

        Ok(Self {
            name: name.to_string(),
            categories,
        })
    }
}

/// Parses a `GetOwnedGames` body into app IDs.
///
/// Steam answers `{"response":{}}` for a private library, which is
/// reported as [`Error::PrivateProfile`]. A public library with nothing in
/// it carries `game_count: 0` and no `games` array.
pub fn decode_owned_games(body: &str, steam_id: &str) -> Result<Vec<u32>, Error> {
    let parsed = json::parse(body)?;
    let response = &parsed["response"];

    if !response.is_object() {
        return Err(Error::UnexpectedShape(
            "`response` is not an object".to_string(),
        ));
    }

    let games = &response["games"];
    if !games.is_array() {
        return match response["game_count"].as_u32() {
            Some(0) => Ok(Vec::new()),
            _ => Err(Error::PrivateProfile(steam_id.to_string())),
        };
    }

    games
        .members()
        .map(|g| {
            g["appid"]
                .as_u32()
                .ok_or_else(|| Error::UnexpectedShape("owned game without `appid`".to_string()))
        })
        .collect()
}

/// Parses an `appdetails` body for a single app.
///
/// `Ok(None)` means the store had nothing to give for this app (delisted,
/// region locked, ...). Anything else malformed is an error.
pub fn decode_app_details(body: &str, app_id: u32) -> Result<Option<Game>, Error> {
    let parsed = json::parse(body)?;
    let key = app_id.to_string();
    let entry = &parsed[key.as_str()];

    if !entry.is_object() {
        return Err(Error::UnexpectedShape(format!(
            "no entry for app {app_id} in app details"
        )));
    }

    if entry["success"].as_bool() == Some(false) || !entry["data"].is_object() {
        return Ok(None);
    }

    Game::from_json(&entry["data"]).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_games_app_ids() {
        let body = r#"{"response":{"game_count":3,"games":[
            {"appid":10,"playtime_forever":32},
            {"appid":240,"playtime_forever":0},
            {"appid":550,"playtime_forever":1200}
        ]}}"#;

        assert_eq!(decode_owned_games(body, "1").unwrap(), vec![10, 240, 550]);
    }

    #[test]
    fn private_library() {
        let err = decode_owned_games(r#"{"response":{}}"#, "76561197970430959").unwrap_err();
        assert!(matches!(err, Error::PrivateProfile(id) if id == "76561197970430959"));
    }

    #[test]
    fn empty_public_library() {
        let body = r#"{"response":{"game_count":0}}"#;
        assert!(decode_owned_games(body, "1").unwrap().is_empty());
    }

    #[test]
    fn app_details_categories_lowercased() {
        let body = r#"{"550":{"success":true,"data":{
            "name":"Left 4 Dead 2",
            "categories":[
                {"id":1,"description":"Multi-player"},
                {"id":38,"description":"Online Co-op"}
            ]
        }}}"#;

        let game = decode_app_details(body, 550).unwrap().unwrap();
        assert_eq!(game.name, "Left 4 Dead 2");
        assert!(game.has_category("online co-op"));
        assert!(game.has_category("multi-player"));
        assert_eq!(game.categories.len(), 2);
    }

    #[test]
    fn app_details_without_categories() {
        let body = r#"{"7":{"success":true,"data":{"name":"Soundtrack"}}}"#;
        let game = decode_app_details(body, 7).unwrap().unwrap();
        assert!(game.categories.is_empty());
    }

    #[test]
    fn app_details_missing_payload() {
        assert_eq!(decode_app_details(r#"{"42":{"success":false}}"#, 42).unwrap(), None);
        assert_eq!(decode_app_details(r#"{"42":{"success":true}}"#, 42).unwrap(), None);
    }

    #[test]
    fn app_details_for_another_app() {
        assert!(matches!(
            decode_app_details(r#"{"1":{"success":false}}"#, 42),
            Err(Error::UnexpectedShape(_))
        ));
    }

    #[test]
    fn placeholder_is_empty() {
        let game = Game::placeholder();
        assert!(game.name.is_empty());
        assert!(game.categories.is_empty());
    }
}
