use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Date format the blog API stores and expects.
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";
/// Date format shown to the user.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// A blog post as returned by the remote origin.
///
/// The identifier is assigned by the server; the client never builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub author: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub create_date: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub update_date: String,
}

/// Body of `POST /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub description: String,
    pub create_date: String,
    pub update_date: String,
}

impl NewPost {
    /// Build a post stamped with `today` as both creation and update date.
    pub fn dated(title: &str, author: &str, description: &str, today: NaiveDate) -> Self {
        let date = storage_date(today);
        Self {
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            create_date: date.clone(),
            update_date: date,
        }
    }
}

/// Body of `PUT /posts/{id}`. The creation date is fixed and never resent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub title: String,
    pub author: String,
    pub description: String,
    pub update_date: String,
}

/// Profile of the signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub sub: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Name used in the greeting.
    pub fn display_name(&self) -> &str {
        [&self.nickname, &self.name, &self.email]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
            .unwrap_or(self.sub.as_str())
    }
}

/// Today's date on the client clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Render a date the way the API stores it (`YYYY-MM-DD`).
pub fn storage_date(date: NaiveDate) -> String {
    date.format(STORAGE_DATE_FORMAT).to_string()
}

/// Parse a stored date. Accepts `YYYY-MM-DD`, RFC 3339 timestamps and
/// anything else that starts with a `YYYY-MM-DD` prefix. The calendar date
/// is taken as written.
pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, STORAGE_DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            value
                .get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, STORAGE_DATE_FORMAT).ok())
        })
}

/// Render a stored date as `DD/MM/YYYY`. Unparseable values are shown verbatim.
pub fn display_date(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    match parse_stored_date(value) {
        Some(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        None => value.to_string(),
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
