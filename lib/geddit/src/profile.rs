use std::fmt;

use serde::{Deserialize, Deserializer};

/// The authenticated account, as returned by `GET /api/v1/me`.
///
/// Decoding is lenient: unknown fields are ignored and missing fields take their
/// default value, as do `null` values of non-optional fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Account id, without the `t2_` kind prefix.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Username.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Karma earned from submissions.
    #[serde(deserialize_with = "null_as_default")]
    pub link_karma: i64,
    /// Karma earned from comments.
    #[serde(deserialize_with = "null_as_default")]
    pub comment_karma: i64,
    /// Whether the account has Reddit Premium.
    #[serde(deserialize_with = "null_as_default")]
    pub is_gold: bool,
    /// Whether the account moderates at least one subreddit.
    #[serde(deserialize_with = "null_as_default")]
    pub is_mod: bool,
    /// Whether the inbox holds unread messages.
    #[serde(deserialize_with = "null_as_default")]
    pub has_mail: bool,
    /// Whether the account is currently suspended.
    #[serde(deserialize_with = "null_as_default")]
    pub is_suspended: bool,
    /// Account creation time, seconds since the Unix epoch (UTC).
    #[serde(deserialize_with = "null_as_default")]
    pub created_utc: f64,
    /// Account creation time as reported in the server's local time.
    #[serde(deserialize_with = "null_as_default")]
    pub created: f64,
    /// Whether modmail holds unread messages.
    #[serde(deserialize_with = "null_as_default")]
    pub has_mod_mail: bool,
    /// Whether the account email has been verified.
    #[serde(deserialize_with = "null_as_default")]
    pub has_verified_email: bool,
    /// Whether the profile is hidden from search engines.
    #[serde(deserialize_with = "null_as_default")]
    pub hide_from_robots: bool,
    /// Number of unread inbox items.
    #[serde(deserialize_with = "null_as_default")]
    pub inbox_count: i64,
    /// Whether the account is a friend of the requester.
    #[serde(deserialize_with = "null_as_default")]
    pub is_friend: bool,
    /// Whether the account opted in to NSFW content.
    #[serde(deserialize_with = "null_as_default")]
    pub over_18: bool,
    /// Number of Premium gifts available.
    #[serde(deserialize_with = "null_as_default")]
    pub gold_creddits: i64,
    /// Legacy anti-CSRF token, `null` for OAuth sessions.
    pub modhash: Option<String>,
    /// End of the Premium subscription, seconds since the Unix epoch.
    pub gold_expiration: Option<f64>,
    /// End of the suspension, seconds since the Unix epoch.
    pub suspension_expiration_utc: Option<f64>,
}

impl Profile {
    /// Short human summary: `"<name> (<link karma>-<comment karma>)"`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-{})", self.name, self.link_karma, self.comment_karma)
    }
}

/// Reads `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
