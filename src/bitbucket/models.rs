use serde::{Deserialize, Deserializer};

/// `repo:push` payload. Only the fields the relay reads are modelled; anything
/// missing or `null` falls back to an empty value.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct PushNotification {
    #[serde(deserialize_with = "null_as_default")]
    pub push: Push,
    #[serde(deserialize_with = "null_as_default")]
    pub repository: Repository,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Push {
    #[serde(deserialize_with = "null_as_default")]
    pub changes: Vec<Change>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Change {
    #[serde(deserialize_with = "null_as_default")]
    pub new: RefState,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RefState {
    #[serde(deserialize_with = "null_as_default")]
    pub target: Target,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Target {
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Links,
    #[serde(deserialize_with = "null_as_default")]
    pub author: Author,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Links {
    #[serde(deserialize_with = "null_as_default")]
    pub html: Link,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Link {
    #[serde(deserialize_with = "null_as_default")]
    pub href: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Author {
    #[serde(deserialize_with = "null_as_default")]
    pub user: User,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Repository {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Bitbucket sends `null` for deleted refs and authors without an account.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Flattened view of one change entry, ready to be formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary<'a> {
    pub repository: &'a str,
    pub author: &'a str,
    pub hash: &'a str,
    pub message: &'a str,
    pub url: &'a str,
}

impl PushNotification {
    /// Decodes a request body. A bare `null` is an empty push.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        Ok(serde_json::from_slice::<Option<Self>>(bytes)?.unwrap_or_default())
    }

    pub fn commits(&self) -> impl Iterator<Item = CommitSummary<'_>> {
        self.push.changes.iter().map(|change| {
            let target = &change.new.target;
            CommitSummary {
                repository: &self.repository.name,
                author: &target.author.user.display_name,
                hash: &target.hash,
                message: &target.message,
                url: &target.links.html.href,
            }
        })
    }

    pub fn first_commit(&self) -> Option<CommitSummary<'_>> {
        self.commits().next()
    }
}
