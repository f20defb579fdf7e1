use serde::Serialize;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::sheets::{SheetStore, Tab};

/// One row of the credential tab. Rows are created on registration and never
/// updated or deleted.
#[derive(Debug, Clone, Serialize)]
pub struct Credential {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}

impl Credential {
    pub fn new(username: &str, password_hash: String) -> Self {
        // Matches the sheet's human-readable creation dates.
        let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self {
            username: username.to_string(),
            password_hash,
            created_at: now.format(&fmt).unwrap_or_default(),
        }
    }

    fn from_row(row: &[String]) -> Option<Self> {
        let username = row.first()?.clone();
        if username.is_empty() {
            return None;
        }
        Some(Self {
            username,
            password_hash: row.get(1).cloned().unwrap_or_default(),
            created_at: row.get(2).cloned().unwrap_or_default(),
        })
    }
}

/// Full scan of the credential tab for an exact, case-sensitive name match.
/// This is a point-lookup rendered as a scan because the backing store only
/// offers read-all; row volume is small enough that it does not matter.
pub async fn find_by_username(
    sheets: &dyn SheetStore,
    username: &str,
) -> anyhow::Result<Option<Credential>> {
    let rows = sheets.read_all(Tab::Credentials).await?;
    Ok(rows
        .iter()
        .skip(1) // header row
        .filter_map(|row| Credential::from_row(row))
        .find(|c| c.username == username))
}

pub async fn append(sheets: &dyn SheetStore, credential: &Credential) -> anyhow::Result<()> {
    sheets
        .append_row(
            Tab::Credentials,
            vec![
                credential.username.clone(),
                credential.password_hash.clone(),
                credential.created_at.clone(),
            ],
        )
        .await
}
