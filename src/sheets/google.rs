use anyhow::Context;
use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::config::SheetsConfig;

use super::{SheetStore, Tab};

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const TOKEN_LIFETIME_SECS: i64 = 3600;
/// Refresh this long before the token actually expires.
const TOKEN_SLACK_SECS: i64 = 60;

/// The fields of the service-account JSON we actually use.
#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    token_uri: String,
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

struct CachedToken {
    value: String,
    expires_at: OffsetDateTime,
}

/// Google Sheets v4 client with service-account auth. One OAuth token is
/// minted on demand (RS256 assertion against the key's `token_uri`) and
/// cached until shortly before expiry.
pub struct GoogleSheets {
    http: reqwest::Client,
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    config: SheetsConfig,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleSheets {
    pub fn new(config: SheetsConfig) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&config.service_account_file).with_context(|| {
            format!(
                "read service account file {}",
                config.service_account_file
            )
        })?;
        let key: ServiceAccountKey =
            serde_json::from_str(&raw).context("parse service account file")?;
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .context("parse service account private key")?;
        Ok(Self {
            http: reqwest::Client::new(),
            key,
            signing_key,
            config,
            token: Mutex::new(None),
        })
    }

    fn spreadsheet_and_range(&self, tab: Tab) -> (&str, &str) {
        match tab {
            Tab::Credentials => (
                &self.config.credential_spreadsheet_id,
                &self.config.credential_tab,
            ),
            Tab::Records => (&self.config.record_spreadsheet_id, &self.config.record_tab),
        }
    }

    async fn access_token(&self) -> anyhow::Result<String> {
        let mut cached = self.token.lock().await;
        let now = OffsetDateTime::now_utc();
        if let Some(token) = cached.as_ref() {
            if token.expires_at - now > time::Duration::seconds(TOKEN_SLACK_SECS) {
                return Ok(token.value.clone());
            }
        }

        let iat = now.unix_timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key)
            .context("sign service account assertion")?;

        let resp = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .context("request access token")?;
        let resp = check_status(resp, "token endpoint").await?;
        let token: TokenResponse = resp.json().await.context("decode token response")?;

        tracing::debug!(expires_in = token.expires_in, "sheets access token minted");
        let value = token.access_token.clone();
        *cached = Some(CachedToken {
            value: token.access_token,
            expires_at: now + time::Duration::seconds(token.expires_in),
        });
        Ok(value)
    }
}

async fn check_status(resp: reqwest::Response, what: &str) -> anyhow::Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    anyhow::bail!("{what} returned {status}: {body}")
}

#[async_trait]
impl SheetStore for GoogleSheets {
    async fn read_all(&self, tab: Tab) -> anyhow::Result<Vec<Vec<String>>> {
        let token = self.access_token().await?;
        let (spreadsheet_id, range) = self.spreadsheet_and_range(tab);
        let url = format!("{API_BASE}/{spreadsheet_id}/values/{range}");
        let resp = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .with_context(|| format!("read range {range}"))?;
        let resp = check_status(resp, "values.get").await?;
        let body: ValueRange = resp.json().await.context("decode value range")?;
        Ok(body.values)
    }

    async fn append_row(&self, tab: Tab, row: Vec<String>) -> anyhow::Result<()> {
        let token = self.access_token().await?;
        let (spreadsheet_id, range) = self.spreadsheet_and_range(tab);
        let url = format!(
            "{API_BASE}/{spreadsheet_id}/values/{range}:append\
             ?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS"
        );
        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .with_context(|| format!("append to range {range}"))?;
        check_status(resp, "values.append").await?;
        Ok(())
    }
}
