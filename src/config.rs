use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    pub service_account_file: String,
    pub record_spreadsheet_id: String,
    pub credential_spreadsheet_id: String,
    pub record_tab: String,
    pub credential_tab: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub sheets: SheetsConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let sheets = SheetsConfig {
            service_account_file: std::env::var("SERVICE_ACCOUNT_FILE")
                .unwrap_or_else(|_| "service_account.json".into()),
            record_spreadsheet_id: std::env::var("RECORD_SPREADSHEET_ID")?,
            credential_spreadsheet_id: std::env::var("CREDENTIAL_SPREADSHEET_ID")?,
            record_tab: std::env::var("RECORD_TAB").unwrap_or_else(|_| "Test".into()),
            credential_tab: std::env::var("CREDENTIAL_TAB")
                .unwrap_or_else(|_| "Test_Spoc_PassWord".into()),
        };
        Ok(Self { sheets })
    }
}
