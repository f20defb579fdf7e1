use std::sync::Arc;

use crate::auth::session::SessionStore;
use crate::config::{AppConfig, SheetsConfig};
use crate::sheets::{google::GoogleSheets, SheetStore as SheetStoreTrait};

#[derive(Clone)]
pub struct AppState {
    pub sheets: Arc<dyn SheetStoreTrait>,
    pub sessions: SessionStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let sheets = Arc::new(GoogleSheets::new(config.sheets.clone())?) as Arc<dyn SheetStoreTrait>;
        Ok(Self {
            sheets,
            sessions: SessionStore::new(),
            config,
        })
    }

    pub fn from_parts(sheets: Arc<dyn SheetStoreTrait>, config: Arc<AppConfig>) -> Self {
        Self {
            sheets,
            sessions: SessionStore::new(),
            config,
        }
    }

    /// State backed by `MemorySheets`, for tests and local poking.
    pub fn fake() -> Self {
        let sheets = Arc::new(crate::sheets::MemorySheets::new()) as Arc<dyn SheetStoreTrait>;
        Self::from_parts(sheets, Arc::new(fake_config()))
    }
}

fn fake_config() -> AppConfig {
    AppConfig {
        sheets: SheetsConfig {
            service_account_file: "service_account.json".into(),
            record_spreadsheet_id: "fake-record-sheet".into(),
            credential_spreadsheet_id: "fake-credential-sheet".into(),
            record_tab: "Test".into(),
            credential_tab: "Test_Spoc_PassWord".into(),
        },
    }
}
