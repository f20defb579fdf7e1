pub mod google;

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

/// The two tabs the application touches. Keeping this closed lets the store
/// resolve spreadsheet ids from config instead of handlers carrying ranges
/// around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Credentials,
    Records,
}

/// Narrow view of the spreadsheet backend: read every row of a tab, append
/// one row to its end. There is deliberately no update or delete, and no
/// atomicity between a read and a later append.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// All rows of the tab, header row included, in sheet order.
    async fn read_all(&self, tab: Tab) -> anyhow::Result<Vec<Vec<String>>>;

    /// Append a single row after the last non-empty row of the tab.
    async fn append_row(&self, tab: Tab, row: Vec<String>) -> anyhow::Result<()>;
}

/// In-process stand-in for the Google backend, used by `AppState::fake()` and
/// the tests. Seeded with header rows so the scan semantics match the real
/// sheets.
pub struct MemorySheets {
    tabs: Mutex<HashMap<Tab, Vec<Vec<String>>>>,
}

impl MemorySheets {
    pub fn new() -> Self {
        let mut tabs = HashMap::new();
        tabs.insert(
            Tab::Credentials,
            vec![vec![
                "spoc_name".to_string(),
                "password".to_string(),
                "created_at".to_string(),
            ]],
        );
        tabs.insert(Tab::Records, vec![crate::records::repo::header_row()]);
        Self {
            tabs: Mutex::new(tabs),
        }
    }

    /// Rows currently in the tab, header included. Test helper.
    pub fn rows(&self, tab: Tab) -> Vec<Vec<String>> {
        self.tabs.lock().unwrap().get(&tab).cloned().unwrap_or_default()
    }
}

impl Default for MemorySheets {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetStore for MemorySheets {
    async fn read_all(&self, tab: Tab) -> anyhow::Result<Vec<Vec<String>>> {
        Ok(self.rows(tab))
    }

    async fn append_row(&self, tab: Tab, row: Vec<String>) -> anyhow::Result<()> {
        self.tabs.lock().unwrap().entry(tab).or_default().push(row);
        Ok(())
    }
}
