use crate::domain::model::WizardStep;
use crate::domain::ports::{Destination, Navigator};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEntry {
    /// 前進時新增一筆瀏覽紀錄
    Push(WizardStep),
    /// 返回或點擊步驟指示器
    Rewind(WizardStep),
    Left(Destination),
}

/// 記錄步驟變化，對應瀏覽器的 history
#[derive(Debug, Clone, Default)]
pub struct HistoryNavigator {
    entries: Arc<Mutex<Vec<HistoryEntry>>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    fn record(&self, entry: HistoryEntry) {
        tracing::debug!("Navigation: {:?}", entry);
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}

impl Navigator for HistoryNavigator {
    fn step_changed(&self, from: WizardStep, to: WizardStep) {
        if to > from {
            self.record(HistoryEntry::Push(to));
        } else {
            self.record(HistoryEntry::Rewind(to));
        }
    }

    fn leave(&self, destination: Destination) {
        self.record(HistoryEntry::Left(destination));
    }
}
