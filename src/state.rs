use crate::clock::Clock;
use crate::models::{EventData, StorageData};
use crate::quote::QuoteClient;
use crate::storage::load_event;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::{Mutex, watch};

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<StorageData>>,
    pub event: Arc<watch::Sender<EventData>>,
    pub clock: Arc<Clock>,
    pub quotes: QuoteClient,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: StorageData, clock: Arc<Clock>, quotes: QuoteClient) -> Self {
        let (event, _) = watch::channel(load_event(&data));
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            event: Arc::new(event),
            clock,
            quotes,
        }
    }

    pub fn current_event(&self) -> EventData {
        self.event.borrow().clone()
    }
}
