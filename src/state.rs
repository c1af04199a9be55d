use crate::feed::ChangeFeed;
use crate::models::CounterData;
use crate::reader::StatsReader;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

const FEED_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<CounterData>>,
    pub feed: ChangeFeed,
    pub reader: Arc<Mutex<StatsReader>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: CounterData) -> Self {
        let data = Arc::new(Mutex::new(data));
        let feed = ChangeFeed::new(FEED_CAPACITY);
        let reader = StatsReader::new(Arc::clone(&data), &feed);
        Self {
            data_path,
            data,
            feed,
            reader: Arc::new(Mutex::new(reader)),
        }
    }
}
