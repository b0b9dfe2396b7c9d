use crate::cache::TopicCache;
use crate::config::Config;
use crate::pipeline::NewsPipeline;
use tokio::sync::Mutex;

pub struct AppState {
    pub pipeline: NewsPipeline,
    /// Held for the whole pass, which also serializes concurrent passes.
    pub cache: Mutex<TopicCache>,
    pub config: Config,
}

impl AppState {
    pub fn new(pipeline: NewsPipeline, config: Config) -> Self {
        Self {
            pipeline,
            cache: Mutex::new(TopicCache::new()),
            config,
        }
    }
}
