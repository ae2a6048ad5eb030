use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::domain::ReaderService;
use crate::fetcher::{HttpTransport, Transport};
use crate::sync::SyncEngine;

pub struct AppContext {
    pub config: Config,
    pub service: ReaderService,
    pub engine: SyncEngine,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(
            config.http.timeout(),
            &config.http.user_agent,
            config.service.auth_token.clone(),
        )?);
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        let service = config.service.reader_service();
        let engine = SyncEngine::new(&service, transport)?;

        Ok(Self {
            config,
            service,
            engine,
        })
    }
}
