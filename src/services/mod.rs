//! Presentation flows and the shared reservation store

pub mod catalog;
pub mod reservations;
pub mod search;

use std::sync::Arc;

use crate::{
    api::{HttpLibraryApi, LibraryApi},
    config::AppConfig,
    error::ClientResult,
};

use catalog::CatalogFlow;
use reservations::SharedReservations;
use search::SearchForm;

/// Container wiring the flows to the service API and the reservation store
#[derive(Clone)]
pub struct Services {
    pub api: Arc<dyn LibraryApi>,
    pub reservations: SharedReservations,
}

impl Services {
    pub fn new(api: Arc<dyn LibraryApi>, reservations: SharedReservations) -> Self {
        Self { api, reservations }
    }

    /// HTTP-backed services, with reservations loaded from the configured file
    pub async fn from_config(config: &AppConfig) -> ClientResult<Self> {
        let api = HttpLibraryApi::new(&config.service)?;
        tracing::debug!("Library service at {}", api.base_url());

        let reservations =
            SharedReservations::load(std::path::Path::new(&config.reservations.path)).await?;

        Ok(Self::new(Arc::new(api), reservations))
    }

    /// Catalog flow after its initial fetch
    pub async fn catalog(&self) -> CatalogFlow {
        CatalogFlow::load(self.api.clone()).await
    }

    /// Empty search form whose reservations land in the shared store
    pub fn search(&self) -> SearchForm {
        SearchForm::new(self.api.clone(), Arc::new(self.reservations.clone()))
    }
}
