//! Asynchronous beer client: `BeerRequests` on both ends of an `HttpTransport`.
//!
//! # Design
//! Each operation builds its request synchronously, so caller errors resolve
//! the returned handle without any I/O. Otherwise the request is executed on
//! its own task and the response is interpreted there. The client holds only
//! the immutable request builder and a shared transport, so one instance can
//! be cloned and used from many tasks at once.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::BeerRequests;
use crate::error::ApiError;
use crate::handle::OperationHandle;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::HttpTransport;
use crate::types::{Acknowledgement, Beer, BeerPage, ListBeersParams};

type Interpret<R> = fn(&BeerRequests, HttpResponse) -> Result<R, ApiError>;

/// Typed, non-blocking client for the beer catalog service.
///
/// Every operation returns an `OperationHandle` that can be awaited or
/// cancelled. Operations must be invoked from within a tokio runtime.
pub struct BeerClient<T> {
    requests: BeerRequests,
    transport: Arc<T>,
}

impl<T> Clone for BeerClient<T> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> std::fmt::Debug for BeerClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeerClient")
            .field("base_url", &self.requests.base_url().as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "reqwest-transport")]
impl BeerClient<crate::transport::ReqwestTransport> {
    /// Client over reqwest, configured from `config`.
    pub fn from_config(config: &crate::config::ClientConfig) -> Result<Self, ApiError> {
        let transport = crate::transport::ReqwestTransport::new(config)
            .map_err(|e| ApiError::InvalidInput(format!("unusable client configuration: {e}")))?;
        Self::new(&config.base_url, transport)
    }
}

impl<T: HttpTransport + 'static> BeerClient<T> {
    pub fn new(base_url: &str, transport: T) -> Result<Self, ApiError> {
        Self::with_shared_transport(base_url, Arc::new(transport))
    }

    /// Share one transport (and its connection pool) between clients.
    pub fn with_shared_transport(base_url: &str, transport: Arc<T>) -> Result<Self, ApiError> {
        Ok(Self {
            requests: BeerRequests::new(base_url)?,
            transport,
        })
    }

    pub fn requests(&self) -> &BeerRequests {
        &self.requests
    }

    /// `GET /beer/{id}`. `quantityOnHand` is only requested when
    /// `show_inventory_on_hand` is `Some(true)`; `None` omits the parameter.
    pub fn get_beer_by_id(
        &self,
        id: Uuid,
        show_inventory_on_hand: Option<bool>,
    ) -> OperationHandle<Beer> {
        self.dispatch(
            self.requests.build_get_beer_by_id(id, show_inventory_on_hand),
            BeerRequests::parse_beer,
        )
    }

    /// `GET /beer/upc/{upc}`.
    pub fn get_beer_by_upc(&self, upc: &str) -> OperationHandle<Beer> {
        self.dispatch(
            self.requests.build_get_beer_by_upc(upc),
            BeerRequests::parse_beer,
        )
    }

    /// `GET /beer` with whichever of `params` are present.
    pub fn list_beers(&self, params: ListBeersParams) -> OperationHandle<BeerPage> {
        self.dispatch(
            self.requests.build_list_beers(&params),
            BeerRequests::parse_page,
        )
    }

    /// `POST /beer`. The service answers 201 without a body; re-fetch (for
    /// example by UPC) to learn the assigned id.
    pub fn create_beer(&self, beer: &Beer) -> OperationHandle<Acknowledgement> {
        self.dispatch(
            self.requests.build_create_beer(beer),
            BeerRequests::parse_acknowledgement,
        )
    }

    /// `PUT /beer/{id}`.
    pub fn update_beer(&self, id: Uuid, beer: &Beer) -> OperationHandle<Acknowledgement> {
        self.dispatch(
            self.requests.build_update_beer(id, beer),
            BeerRequests::parse_acknowledgement,
        )
    }

    /// `DELETE /beer/{id}`.
    pub fn delete_beer_by_id(&self, id: Uuid) -> OperationHandle<Acknowledgement> {
        self.dispatch(
            self.requests.build_delete_beer(id),
            BeerRequests::parse_acknowledgement,
        )
    }

    fn dispatch<R: Send + 'static>(
        &self,
        built: Result<HttpRequest, ApiError>,
        interpret: Interpret<R>,
    ) -> OperationHandle<R> {
        let request = match built {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "beer request rejected before sending");
                return OperationHandle::ready(Err(err));
            }
        };

        let requests = self.requests.clone();
        let transport = Arc::clone(&self.transport);
        OperationHandle::spawn(async move {
            let method = request.method.as_str();
            let url = request.url.to_string();
            debug!(method, %url, "sending beer request");

            let response = transport.execute(request).await.map_err(|err| {
                warn!(method, %url, error = %err, "beer request failed in transport");
                ApiError::from(err)
            })?;
            debug!(method, %url, status = response.status, "beer response received");

            interpret(&requests, response).inspect_err(|err| {
                warn!(method, %url, error = %err, "beer request failed");
            })
        })
    }
}
