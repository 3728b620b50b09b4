//! Stateless request builder and response interpreter for the beer API.
//!
//! # Design
//! `BeerRequests` holds only the resolved base URL and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Whoever sits between the two (an `HttpTransport`, a test,
//! a host application) executes the actual round-trip.
//!
//! Identifiers and product codes are pushed as path segments, never
//! concatenated, so reserved characters are percent-encoded. Optional query
//! parameters are appended only when present, in a fixed order.

use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Acknowledgement, Beer, BeerPage, ListBeersParams};

pub const BEER_PATH: &str = "beer";
pub const UPC_SEGMENT: &str = "upc";

pub const PARAM_PAGE_NUMBER: &str = "pageNumber";
pub const PARAM_PAGE_SIZE: &str = "pageSize";
pub const PARAM_BEER_NAME: &str = "beerName";
pub const PARAM_BEER_STYLE: &str = "beerStyle";
pub const PARAM_SHOW_INVENTORY: &str = "showInventoryOnHand";

/// Builds `HttpRequest` values and interprets `HttpResponse` values for the
/// six beer operations without touching the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeerRequests {
    base_url: Url,
}

impl BeerRequests {
    /// Resolve `base_url`. The `/beer` resource is appended below it; query
    /// and fragment on the base are discarded.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut url = Url::parse(base_url.trim())
            .map_err(|e| ApiError::InvalidInput(format!("invalid base URL {base_url:?}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidInput(format!(
                "base URL {base_url:?} cannot carry a path"
            )));
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self { base_url: url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn build_get_beer_by_id(
        &self,
        id: Uuid,
        show_inventory_on_hand: Option<bool>,
    ) -> Result<HttpRequest, ApiError> {
        let id = check_id(id)?;
        let mut url = self.resource_url(&[id.as_str()]);
        append_query(
            &mut url,
            show_inventory_on_hand.map(|show| (PARAM_SHOW_INVENTORY, show.to_string())),
        );
        Ok(bodiless(HttpMethod::Get, url))
    }

    pub fn build_get_beer_by_upc(&self, upc: &str) -> Result<HttpRequest, ApiError> {
        if upc.trim().is_empty() {
            return Err(ApiError::InvalidInput("product code must not be blank".to_string()));
        }
        // URL parsing drops dot segments in any spelling, so they cannot be sent.
        if matches!(upc, "." | "..") {
            return Err(ApiError::InvalidInput(format!(
                "product code {upc:?} cannot be used as a path segment"
            )));
        }
        Ok(bodiless(
            HttpMethod::Get,
            self.resource_url(&[UPC_SEGMENT, upc]),
        ))
    }

    pub fn build_list_beers(&self, params: &ListBeersParams) -> Result<HttpRequest, ApiError> {
        let mut url = self.resource_url(&[]);
        let pairs = [
            params.page_number.map(|n| (PARAM_PAGE_NUMBER, n.to_string())),
            params.page_size.map(|n| (PARAM_PAGE_SIZE, n.to_string())),
            params.beer_name.clone().map(|name| (PARAM_BEER_NAME, name)),
            params.beer_style.clone().map(|style| (PARAM_BEER_STYLE, style)),
            params
                .show_inventory_on_hand
                .map(|show| (PARAM_SHOW_INVENTORY, show.to_string())),
        ];
        append_query(&mut url, pairs.into_iter().flatten());
        Ok(bodiless(HttpMethod::Get, url))
    }

    pub fn build_create_beer(&self, beer: &Beer) -> Result<HttpRequest, ApiError> {
        with_json_body(HttpMethod::Post, self.resource_url(&[]), beer)
    }

    pub fn build_update_beer(&self, id: Uuid, beer: &Beer) -> Result<HttpRequest, ApiError> {
        let id = check_id(id)?;
        with_json_body(HttpMethod::Put, self.resource_url(&[id.as_str()]), beer)
    }

    pub fn build_delete_beer(&self, id: Uuid) -> Result<HttpRequest, ApiError> {
        let id = check_id(id)?;
        Ok(bodiless(HttpMethod::Delete, self.resource_url(&[id.as_str()])))
    }

    /// Interpret the response of `get_beer_by_id` / `get_beer_by_upc`.
    pub fn parse_beer(&self, response: HttpResponse) -> Result<Beer, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    /// Interpret the response of `list_beers`.
    pub fn parse_page(&self, response: HttpResponse) -> Result<BeerPage, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    /// Interpret the response of create, update or delete. Any body on a
    /// 2xx is ignored.
    pub fn parse_acknowledgement(
        &self,
        response: HttpResponse,
    ) -> Result<Acknowledgement, ApiError> {
        check_status(&response)?;
        Ok(Acknowledgement {
            status: response.status,
        })
    }

    fn resource_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(BEER_PATH).extend(segments);
        }
        url
    }
}

fn check_id(id: Uuid) -> Result<String, ApiError> {
    if id.is_nil() {
        return Err(ApiError::InvalidInput("beer id must not be nil".to_string()));
    }
    Ok(id.to_string())
}

/// Append `pairs` to the query string. Leaves the URL without a `?` when
/// there is nothing to append.
fn append_query<'a>(url: &mut Url, pairs: impl IntoIterator<Item = (&'a str, String)>) {
    let pairs: Vec<(&str, String)> = pairs.into_iter().collect();
    if pairs.is_empty() {
        return;
    }
    url.query_pairs_mut().extend_pairs(pairs);
}

fn bodiless(method: HttpMethod, url: Url) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json_body(method: HttpMethod, url: Url, beer: &Beer) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(beer)
        .map_err(|e| ApiError::InvalidInput(format!("beer could not be serialized: {e}")))?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Rejected {
        status: response.status,
        body: response.has_body().then(|| response.body.clone()),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    if !response.has_body() {
        return Err(ApiError::Decode(format!(
            "expected a body with status {}, got none",
            response.status
        )));
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}
