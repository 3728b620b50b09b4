//! Domain DTOs for the beer API.
//!
//! # Design
//! These types mirror the service's wire schema (camelCase field names) but
//! are defined independently of the mock server crate; integration tests
//! catch schema drift. Server-assigned fields are `Option` and are omitted
//! from the JSON when absent, so a creation payload never carries `null`
//! identifiers or timestamps.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// A single beer as exchanged with the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Beer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    pub beer_name: String,
    pub beer_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    pub price: Decimal,
    /// Only present when inventory was explicitly requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_on_hand: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_date: Option<DateTime<Utc>>,
}

impl Beer {
    /// Payload for `create_beer`: no identifier, version or timestamps.
    pub fn new(
        beer_name: impl Into<String>,
        beer_style: impl Into<String>,
        upc: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: None,
            version: None,
            beer_name: beer_name.into(),
            beer_style: beer_style.into(),
            upc: Some(upc.into()),
            price,
            quantity_on_hand: None,
            created_date: None,
            last_updated_date: None,
        }
    }

    /// Creation payload without a product code; the service assigns one.
    pub fn without_upc(
        beer_name: impl Into<String>,
        beer_style: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            upc: None,
            ..Self::new(beer_name, beer_style, String::new(), price)
        }
    }

    pub fn with_quantity_on_hand(mut self, quantity: i32) -> Self {
        self.quantity_on_hand = Some(quantity);
        self
    }

    /// Copy of this beer with every server-assigned field cleared, suitable
    /// as an update payload.
    pub fn to_payload(&self) -> Self {
        Self {
            id: None,
            version: None,
            created_date: None,
            last_updated_date: None,
            ..self.clone()
        }
    }
}

/// One page of beers plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BeerPage {
    pub content: Vec<Beer>,
    /// Zero-based page index.
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl BeerPage {
    /// `content.len() <= size` and `total_pages == ceil(total_elements / size)`.
    pub fn is_consistent(&self) -> bool {
        if self.size == 0 {
            return self.content.is_empty();
        }
        self.content.len() <= self.size as usize
            && self.total_pages == total_pages(self.total_elements, self.size)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

fn total_pages(total_elements: u64, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    total_elements.div_ceil(u64::from(size)) as u32
}

/// Optional filters and paging for `list_beers`.
///
/// Every field left `None` is omitted from the query string entirely; the
/// service treats "absent" differently from "present with a default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListBeersParams {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub beer_name: Option<String>,
    pub beer_style: Option<String>,
    pub show_inventory_on_hand: Option<bool>,
}

impl ListBeersParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn beer_name(mut self, beer_name: impl Into<String>) -> Self {
        self.beer_name = Some(beer_name.into());
        self
    }

    pub fn beer_style(mut self, beer_style: impl Into<String>) -> Self {
        self.beer_style = Some(beer_style.into());
        self
    }

    pub fn show_inventory_on_hand(mut self, show: bool) -> Self {
        self.show_inventory_on_hand = Some(show);
        self
    }
}

/// Success value of create, update and delete: the service answers those
/// without a body, so only the status code is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement {
    pub status: u16,
}

/// Parse a textual beer identifier.
pub fn parse_beer_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| ApiError::InvalidInput(format!("malformed beer id {raw:?}: {e}")))
}
