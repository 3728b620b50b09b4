use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub mod fixture;

pub const BEER_PATH: &str = "/api/v1/beer";
pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_on_hand: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_date: Option<DateTime<Utc>>,
}

impl Beer {
    /// The beer as the API shows it; inventory only on request.
    fn view(&self, show_inventory_on_hand: bool) -> Beer {
        let mut beer = self.clone();
        if !show_inventory_on_hand {
            beer.quantity_on_hand = None;
        }
        beer
    }

    fn validate(&self) -> Result<(), String> {
        if self.beer_name.trim().is_empty() {
            return Err("beerName must not be blank".to_string());
        }
        if self.beer_style.trim().is_empty() {
            return Err("beerStyle must not be blank".to_string());
        }
        if self.price.is_sign_negative() {
            return Err("price must not be negative".to_string());
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BeerPage {
    pub content: Vec<Beer>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    pub beer_name: Option<String>,
    pub beer_style: Option<String>,
    pub show_inventory_on_hand: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryQuery {
    pub show_inventory_on_hand: Option<bool>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Beer>>>;

/// Router seeded with `fixture::beers()`.
pub fn app() -> Router {
    app_with(fixture::beers())
}

/// Router seeded with `beers`. Beers without an id are skipped.
pub fn app_with(beers: Vec<Beer>) -> Router {
    let db: Db = Arc::new(RwLock::new(
        beers
            .into_iter()
            .filter_map(|beer| beer.id.map(|id| (id, beer)))
            .collect(),
    ));
    Router::new()
        .route(BEER_PATH, get(list_beers).post(create_beer))
        .route(
            &format!("{BEER_PATH}/{{id}}"),
            get(get_beer).put(update_beer).delete(delete_beer),
        )
        .route(&format!("{BEER_PATH}/upc/{{upc}}"), get(get_beer_by_upc))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "beer mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn list_beers(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<BeerPage> {
    let beers = db.read().await;
    let show_inventory = query.show_inventory_on_hand.unwrap_or(false);
    let name = query.beer_name.as_deref().map(str::to_lowercase);

    let mut matching: Vec<Beer> = beers
        .values()
        .filter(|b| {
            name.as_deref()
                .map_or(true, |n| b.beer_name.to_lowercase().contains(n))
        })
        .filter(|b| {
            query
                .beer_style
                .as_deref()
                .map_or(true, |s| b.beer_style.eq_ignore_ascii_case(s))
        })
        .map(|b| b.view(show_inventory))
        .collect();
    matching.sort_by(|a, b| a.beer_name.cmp(&b.beer_name).then(a.id.cmp(&b.id)));

    let number = query.page_number.unwrap_or(0);
    let size = match query.page_size {
        None | Some(0) => DEFAULT_PAGE_SIZE,
        Some(size) => size.min(MAX_PAGE_SIZE),
    };
    debug!(number, size, matched = matching.len(), "listing beers");
    Json(page_of(matching, number, size))
}

fn page_of(all: Vec<Beer>, number: u32, size: u32) -> BeerPage {
    let total_elements = all.len() as u64;
    let start = (number as usize).saturating_mul(size as usize);
    BeerPage {
        content: all.into_iter().skip(start).take(size as usize).collect(),
        number,
        size,
        total_elements,
        total_pages: total_elements.div_ceil(u64::from(size)) as u32,
    }
}

async fn get_beer(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<Beer>, StatusCode> {
    let beers = db.read().await;
    let show_inventory = query.show_inventory_on_hand.unwrap_or(false);
    beers
        .get(&id)
        .map(|b| Json(b.view(show_inventory)))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_beer_by_upc(
    State(db): State<Db>,
    Path(upc): Path<String>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<Beer>, StatusCode> {
    let beers = db.read().await;
    let show_inventory = query.show_inventory_on_hand.unwrap_or(false);
    beers
        .values()
        .find(|b| b.upc.as_deref() == Some(upc.as_str()))
        .map(|b| Json(b.view(show_inventory)))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_beer(
    State(db): State<Db>,
    payload: Result<Json<Beer>, JsonRejection>,
) -> Response {
    let input = match accept_payload(payload) {
        Ok(input) => input,
        Err(rejection) => return rejection,
    };

    let mut beers = db.write().await;
    let upc = input.upc.clone().unwrap_or_else(generate_upc);
    if beers.values().any(|b| b.upc.as_deref() == Some(upc.as_str())) {
        return (StatusCode::CONFLICT, format!("upc {upc} already exists")).into_response();
    }

    let now = Utc::now();
    let id = Uuid::new_v4();
    let beer = Beer {
        id: Some(id),
        version: Some(0),
        upc: Some(upc),
        quantity_on_hand: Some(input.quantity_on_hand.unwrap_or(0)),
        created_date: Some(now),
        last_updated_date: Some(now),
        ..input
    };
    info!(%id, name = %beer.beer_name, "beer created");
    beers.insert(id, beer);

    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("{BEER_PATH}/{id}"))],
    )
        .into_response()
}

async fn update_beer(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    payload: Result<Json<Beer>, JsonRejection>,
) -> Response {
    let input = match accept_payload(payload) {
        Ok(input) => input,
        Err(rejection) => return rejection,
    };

    let mut beers = db.write().await;
    if !beers.contains_key(&id) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if let Some(upc) = input.upc.as_deref() {
        if beers
            .values()
            .any(|b| b.id != Some(id) && b.upc.as_deref() == Some(upc))
        {
            return (StatusCode::CONFLICT, format!("upc {upc} already exists")).into_response();
        }
    }
    let Some(beer) = beers.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    beer.beer_name = input.beer_name;
    beer.beer_style = input.beer_style;
    beer.price = input.price;
    if input.upc.is_some() {
        beer.upc = input.upc;
    }
    if input.quantity_on_hand.is_some() {
        beer.quantity_on_hand = input.quantity_on_hand;
    }
    beer.version = Some(beer.version.unwrap_or(0) + 1);
    beer.last_updated_date = Some(Utc::now());
    info!(%id, "beer updated");

    StatusCode::NO_CONTENT.into_response()
}

async fn delete_beer(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut beers = db.write().await;
    beers.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

/// Malformed JSON and failed validation are both 400, never 422.
fn accept_payload(payload: Result<Json<Beer>, JsonRejection>) -> Result<Beer, Response> {
    let Json(input) = payload
        .map_err(|rejection| (StatusCode::BAD_REQUEST, rejection.body_text()).into_response())?;
    input
        .validate()
        .map_err(|message| (StatusCode::BAD_REQUEST, message).into_response())?;
    Ok(input)
}

fn generate_upc() -> String {
    format!("{:012}", Uuid::new_v4().as_u128() % 1_000_000_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn beer() -> Beer {
        Beer {
            id: Some(Uuid::nil()),
            version: Some(1),
            beer_name: "Test".to_string(),
            beer_style: "IPA".to_string(),
            upc: Some("000000000001".to_string()),
            price: Decimal::from_str("10.99").unwrap(),
            quantity_on_hand: Some(12),
            created_date: None,
            last_updated_date: None,
        }
    }

    #[test]
    fn beer_serializes_with_wire_names() {
        let json = serde_json::to_value(beer()).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["beerName"], "Test");
        assert_eq!(json["beerStyle"], "IPA");
        assert_eq!(json["quantityOnHand"], 12);
        assert!(json.get("createdDate").is_none());
    }

    #[test]
    fn view_hides_inventory_unless_requested() {
        assert_eq!(beer().view(true).quantity_on_hand, Some(12));
        assert_eq!(beer().view(false).quantity_on_hand, None);
    }

    #[test]
    fn create_payload_needs_name_style_and_price() {
        let result: Result<Beer, _> = serde_json::from_str(r#"{"beerStyle":"IPA","price":1}"#);
        assert!(result.is_err());
        let input: Beer =
            serde_json::from_str(r#"{"beerName":"x","beerStyle":"IPA","price":"1.50"}"#).unwrap();
        assert!(input.id.is_none());
        assert!(input.upc.is_none());
    }

    #[test]
    fn validation_rejects_blank_name_and_negative_price() {
        let mut input = beer();
        input.beer_name = "  ".to_string();
        assert!(input.validate().is_err());

        let mut input = beer();
        input.price = Decimal::from_str("-0.01").unwrap();
        assert_eq!(input.validate().unwrap_err(), "price must not be negative");

        assert!(beer().validate().is_ok());
    }

    #[test]
    fn page_of_computes_metadata() {
        let all: Vec<Beer> = (0..11).map(|_| beer()).collect();
        let page = page_of(all.clone(), 0, 10);
        assert_eq!(page.content.len(), 10);
        assert_eq!(page.total_pages, 2);

        let page = page_of(all, 10, 20);
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 11);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn generated_upc_has_twelve_digits() {
        let upc = generate_upc();
        assert_eq!(upc.len(), 12);
        assert!(upc.chars().all(|c| c.is_ascii_digit()));
    }
}
