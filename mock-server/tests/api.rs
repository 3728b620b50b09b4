use axum::http::{self, Request, StatusCode};
use beer_mock_server::{app, app_with, Beer, BeerPage};
use http_body_util::BodyExt;
use tower::ServiceExt;

const FIRST_ID: &str = "00000000-0000-0000-0000-000000000001";
const UNKNOWN_ID: &str = "9f0e8d7c-6b5a-4938-8271-605f4e3d2c1b";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_empty_store() {
    let resp = app_with(Vec::new())
        .oneshot(get("/api/v1/beer"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: BeerPage = body_json(resp).await;
    assert!(page.content.is_empty());
    assert_eq!(page.total_elements, 0);
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn list_defaults_to_first_page_of_25_without_inventory() {
    let resp = app().oneshot(get("/api/v1/beer")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: BeerPage = body_json(resp).await;
    assert_eq!(page.number, 0);
    assert_eq!(page.size, 25);
    assert_eq!(page.content.len(), 25);
    assert_eq!(page.total_elements, 30);
    assert_eq!(page.total_pages, 2);
    assert!(page.content.iter().all(|b| b.quantity_on_hand.is_none()));
}

#[tokio::test]
async fn list_page_size_10() {
    let resp = app()
        .oneshot(get("/api/v1/beer?pageNumber=1&pageSize=10"))
        .await
        .unwrap();

    let page: BeerPage = body_json(resp).await;
    assert_eq!(page.content.len(), 10);
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn list_past_the_end_is_empty() {
    let resp = app()
        .oneshot(get("/api/v1/beer?pageNumber=10&pageSize=20"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: BeerPage = body_json(resp).await;
    assert!(page.content.is_empty());
    assert_eq!(page.total_elements, 30);
}

#[tokio::test]
async fn list_filters_by_name_and_style() {
    let resp = app()
        .oneshot(get("/api/v1/beer?beerName=blessed&showInventoryOnHand=true"))
        .await
        .unwrap();
    let page: BeerPage = body_json(resp).await;
    let names: Vec<&str> = page.content.iter().map(|b| b.beer_name.as_str()).collect();
    assert_eq!(names, ["Blessed", "Blessed Again"]);
    assert!(page.content.iter().all(|b| b.quantity_on_hand.is_some()));

    let resp = app()
        .oneshot(get("/api/v1/beer?beerStyle=porter"))
        .await
        .unwrap();
    let page: BeerPage = body_json(resp).await;
    assert_eq!(page.content.len(), 2);
    assert!(page.content.iter().all(|b| b.beer_style == "PORTER"));
}

#[tokio::test]
async fn list_bad_page_number_returns_400() {
    let resp = app()
        .oneshot(get("/api/v1/beer?pageNumber=first"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- get ---

#[tokio::test]
async fn get_beer_hides_inventory_by_default() {
    let resp = app()
        .oneshot(get(&format!("/api/v1/beer/{FIRST_ID}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let beer: Beer = body_json(resp).await;
    assert_eq!(beer.beer_name, "Mango Bobs");
    assert!(beer.quantity_on_hand.is_none());
}

#[tokio::test]
async fn get_beer_shows_inventory_on_request() {
    let resp = app()
        .oneshot(get(&format!("/api/v1/beer/{FIRST_ID}?showInventoryOnHand=true")))
        .await
        .unwrap();

    let beer: Beer = body_json(resp).await;
    assert_eq!(beer.quantity_on_hand, Some(107));
}

#[tokio::test]
async fn get_beer_not_found() {
    let resp = app()
        .oneshot(get(&format!("/api/v1/beer/{UNKNOWN_ID}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_beer_bad_uuid_returns_400() {
    let resp = app()
        .oneshot(get("/api/v1/beer/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_beer_by_upc() {
    let resp = app()
        .oneshot(get("/api/v1/beer/upc/063123420001"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let beer: Beer = body_json(resp).await;
    assert_eq!(beer.upc.as_deref(), Some("063123420001"));
}

#[tokio::test]
async fn get_beer_by_unknown_upc() {
    let resp = app()
        .oneshot(get("/api/v1/beer/upc/000000000000"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- create ---

#[tokio::test]
async fn create_beer_returns_201_without_body() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/v1/beer",
            r#"{"beerName":"Dogfishhead 90 Min IPA","beerStyle":"IPA","upc":"234848549559","price":"10.99"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp
        .headers()
        .get(http::header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/api/v1/beer/"));
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn create_beer_malformed_json_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/api/v1/beer", r#"{"not_a_beer":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_beer_negative_price_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/v1/beer",
            r#"{"beerName":"Cheap","beerStyle":"LAGER","price":"-1.00"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(&body_bytes(resp).await[..], b"price must not be negative");
}

#[tokio::test]
async fn create_beer_duplicate_upc_returns_409() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/v1/beer",
            r#"{"beerName":"Copycat","beerStyle":"ALE","upc":"063123420001","price":"5.00"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

// --- update ---

#[tokio::test]
async fn update_beer_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/beer/{UNKNOWN_ID}"),
            r#"{"beerName":"Nope","beerStyle":"ALE","price":"1.00"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_beer_not_found() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/beer/{UNKNOWN_ID}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app_with(Vec::new()).into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/v1/beer",
            r#"{"beerName":"Walk Dog Lager","beerStyle":"LAGER","upc":"111111111111","price":"7.25","quantityOnHand":40}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers()[http::header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();

    // list — should contain the one beer
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/v1/beer"))
        .await
        .unwrap();
    let page: BeerPage = body_json(resp).await;
    assert_eq!(page.content.len(), 1);
    let id = page.content[0].id.unwrap();
    assert_eq!(location, format!("/api/v1/beer/{id}"));

    // get with inventory
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("{location}?showInventoryOnHand=true")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Beer = body_json(resp).await;
    assert_eq!(fetched.beer_name, "Walk Dog Lager");
    assert_eq!(fetched.quantity_on_hand, Some(40));
    assert_eq!(fetched.version, Some(0));

    // update — 204, no body
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &location,
            r#"{"beerName":"Walk Cat Lager","beerStyle":"LAGER","price":"7.50"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get — updated fields, untouched upc and inventory
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("{location}?showInventoryOnHand=true")))
        .await
        .unwrap();
    let updated: Beer = body_json(resp).await;
    assert_eq!(updated.beer_name, "Walk Cat Lager");
    assert_eq!(updated.upc.as_deref(), Some("111111111111"));
    assert_eq!(updated.quantity_on_hand, Some(40));
    assert_eq!(updated.version, Some(1));

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(&location)
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&location))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
