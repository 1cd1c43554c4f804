use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Processing,
    Active,
    Inactive,
    Cancelled,
    Expired,
}

impl CardStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CardStatus::Processing => "processing",
            CardStatus::Active => "active",
            CardStatus::Inactive => "inactive",
            CardStatus::Cancelled => "cancelled",
            CardStatus::Expired => "expired",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: u64,
    pub account_number: String,
    pub card_owner_id: String,
    pub client_id: Option<String>,
    pub delivery_type: Option<String>,
    pub status: CardStatus,
}

#[derive(Deserialize)]
pub struct CreateCard {
    pub account_number: String,
    pub card_owner_id: String,
    pub client_id: Option<String>,
    pub delivery_type: Option<String>,
    pub delivery_address: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: String,
    pub currency: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardLimit {
    pub limit: Money,
}

#[derive(Deserialize)]
pub struct PinRequest {
    pub cvv2: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardList {
    pub items: Vec<Card>,
    pub total: usize,
}

#[derive(Default)]
pub struct Store {
    cards: BTreeMap<u64, Card>,
    limits: HashMap<String, Money>,
    next_id: u64,
}

pub type Db = Arc<RwLock<Store>>;

/// CVV the mock expects for card `id`.
pub fn cvv_for(id: u64) -> String {
    format!("{:03}", id.wrapping_mul(7) % 1000)
}

/// PIN the mock reveals for card `id`.
pub fn pin_for(id: u64) -> String {
    format!("{:04}", id.wrapping_mul(31) % 10000)
}

pub fn default_card_limit() -> Money {
    Money {
        amount: "1000.00".to_string(),
        currency: "EUR".to_string(),
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/transfer/rest/v1/swift/{iban}", get(get_iban_information))
        .route(
            "/account/rest/v1/accounts/{account_number}/full-balance",
            get(get_balance),
        )
        .route(
            "/issued-payment-card/v1/cards",
            get(list_cards).post(create_card),
        )
        .route("/issued-payment-card/v1/cards/{id}/activate", put(activate_card))
        .route("/issued-payment-card/v1/cards/{id}/enable", put(enable_card))
        .route("/issued-payment-card/v1/cards/{id}/deactivate", put(deactivate_card))
        .route("/issued-payment-card/v1/cards/{id}/cancel", put(cancel_card))
        .route("/issued-payment-card/v1/cards/{id}/pin", put(retrieve_pin))
        .route(
            "/issued-payment-card/v1/accounts/{account_number}/card-limit",
            get(get_card_limit).put(set_card_limit),
        )
        .with_state(db);
    Router::new()
        .nest("/public", api)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_iban_information(Path(iban): Path<String>) -> Result<Json<Value>, StatusCode> {
    if iban.len() < 15 || !iban.is_ascii() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let country_code = iban[..2].to_ascii_uppercase();
    Ok(Json(json!({
        "iban": iban,
        "bic": format!("EVIU{country_code}2XXX"),
        "bank_name": "Paysera",
        "country_code": country_code,
    })))
}

async fn get_balance(Path(account_number): Path<String>) -> Json<Value> {
    Json(json!({
        "account_number": account_number,
        "balances": [
            {"currency": "EUR", "balance": "0.00", "reserved": "0.00"}
        ],
    }))
}

#[derive(Default)]
struct CardQuery {
    account_numbers: Vec<String>,
    card_owner_id: Option<String>,
    statuses: Vec<String>,
    limit: Option<usize>,
    offset: usize,
}

fn parse_card_query(raw: Option<&str>) -> Result<CardQuery, StatusCode> {
    let mut query = CardQuery::default();
    let Some(raw) = raw else {
        return Ok(query);
    };
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            "account_numbers[]" => query.account_numbers.push(value.into_owned()),
            "card_owner_id" => query.card_owner_id = Some(value.into_owned()),
            "statuses[]" => query.statuses.push(value.into_owned()),
            "limit" => query.limit = Some(value.parse().map_err(|_| StatusCode::BAD_REQUEST)?),
            "offset" => query.offset = value.parse().map_err(|_| StatusCode::BAD_REQUEST)?,
            _ => {}
        }
    }
    Ok(query)
}

async fn list_cards(
    State(db): State<Db>,
    RawQuery(raw): RawQuery,
) -> Result<Json<CardList>, StatusCode> {
    let query = parse_card_query(raw.as_deref())?;
    let store = db.read().await;
    let matching: Vec<Card> = store
        .cards
        .values()
        .filter(|card| {
            query.account_numbers.is_empty() || query.account_numbers.contains(&card.account_number)
        })
        .filter(|card| {
            query
                .card_owner_id
                .as_ref()
                .map_or(true, |owner| owner == &card.card_owner_id)
        })
        .filter(|card| {
            query.statuses.is_empty() || query.statuses.iter().any(|s| s == card.status.as_str())
        })
        .cloned()
        .collect();
    let total = matching.len();
    let items = matching
        .into_iter()
        .skip(query.offset)
        .take(query.limit.unwrap_or(usize::MAX))
        .collect();
    Ok(Json(CardList { items, total }))
}

async fn create_card(
    State(db): State<Db>,
    Json(input): Json<CreateCard>,
) -> (StatusCode, Json<Card>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let card = Card {
        id: store.next_id,
        account_number: input.account_number,
        card_owner_id: input.card_owner_id,
        client_id: input.client_id,
        delivery_type: input.delivery_type,
        status: CardStatus::Processing,
    };
    tracing::debug!(
        id = card.id,
        delivery_address = input.delivery_address.is_some(),
        "card issued"
    );
    store.cards.insert(card.id, card.clone());
    (StatusCode::CREATED, Json(card))
}

async fn transition(
    db: &Db,
    id: u64,
    from: &[CardStatus],
    to: CardStatus,
) -> Result<Json<Card>, StatusCode> {
    let mut store = db.write().await;
    let card = store.cards.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if !from.contains(&card.status) {
        return Err(StatusCode::CONFLICT);
    }
    card.status = to;
    Ok(Json(card.clone()))
}

async fn activate_card(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Card>, StatusCode> {
    transition(&db, id, &[CardStatus::Processing], CardStatus::Active).await
}

async fn enable_card(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Card>, StatusCode> {
    transition(&db, id, &[CardStatus::Inactive], CardStatus::Active).await
}

async fn deactivate_card(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Card>, StatusCode> {
    transition(&db, id, &[CardStatus::Active], CardStatus::Inactive).await
}

async fn cancel_card(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Card>, StatusCode> {
    transition(
        &db,
        id,
        &[CardStatus::Processing, CardStatus::Active, CardStatus::Inactive],
        CardStatus::Cancelled,
    )
    .await
}

async fn retrieve_pin(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<PinRequest>,
) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    let card = store.cards.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    if card.status == CardStatus::Cancelled {
        return Err(StatusCode::CONFLICT);
    }
    if input.cvv2 != cvv_for(id) {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(json!({ "pin": pin_for(id) })))
}

async fn get_card_limit(
    State(db): State<Db>,
    Path(account_number): Path<String>,
) -> Json<CardLimit> {
    let store = db.read().await;
    let limit = store
        .limits
        .get(&account_number)
        .cloned()
        .unwrap_or_else(default_card_limit);
    Json(CardLimit { limit })
}

async fn set_card_limit(
    State(db): State<Db>,
    Path(account_number): Path<String>,
    Json(input): Json<CardLimit>,
) -> Result<Json<CardLimit>, StatusCode> {
    match input.limit.amount.parse::<f64>() {
        Ok(amount) if amount >= 0.0 => {}
        _ => return Err(StatusCode::UNPROCESSABLE_ENTITY),
    }
    db.write()
        .await
        .limits
        .insert(account_number, input.limit.clone());
    Ok(Json(input))
}
