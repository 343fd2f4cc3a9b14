//! Demo creation endpoints.
//!
//! These simulate entity creation for installs with no backend: the record is
//! synthesized in memory, held for an artificial delay, and returned without
//! being persisted anywhere. Identifiers are timestamp-derived, so repeated
//! identical calls yield different ids and no idempotence is intended.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::time::{sleep, Duration};
use tracing::debug;

use crate::gateway::envelope::{self, messages};
use crate::gateway::server::AppState;

// Artificial latency per endpoint (ms), roughly matching the real
// backend's response times so the dashboard feels realistic in demos
const BOOKING_DELAY_MS: u64 = 1500;
const CAMPAIGN_DELAY_MS: u64 = 2000;
const LEAD_DELAY_MS: u64 = 800;
const TICKET_DELAY_MS: u64 = 1000;
const PAYMENT_DELAY_MS: u64 = 3000;

/// Timestamp-derived identifier, e.g. `BKG-1724900000123456789`
fn synthesize_id(prefix: &str) -> String {
    let now = chrono::Utc::now();
    let stamp = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_millis());
    format!("{}-{}", prefix, stamp)
}

/// Merge caller-supplied fields with the server-set ones
fn synthesize_record(prefix: &str, status: &str, fields: Value) -> Value {
    let mut record = fields;
    record["id"] = json!(synthesize_id(prefix));
    record["status"] = json!(status);
    record["createdAt"] = json!(chrono::Utc::now().to_rfc3339());
    record
}

fn parse_payload<T: for<'de> Deserialize<'de>>(body: &Bytes) -> Result<T, Response> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("Rejected malformed demo payload: {}", e);
        envelope::error_response(StatusCode::BAD_REQUEST, messages::INVALID_PAYLOAD)
    })
}

// ===== Bookings =====

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreateRequest {
    pub property_id: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "priceSAR")]
    pub price_sar: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

pub async fn create_booking(State(_state): State<AppState>, body: Bytes) -> Response {
    let payload: BookingCreateRequest = match parse_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    sleep(Duration::from_millis(BOOKING_DELAY_MS)).await;

    let mut booking = synthesize_record(
        "BKG",
        "pending",
        serde_json::to_value(&payload).unwrap_or_else(|_| json!({})),
    );
    // Demo bookings always originate from the voice agent
    booking["source"] = json!("voice_agent");

    envelope::entity_success("booking", booking, messages::BOOKING_CREATED)
}

// ===== Campaigns =====

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignCreateRequest {
    pub name: String,
    #[serde(default)]
    pub campaign_type: Option<String>,
    #[serde(default)]
    pub target_area: Option<String>,
    #[serde(default, rename = "budgetSAR")]
    pub budget_sar: Option<f64>,
    #[serde(default)]
    pub script: Option<String>,
}

pub async fn create_campaign(State(_state): State<AppState>, body: Bytes) -> Response {
    let payload: CampaignCreateRequest = match parse_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    sleep(Duration::from_millis(CAMPAIGN_DELAY_MS)).await;

    let campaign = synthesize_record(
        "CMP",
        "active",
        serde_json::to_value(&payload).unwrap_or_else(|_| json!({})),
    );

    envelope::entity_success("campaign", campaign, messages::CAMPAIGN_CREATED)
}

// ===== Leads =====

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadCreateRequest {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub interest: Option<String>,
}

pub async fn create_lead(State(_state): State<AppState>, body: Bytes) -> Response {
    let payload: LeadCreateRequest = match parse_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    sleep(Duration::from_millis(LEAD_DELAY_MS)).await;

    let lead = synthesize_record(
        "LED",
        "open",
        serde_json::to_value(&payload).unwrap_or_else(|_| json!({})),
    );

    envelope::entity_success("lead", lead, messages::LEAD_CREATED)
}

// ===== Tickets =====

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCreateRequest {
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub requester_name: Option<String>,
}

pub async fn create_ticket(State(_state): State<AppState>, body: Bytes) -> Response {
    let payload: TicketCreateRequest = match parse_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    sleep(Duration::from_millis(TICKET_DELAY_MS)).await;

    let ticket = synthesize_record(
        "TKT",
        "open",
        serde_json::to_value(&payload).unwrap_or_else(|_| json!({})),
    );

    envelope::entity_success("ticket", ticket, messages::TICKET_CREATED)
}

// ===== Payments =====

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreateRequest {
    #[serde(rename = "amountSAR")]
    pub amount_sar: f64,
    #[serde(default)]
    pub booking_id: Option<String>,
    #[serde(default)]
    pub payer_name: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

pub async fn create_payment(State(_state): State<AppState>, body: Bytes) -> Response {
    let payload: PaymentCreateRequest = match parse_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    sleep(Duration::from_millis(PAYMENT_DELAY_MS)).await;

    let payment = synthesize_record(
        "PAY",
        "pending",
        serde_json::to_value(&payload).unwrap_or_else(|_| json!({})),
    );

    envelope::entity_success("payment", payment, messages::PAYMENT_CREATED)
}
