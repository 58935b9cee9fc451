use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use metdesk_config::AppConfig;
use metdesk_core::{
    compute_daily_summary, default_rainfall_date, field_catalogue, minutes_to_hm,
    parse_observation_hour, parse_reference_date, summarize_day, validate_slots, CoreError,
    DailySummaryForm, DayWindow, FirstCardEntry, RainfallEpisodeSummary, RawPressureReading,
    RawTemperatureReading, RawWeatherObservation, RecordSource, SecondCardEntry, SlotClassifier,
    TimeSlot,
};
use opentelemetry::metrics::{Counter, MeterProvider};
use opentelemetry_prometheus::exporter;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use prometheus::{Encoder, Registry, TextEncoder};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Cards kept per card kind before the oldest are dropped
pub const CARD_CAP: usize = 10_000;

/// In-memory card store, standing in for the database collaborator
pub struct MemoryStore {
    capacity: usize,
    first_cards: Mutex<Vec<FirstCardEntry>>,
    second_cards: Mutex<Vec<SecondCardEntry>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_capacity(CARD_CAP)
    }
}

impl MemoryStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            first_cards: Mutex::new(Vec::new()),
            second_cards: Mutex::new(Vec::new()),
        }
    }

    pub async fn add_first_card(&self, entry: FirstCardEntry) {
        let mut cards = self.first_cards.lock().await;
        cards.push(entry);
        trim_oldest(&mut cards, self.capacity);
    }

    pub async fn add_second_card(&self, entry: SecondCardEntry) {
        let mut cards = self.second_cards.lock().await;
        cards.push(entry);
        trim_oldest(&mut cards, self.capacity);
    }
}

fn trim_oldest<T>(cards: &mut Vec<T>, capacity: usize) {
    if cards.len() > capacity {
        let overflow = cards.len() - capacity;
        cards.drain(0..overflow);
        tracing::debug!(overflow, capacity, "oldest cards dropped");
    }
}

#[async_trait::async_trait]
impl RecordSource for MemoryStore {
    async fn first_card_entries(
        &self,
        station_id: &str,
        window: &DayWindow,
    ) -> Result<Vec<FirstCardEntry>> {
        let cards = self.first_cards.lock().await;
        Ok(cards
            .iter()
            .filter(|e| e.station_id == station_id && window.contains(e.observed_at))
            .cloned()
            .collect())
    }

    async fn second_card_entries(
        &self,
        station_id: &str,
        window: &DayWindow,
    ) -> Result<Vec<SecondCardEntry>> {
        let cards = self.second_cards.lock().await;
        Ok(cards
            .iter()
            .filter(|e| e.station_id == station_id && window.contains(e.observed_at))
            .cloned()
            .collect())
    }
}

pub struct AppState {
    ready: AtomicBool,
    registry: Registry,
    #[allow(dead_code)]
    provider: SdkMeterProvider,
    requests_total: Counter<u64>,
    store: MemoryStore,
    station_id: String,
    data_type: String,
    classifier: SlotClassifier,
}

pub fn build_app(cfg: &AppConfig) -> Result<(Router, Arc<AppState>)> {
    // Prometheus exporter via OpenTelemetry
    let registry = Registry::new();
    let reader = exporter().with_registry(registry.clone()).build()?;
    let provider = SdkMeterProvider::builder().with_reader(reader).build();
    let meter = provider.meter("metdesk-server");

    let requests_total = meter
        .u64_counter("metdesk_requests_total")
        .with_description("Total HTTP requests served")
        .init();

    let state = Arc::new(AppState {
        ready: AtomicBool::new(false),
        registry,
        provider,
        requests_total,
        store: MemoryStore::default(),
        station_id: cfg.station_id(),
        data_type: cfg.data_type(),
        classifier: SlotClassifier::new(cfg.intermittent_gap_minutes()),
    });

    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/v1/fields", get(fields))
        .route("/api/v1/first-card", post(add_first_card))
        .route("/api/v1/second-card", post(add_second_card))
        .route(
            "/api/v1/daily-summary",
            get(stored_daily_summary).post(posted_daily_summary),
        )
        .route("/api/v1/rainfall/classify", post(classify_rainfall))
        .route("/api/v1/rainfall/default-date", get(rainfall_default_date))
        .with_state(Arc::clone(&state));

    Ok((router, state))
}

pub fn set_ready(state: &Arc<AppState>, is_ready: bool) {
    state.ready.store(is_ready, Ordering::Relaxed);
}

/// Handler error mapped onto an HTTP status with a JSON body
pub enum ApiError {
    Invalid(CoreError),
    Internal(anyhow::Error),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Invalid(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Invalid(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

async fn healthz(State(state): State<Arc<AppState>>) -> StatusCode {
    state.requests_total.add(1, &[]);
    StatusCode::OK
}

async fn readyz(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.ready.load(Ordering::Relaxed) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics(
    State(state): State<Arc<AppState>>,
) -> (
    [(axum::http::header::HeaderName, axum::http::HeaderValue); 1],
    String,
) {
    let encoder = TextEncoder::new();
    let metric_families = state.registry.gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buf) {
        tracing::warn!(error=?e, "failed to encode metrics");
    }
    let body = String::from_utf8(buf).unwrap_or_default();
    let header = (
        header::CONTENT_TYPE,
        axum::http::HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    ([header], body)
}

async fn fields(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.requests_total.add(1, &[]);
    Json(field_catalogue())
}

async fn add_first_card(
    State(state): State<Arc<AppState>>,
    Json(entry): Json<FirstCardEntry>,
) -> impl IntoResponse {
    state.requests_total.add(1, &[]);
    tracing::debug!(station = %entry.station_id, observed_at = %entry.observed_at, "first card stored");
    state.store.add_first_card(entry).await;
    (StatusCode::CREATED, Json(serde_json::json!({"status":"ok"})))
}

async fn add_second_card(
    State(state): State<Arc<AppState>>,
    Json(entry): Json<SecondCardEntry>,
) -> Result<impl IntoResponse, ApiError> {
    state.requests_total.add(1, &[]);
    if let Some(slots) = entry.observation.rain_time_slots.as_deref() {
        validate_slots(slots)?;
    }
    tracing::debug!(station = %entry.station_id, observed_at = %entry.observed_at, "second card stored");
    state.store.add_second_card(entry).await;
    Ok((StatusCode::CREATED, Json(serde_json::json!({"status":"ok"}))))
}

#[derive(Deserialize)]
struct SummaryQuery {
    station: Option<String>,
    date: Option<String>,
}

fn reference_date(raw: Option<&str>) -> Result<NaiveDate, CoreError> {
    match raw {
        Some(s) => parse_reference_date(s),
        None => Ok(Utc::now().date_naive()),
    }
}

async fn stored_daily_summary(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SummaryQuery>,
) -> Result<Json<DailySummaryForm>, ApiError> {
    state.requests_total.add(1, &[]);
    let date = reference_date(q.date.as_deref())?;
    let station = q.station.unwrap_or_else(|| state.station_id.clone());
    let form = summarize_day(&state.store, &station, date, &state.data_type).await?;
    Ok(Json(form))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRequest {
    date: String,
    station_no: Option<String>,
    #[serde(default)]
    pressure: Vec<RawPressureReading>,
    #[serde(default)]
    temperature: Vec<RawTemperatureReading>,
    #[serde(default)]
    weather: Vec<RawWeatherObservation>,
}

async fn posted_daily_summary(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ComputeRequest>,
) -> Result<Json<DailySummaryForm>, ApiError> {
    state.requests_total.add(1, &[]);
    let date = parse_reference_date(&req.date)?;
    let measurements = compute_daily_summary(&req.pressure, &req.temperature, &req.weather, date);
    let station = req.station_no.unwrap_or_else(|| state.station_id.clone());
    Ok(Json(DailySummaryForm::new(
        station,
        state.data_type.clone(),
        date,
        measurements,
    )))
}

#[derive(Deserialize)]
struct ClassifyRequest {
    slots: Vec<TimeSlot>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyResponse {
    #[serde(flatten)]
    summary: RainfallEpisodeSummary,
    total_duration: String,
}

async fn classify_rainfall(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    state.requests_total.add(1, &[]);
    validate_slots(&req.slots)?;
    let summary = state.classifier.classify(&req.slots);
    tracing::debug!(
        slots = summary.total_slots,
        classification = summary.classification.as_str(),
        "rainfall episode classified"
    );
    let total_duration = minutes_to_hm(summary.total_minutes);
    Ok(Json(ClassifyResponse {
        summary,
        total_duration,
    }))
}

#[derive(Deserialize)]
struct DefaultDateQuery {
    hour: Option<String>,
}

async fn rainfall_default_date(
    State(state): State<Arc<AppState>>,
    Query(q): Query<DefaultDateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    state.requests_total.add(1, &[]);
    let hour = q.hour.as_deref().map(parse_observation_hour).transpose()?;
    Ok(Json(default_rainfall_date(Utc::now(), hour)))
}
