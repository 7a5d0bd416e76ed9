//! FILENAME: app/server/src/routes/info.rs

use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Period {
    #[serde(rename = "debut")]
    pub start: String,
    #[serde(rename = "fin")]
    pub end: String,
}

/// Service banner: version, dataset size and the endpoint directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub dataset: &'static str,
    #[serde(rename = "nb_lignes")]
    pub row_count: usize,
    #[serde(rename = "periode")]
    pub period: Option<Period>,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

const ENDPOINTS: &[(&str, &str)] = &[
    ("kpi_globaux", "/kpi/globaux"),
    ("top_produits", "/kpi/produits/top"),
    ("categories", "/kpi/categories"),
    ("evolution_temporelle", "/kpi/temporel"),
    ("performance_geo", "/kpi/geographique"),
    ("analyse_clients", "/kpi/clients"),
    ("valeurs_filtres", "/filters/valeurs"),
    ("commandes", "/data/commandes"),
];

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(service_info))
}

/// `GET /`
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    let dataset = &state.dataset;
    Json(ServiceInfo {
        message: "API Superstore BI",
        version: env!("CARGO_PKG_VERSION"),
        dataset: "Sample Superstore",
        row_count: dataset.len(),
        period: dataset.date_range().map(|(first, last)| Period {
            start: first.format("%Y-%m-%d").to_string(),
            end: last.format("%Y-%m-%d").to_string(),
        }),
        endpoints: ENDPOINTS.iter().copied().collect(),
    })
}
