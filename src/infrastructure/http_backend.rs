// HTTP implementation of the backend seam
use crate::application::backend::{BackendError, ReportDocument, SolarBackend};
use crate::domain::installation::Installation;
use crate::domain::telemetry::{Alert, Prediction, TelemetryReading};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Client for the read-only monitoring API of spec'd shape:
/// `/api/installations`, `/api/latest/{id}`, `/api/predictions/{id}`,
/// `/api/alerts/{id}`, `/api/report/{id}`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_response(&self, endpoint: &str) -> Result<reqwest::Response, BackendError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(endpoint, "fetching");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            // The body is not read on failure.
            return Err(BackendError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Fetches a JSON list and validates it record by record. A malformed
    /// element (wrong shape, out-of-contract severity) is quarantined with
    /// an error log while the well-formed remainder is kept, so one bad
    /// record cannot take down a whole slot.
    async fn get_validated_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Vec<T>, BackendError> {
        let response = self.get_response(endpoint).await?;
        let raw: Vec<serde_json::Value> =
            response.json().await.map_err(|e| BackendError::Decode {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            })?;

        let mut items = Vec::with_capacity(raw.len());
        for value in raw {
            match serde_json::from_value::<T>(value) {
                Ok(item) => items.push(item),
                Err(e) => {
                    error!(endpoint, error = %e, "quarantining malformed record (upstream contract violation)");
                }
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl SolarBackend for HttpBackend {
    async fn list_installations(&self) -> Result<Vec<Installation>, BackendError> {
        self.get_validated_list("/api/installations").await
    }

    async fn latest_telemetry(
        &self,
        installation_id: &str,
    ) -> Result<Vec<TelemetryReading>, BackendError> {
        self.get_validated_list(&format!("/api/latest/{installation_id}"))
            .await
    }

    async fn predictions(&self, installation_id: &str) -> Result<Vec<Prediction>, BackendError> {
        self.get_validated_list(&format!("/api/predictions/{installation_id}"))
            .await
    }

    async fn alerts(&self, installation_id: &str) -> Result<Vec<Alert>, BackendError> {
        self.get_validated_list(&format!("/api/alerts/{installation_id}"))
            .await
    }

    async fn report(&self, installation_id: &str) -> Result<ReportDocument, BackendError> {
        let endpoint = format!("/api/report/{installation_id}");
        let response = self.get_response(&endpoint).await?;
        response
            .json::<ReportDocument>()
            .await
            .map_err(|e| BackendError::Decode {
                endpoint,
                detail: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    fn backend(server: &Server) -> HttpBackend {
        HttpBackend::new(&server.url(), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn lists_installations() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/installations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([{
                    "id": "INST_001",
                    "name": "Mumbai Residential",
                    "location": "Mumbai",
                    "capacity_kw": 5.0,
                    "panel_count": 16,
                    "climatic_zone": "tropical"
                }])
                .to_string(),
            )
            .create_async()
            .await;

        let installations = backend(&server).list_installations().await.unwrap();
        assert_eq!(installations.len(), 1);
        assert_eq!(installations[0].id, "INST_001");
        assert_eq!(installations[0].capacity_kw, 5.0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_2xx_is_a_status_error_for_that_endpoint_only() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/latest/INST_001")
            .with_status(503)
            .create_async()
            .await;

        let result = backend(&server).latest_telemetry("INST_001").await;
        match result {
            Err(BackendError::Status { endpoint, status }) => {
                assert_eq!(endpoint, "/api/latest/INST_001");
                assert_eq!(status, 503);
            }
            other => panic!("expected status error, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn telemetry_parses_most_recent_first() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/latest/INST_001")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    {
                        "timestamp": "2024-01-15T10:30:00.500000",
                        "pv_power_kw": 5.0,
                        "irradiation_wm2": 900.0,
                        "module_temp_c": 44.0,
                        "ambient_temp_c": 33.0,
                        "dust_level": 0.2,
                        "inverter_efficiency": 96.0
                    },
                    {
                        "timestamp": "2024-01-15T10:15:00",
                        "pv_power_kw": 3.0,
                        "irradiation_wm2": 700.0,
                        "module_temp_c": 40.0,
                        "ambient_temp_c": 32.0,
                        "dust_level": 0.2,
                        "inverter_efficiency": 95.5
                    }
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let readings = backend(&server).latest_telemetry("INST_001").await.unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].pv_power_kw, 5.0);
        assert_eq!(readings[1].pv_power_kw, 3.0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn malformed_records_are_quarantined_not_fatal() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/alerts/INST_001")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    {
                        "id": 1,
                        "timestamp": "2024-01-15T09:00:00",
                        "alert_type": "DUST_ACCUMULATION",
                        "severity": "HIGH",
                        "message": "dust level critical"
                    },
                    {
                        "id": 2,
                        "timestamp": "2024-01-15T09:05:00",
                        "alert_type": "LOW_EFFICIENCY",
                        "severity": "SEVERE",
                        "message": "severity outside the contract"
                    },
                    {
                        "id": 3,
                        "timestamp": "2024-01-15T09:10:00",
                        "alert_type": "HIGH_TEMPERATURE",
                        "severity": "LOW",
                        "message": "running warm"
                    }
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let alerts = backend(&server).alerts("INST_001").await.unwrap();
        let ids: Vec<i64> = alerts.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetches_a_generated_report() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/report/INST_002")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"report": "Performance within expectations."}).to_string())
            .create_async()
            .await;

        let document = backend(&server).report("INST_002").await.unwrap();
        assert_eq!(document.report, "Performance within expectations.");
        mock.assert_async().await;
    }
}
