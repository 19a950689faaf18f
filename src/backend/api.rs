use serde::de::DeserializeOwned;
use url::Url;

use super::{
    BackendError, MachineDetail, MachineSummary, MachineTypeInfo, NewMachine,
    PredictionHistoryEntry, PredictionResult, SensorReading, TwinBackend,
};
use crate::http_client;

const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;
const MAX_ERROR_BYTES: usize = 64 * 1024;

/// [`TwinBackend`] over HTTP/JSON.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    base: Url,
}

impl HttpBackend {
    /// Build a client rooted at `base_url` (e.g. `http://127.0.0.1:8000/`).
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let invalid = |reason: String| BackendError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };
        let base = Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) base URL".into()));
        }
        Ok(Self { base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Append percent-encoded path segments to the base path.
    fn endpoint(&self, segments: &[&str], trailing_slash: bool) -> Result<Url, BackendError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut path = url.path_segments_mut().map_err(|()| BackendError::InvalidUrl {
                url: self.base.to_string(),
                reason: "URL cannot carry a path".into(),
            })?;
            path.pop_if_empty().extend(segments);
            if trailing_slash {
                path.push("");
            }
        }
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, request: ureq::Request) -> Result<T, BackendError> {
        let response = request
            .set("Accept", "application/json")
            .call()
            .map_err(map_call_error)?;
        decode(response)
    }
}

impl TwinBackend for HttpBackend {
    fn list_machines(&self) -> Result<Vec<MachineSummary>, BackendError> {
        let url = self.endpoint(&["machines"], true)?;
        self.get_json(http_client::agent().get(url.as_str()))
    }

    fn machine(&self, machine_id: &str) -> Result<MachineDetail, BackendError> {
        let url = self.endpoint(&["machines", machine_id], false)?;
        self.get_json(http_client::agent().get(url.as_str()))
    }

    fn machine_type(&self, machine_id: &str) -> Result<MachineTypeInfo, BackendError> {
        let url = self.endpoint(&["machines", machine_id, "type"], false)?;
        self.get_json(http_client::agent().get(url.as_str()))
    }

    fn history(
        &self,
        machine_id: &str,
        limit: u32,
    ) -> Result<Vec<PredictionHistoryEntry>, BackendError> {
        let url = self.endpoint(&["machines", machine_id, "history"], false)?;
        let request = http_client::agent()
            .get(url.as_str())
            .query("limit", &limit.to_string());
        self.get_json(request)
    }

    fn create_machine(&self, machine: &NewMachine) -> Result<(), BackendError> {
        let url = self.endpoint(&["machines"], true)?;
        http_client::agent()
            .post(url.as_str())
            .set("Accept", "application/json")
            .send_json(machine)
            .map_err(map_call_error)?;
        Ok(())
    }

    fn predict(&self, reading: &SensorReading) -> Result<PredictionResult, BackendError> {
        let url = self.endpoint(&["predict"], true)?;
        let response = http_client::agent()
            .post(url.as_str())
            .set("Accept", "application/json")
            .send_json(reading)
            .map_err(map_call_error)?;
        decode(response)
    }
}

fn decode<T: DeserializeOwned>(response: ureq::Response) -> Result<T, BackendError> {
    let bytes = http_client::read_response_bytes(response, MAX_RESPONSE_BYTES)
        .map_err(|err| BackendError::Transport(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| BackendError::Decode(err.to_string()))
}

fn map_call_error(err: ureq::Error) -> BackendError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = http_client::read_response_text(response, MAX_ERROR_BYTES)
                .unwrap_or_default();
            BackendError::Status {
                code,
                detail: error_detail(code, &body),
            }
        }
        ureq::Error::Transport(err) => BackendError::Transport(err.to_string()),
    }
}

/// Pull `detail` out of an error body. String details are used as-is,
/// structured ones (validation errors) are rendered as compact JSON.
fn error_detail(code: u16, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|mut value| value.get_mut("detail").map(serde_json::Value::take));
    match detail {
        Some(serde_json::Value::String(text)) => text,
        Some(serde_json::Value::Null) | None => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP {code}")
            } else {
                trimmed.to_string()
            }
        }
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BladeReading, MachineType, MotorLimits};
    use crate::health::HealthStatus;
    use crate::http_client::test_server::{json_response, serve_once};
    use std::time::Duration;

    fn backend_for(url: &str) -> HttpBackend {
        HttpBackend::new(url).unwrap()
    }

    fn request_line(raw: &str) -> &str {
        raw.lines().next().unwrap_or_default()
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            HttpBackend::new("not a url"),
            Err(BackendError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpBackend::new("mailto:ops@example.com"),
            Err(BackendError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn endpoints_keep_base_path_and_encode_ids() {
        let backend = backend_for("http://twin.local:8000/api/");
        let url = backend.endpoint(&["machines", "line 3/A"], false).unwrap();
        assert_eq!(url.as_str(), "http://twin.local:8000/api/machines/line%203%2FA");
        let url = backend.endpoint(&["machines"], true).unwrap();
        assert_eq!(url.as_str(), "http://twin.local:8000/api/machines/");
        let bare = backend_for("http://twin.local:8000");
        let url = bare.endpoint(&["predict"], true).unwrap();
        assert_eq!(url.as_str(), "http://twin.local:8000/predict/");
    }

    #[test]
    fn list_machines_decodes_rows() {
        let body = r#"[{"machine_id":"M-1","name":"Pump","type":"motor","location":null,
            "current_status":"Warning","current_rul":120.5}]"#;
        let (url, requests) = serve_once(json_response("200 OK", body));
        let machines = backend_for(&url).list_machines().unwrap();
        assert_eq!(machines.len(), 1);
        assert_eq!(machines[0].current_status, Some(HealthStatus::Warning));
        let raw = requests.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(request_line(&raw), "GET /machines/ HTTP/1.1");
    }

    #[test]
    fn history_sends_limit_query() {
        let (url, requests) = serve_once(json_response("200 OK", "[]"));
        let rows = backend_for(&url).history("M-1", 10).unwrap();
        assert!(rows.is_empty());
        let raw = requests.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(request_line(&raw), "GET /machines/M-1/history?limit=10 HTTP/1.1");
    }

    #[test]
    fn predict_posts_reading_json() {
        let body = r##"{"health_status":"Healthy","rul_hours":812.0,
            "confidence_scores":{"Healthy":0.93},"color_code":"#28a745",
            "maintenance_required":false}"##;
        let (url, requests) = serve_once(json_response("200 OK", body));
        let reading = SensorReading::Blade(BladeReading {
            machine_id: "B-2".into(),
            torque: 41.0,
            ..BladeReading::default()
        });
        let result = backend_for(&url).predict(&reading).unwrap();
        assert_eq!(result.health_status, HealthStatus::Healthy);
        let raw = requests.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(request_line(&raw), "POST /predict/ HTTP/1.1");
        assert!(raw.contains("\"machine_id\":\"B-2\""));
        assert!(raw.contains("\"torque\":41.0"));
    }

    #[test]
    fn create_machine_surfaces_string_detail() {
        let (url, _requests) = serve_once(json_response(
            "400 Bad Request",
            r#"{"detail":"Machine ID already exists"}"#,
        ));
        let machine = NewMachine {
            machine_id: "M-1".into(),
            name: "Pump".into(),
            machine_type: MachineType::Motor,
            manufacturer: None,
            model: None,
            location: None,
            motor_details: Some(MotorLimits::default()),
            blade_details: None,
        };
        let err = backend_for(&url).create_machine(&machine).unwrap_err();
        assert_eq!(
            err,
            BackendError::Status {
                code: 400,
                detail: "Machine ID already exists".into()
            }
        );
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let (url, _requests) = serve_once(json_response(
            "422 Unprocessable Entity",
            r#"{"detail":[{"loc":["body","name"],"msg":"field required"}]}"#,
        ));
        let err = backend_for(&url).machine("M-1").unwrap_err();
        let BackendError::Status { code, detail } = err else {
            panic!("expected status error");
        };
        assert_eq!(code, 422);
        assert!(detail.starts_with('['));
        assert!(detail.contains("field required"));
    }

    #[test]
    fn error_detail_falls_back_to_body_or_code() {
        assert_eq!(error_detail(502, ""), "HTTP 502");
        assert_eq!(error_detail(500, "Internal Server Error"), "Internal Server Error");
        assert_eq!(error_detail(404, r#"{"detail":"Machine not found"}"#), "Machine not found");
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let (url, _requests) = serve_once(json_response("200 OK", "<html></html>"));
        let err = backend_for(&url).machine_type("M-1").unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[test]
    fn refused_connection_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = backend_for(&format!("http://{addr}/"))
            .list_machines()
            .unwrap_err();
        assert!(matches!(err, BackendError::Transport(_)));
    }
}
