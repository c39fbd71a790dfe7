//! HTTP client for the remote `/clients` resource.
//!
//! | Method | Path                | Operation |
//! |--------|---------------------|-----------|
//! | GET    | `/clients`          | [`ClientService::list`] |
//! | GET    | `/clients?id={id}`  | [`ClientService::get`] |
//! | POST   | `/clients`          | [`ClientService::create`] |
//! | PUT    | `/clients/{id}`     | [`ClientService::update`] |
//! | DELETE | `/clients/{id}`     | [`ClientService::delete`] |
//!
//! Every call is a single round trip without retries. Failures surface as
//! one fixed message per operation (see [`ApiError`]).

pub mod error;
pub mod types;

pub use error::{ApiError, TransportError};
pub use types::{ClientPayload, Record};

use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::cpf;

const RESOURCE: &str = "clients";

/// How the `cpf` field is written into outgoing payloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CpfWireFormat {
    /// Canonical eleven digits, e.g. `11122233344`.
    #[default]
    Digits,
    /// Display form, e.g. `111.222.333-44`.
    Masked,
}

impl CpfWireFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "digits" | "canonical" => Some(Self::Digits),
            "masked" | "display" => Some(Self::Masked),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Digits => "digits",
            Self::Masked => "masked",
        }
    }

    /// Render a CPF the way the service expects it.
    pub fn apply(self, raw: &str) -> String {
        let m = cpf::mask(raw);
        match self {
            Self::Digits => m.digits,
            Self::Masked => m.display,
        }
    }
}

/// Typed access to the `/clients` endpoints under one base URL.
#[derive(Clone, Debug)]
pub struct ClientService {
    http: reqwest::Client,
    base_url: Url,
    cpf_format: CpfWireFormat,
}

impl ClientService {
    /// Build a service. `timeout` of `None` keeps the transport default (no limit).
    pub fn new(
        base_url: Url,
        timeout: Option<Duration>,
        cpf_format: CpfWireFormat,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder.build().map_err(ApiError::Client)?;
        Ok(Self {
            http,
            base_url,
            cpf_format,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /clients`, in the order the service returns them.
    pub async fn list(&self) -> Result<Vec<Record>, ApiError> {
        let url = self.collection_url().map_err(ApiError::List)?;
        debug!(%url, "listing clients");
        let body = self
            .send(self.http.get(url))
            .await
            .map_err(ApiError::List)?;
        let records: Vec<Record> = serde_json::from_str(&body)
            .map_err(|e| ApiError::List(TransportError::Decode(e)))?;
        debug!(count = records.len(), "clients loaded");
        Ok(records)
    }

    /// `GET /clients?id={id}`.
    ///
    /// The service may answer with the object itself or with a sequence
    /// holding it; the first element of a sequence is taken. An empty body,
    /// `null` or an empty sequence is reported as [`ApiError::NoData`].
    pub async fn get(&self, id: &str) -> Result<Record, ApiError> {
        let url = self.collection_url().map_err(ApiError::Get)?;
        debug!(%url, id, "loading client");
        let body = self
            .send(self.http.get(url).query(&[("id", id)]))
            .await
            .map_err(ApiError::Get)?;
        if body.trim().is_empty() {
            return Err(ApiError::NoData);
        }
        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| ApiError::Get(TransportError::Decode(e)))?;
        let item = match value {
            serde_json::Value::Null => return Err(ApiError::NoData),
            serde_json::Value::Array(items) => match items.into_iter().next() {
                Some(first) => first,
                None => return Err(ApiError::NoData),
            },
            other => other,
        };
        serde_json::from_value(item).map_err(|e| ApiError::Get(TransportError::Decode(e)))
    }

    /// `POST /clients`; the returned record carries the assigned id.
    pub async fn create(&self, payload: &ClientPayload) -> Result<Record, ApiError> {
        let url = self.collection_url().map_err(ApiError::Create)?;
        let body = self.wire_payload(payload);
        debug!(%url, ?body, "creating client");
        let text = self
            .send(self.http.post(url).json(&body))
            .await
            .map_err(ApiError::Create)?;
        serde_json::from_str(&text).map_err(|e| ApiError::Create(TransportError::Decode(e)))
    }

    /// `PUT /clients/{id}` with all four mutable fields.
    pub async fn update(&self, id: &str, payload: &ClientPayload) -> Result<Record, ApiError> {
        let url = self.item_url(id).map_err(ApiError::Update)?;
        let body = self.wire_payload(payload);
        debug!(%url, ?body, "updating client");
        let text = self
            .send(self.http.put(url).json(&body))
            .await
            .map_err(ApiError::Update)?;
        debug!(response = %text, "update answered");
        serde_json::from_str(&text).map_err(|e| ApiError::Update(TransportError::Decode(e)))
    }

    /// `DELETE /clients/{id}`.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.item_url(id).map_err(ApiError::Delete)?;
        debug!(%url, "deleting client");
        self.send(self.http.delete(url))
            .await
            .map_err(ApiError::Delete)?;
        Ok(())
    }

    fn wire_payload(&self, payload: &ClientPayload) -> ClientPayload {
        ClientPayload {
            cpf: self.cpf_format.apply(&payload.cpf),
            ..payload.clone()
        }
    }

    /// Send a request and return the body text of a 2xx answer.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<String, TransportError> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "service rejected request");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.text().await?)
    }

    fn collection_url(&self) -> Result<Url, TransportError> {
        self.url_with(&[RESOURCE])
    }

    fn item_url(&self, id: &str) -> Result<Url, TransportError> {
        self.url_with(&[RESOURCE, id])
    }

    fn url_with(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(base: &str) -> ClientService {
        ClientService::new(base.parse().unwrap(), None, CpfWireFormat::Digits).unwrap()
    }

    #[test]
    fn urls_keep_base_path_and_escape_ids() {
        let svc = service("http://localhost:8080/api");
        assert_eq!(
            svc.collection_url().unwrap().as_str(),
            "http://localhost:8080/api/clients"
        );
        assert_eq!(
            svc.item_url("7").unwrap().as_str(),
            "http://localhost:8080/api/clients/7"
        );
        assert_eq!(
            svc.item_url("a/b").unwrap().as_str(),
            "http://localhost:8080/api/clients/a%2Fb"
        );
    }

    #[test]
    fn trailing_slash_in_base_is_not_doubled() {
        let svc = service("http://localhost:8080/api/");
        assert_eq!(
            svc.collection_url().unwrap().as_str(),
            "http://localhost:8080/api/clients"
        );
    }

    #[test]
    fn wire_format_applies_to_cpf_only() {
        let payload = ClientPayload {
            name: "Ana".into(),
            email: "ana@x.io".into(),
            phone: "1".into(),
            cpf: "111.222.333-44".into(),
        };
        let digits = service("http://h/").wire_payload(&payload);
        assert_eq!(digits.cpf, "11122233344");
        assert_eq!(digits.name, "Ana");

        let masked = ClientService::new("http://h/".parse().unwrap(), None, CpfWireFormat::Masked)
            .unwrap()
            .wire_payload(&ClientPayload {
                cpf: "11122233344".into(),
                ..payload
            });
        assert_eq!(masked.cpf, "111.222.333-44");
    }

    #[test]
    fn wire_format_parse() {
        assert_eq!(CpfWireFormat::parse("Masked"), Some(CpfWireFormat::Masked));
        assert_eq!(CpfWireFormat::parse(" digits "), Some(CpfWireFormat::Digits));
        assert_eq!(CpfWireFormat::parse("raw"), None);
    }
}
