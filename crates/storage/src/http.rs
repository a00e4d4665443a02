//! HTTP gateway: IPFS retrieval plus Pinata-style pinning.

use async_trait::async_trait;
use chrono::Utc;
use inkpin_primitives::{ContentAddress, Credential, DocumentBody};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::GatewayConfig;
use crate::error::{Result, StorageError};
use crate::pin::PinRequest;
use crate::StorageGateway;

/// Header carrying the pinning API key.
pub const API_KEY_HEADER: &str = "pinata_api_key";
/// Header carrying the pinning API secret.
pub const API_SECRET_HEADER: &str = "pinata_secret_api_key";

#[derive(Deserialize)]
struct PinResponse {
	#[serde(rename = "IpfsHash")]
	ipfs_hash: Option<String>,
}

/// Gateway backed by a retrieval gateway and a pinning HTTP API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
	client: Client,
	gateway_url: Url,
	pinning_url: Url,
}

impl HttpGateway {
	/// Creates a gateway for the configured endpoints.
	pub fn new(config: &GatewayConfig) -> Result<Self> {
		config.validate()?;

		let mut builder = Client::builder();
		if let Some(timeout) = config.timeout() {
			builder = builder.timeout(timeout);
		}
		let client = builder.build()?;

		Ok(Self {
			client,
			gateway_url: config.gateway_url.clone(),
			pinning_url: config.pinning_url.clone(),
		})
	}

	/// Returns the URL of the body blob stored under `address`.
	pub fn document_url(&self, address: &ContentAddress) -> Result<Url> {
		let mut url = self.gateway_url.clone();
		url.path_segments_mut()
			.map_err(|()| StorageError::Transport(format!("gateway URL {} cannot be a base", self.gateway_url)))?
			.pop_if_empty()
			.extend(["ipfs", address.as_str(), "document.json"]);
		Ok(url)
	}

	fn pin_form(request: &PinRequest) -> Result<Form> {
		let document = Part::bytes(request.document.clone())
			.file_name(PinRequest::DOCUMENT_PATH)
			.mime_str(PinRequest::MIME)?;
		let metadata = Part::bytes(request.metadata_json.clone().into_bytes())
			.file_name(PinRequest::METADATA_PATH)
			.mime_str(PinRequest::MIME)?;

		// File names carry the directory layout and must reach the service unescaped.
		Ok(Form::new()
			.percent_encode_noop()
			.part("file", document)
			.part("file", metadata)
			.text("pinataMetadata", request.metadata_json.clone()))
	}
}

#[async_trait]
impl StorageGateway for HttpGateway {
	async fn load(&self, address: &ContentAddress) -> Result<DocumentBody> {
		let url = self.document_url(address)?;
		debug!(%address, %url, "storage.load");

		let response = self.client.get(url).send().await?;
		let status = response.status();
		if status == StatusCode::NOT_FOUND {
			return Err(StorageError::NotFound(address.clone()));
		}
		if !status.is_success() {
			return Err(StorageError::Transport(format!("gateway answered {status}")));
		}

		let bytes = response.bytes().await?;
		DocumentBody::from_slice(&bytes).map_err(|e| StorageError::MalformedContent(e.to_string()))
	}

	async fn store(
		&self,
		body: &DocumentBody,
		credential: &Credential,
		parent: Option<&ContentAddress>,
	) -> Result<ContentAddress> {
		let request = PinRequest::new(body, parent, Utc::now())?;
		debug!(
			title = %request.metadata.name,
			parent = ?parent.map(ContentAddress::as_str),
			bytes = request.document.len(),
			"storage.store"
		);

		let response = self
			.client
			.post(self.pinning_url.clone())
			.header(API_KEY_HEADER, credential.key())
			.header(API_SECRET_HEADER, credential.secret())
			.multipart(Self::pin_form(&request)?)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let text = response.text().await.unwrap_or_default();
			warn!(%status, "pinning request refused");
			return Err(classify_pin_failure(status, text));
		}

		let pinned: PinResponse = response
			.json()
			.await
			.map_err(|e| StorageError::MalformedContent(format!("pin response: {e}")))?;
		let Some(hash) = pinned.ipfs_hash else {
			return Err(StorageError::MalformedContent("pin response missing IpfsHash".into()));
		};
		ContentAddress::new(hash).map_err(|e| StorageError::MalformedContent(e.to_string()))
	}
}

fn classify_pin_failure(status: StatusCode, body: String) -> StorageError {
	let detail = if body.is_empty() {
		status.to_string()
	} else {
		format!("{status}: {body}")
	};
	match status {
		StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StorageError::AuthRejected(detail),
		StatusCode::PAYMENT_REQUIRED | StatusCode::PAYLOAD_TOO_LARGE | StatusCode::TOO_MANY_REQUESTS => {
			StorageError::QuotaExceeded(detail)
		}
		_ => StorageError::Transport(detail),
	}
}

#[cfg(test)]
mod tests;
