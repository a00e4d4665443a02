use std::io::Read;
use std::sync::mpsc;
use std::thread;

use pretty_assertions::assert_eq;
use tiny_http::{Response, Server};

use super::*;
use crate::config::ConfigError;

struct Recorded {
	method: String,
	url: String,
	headers: Vec<(String, String)>,
	body: Vec<u8>,
}

impl Recorded {
	fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(field, _)| field.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Serves one canned response per request, in order, and records each request.
fn serve(responses: Vec<(u16, &'static str)>) -> (String, mpsc::Receiver<Recorded>) {
	let server = Server::http("127.0.0.1:0").unwrap();
	let port = server.server_addr().to_ip().unwrap().port();
	let (tx, rx) = mpsc::channel();

	thread::spawn(move || {
		for (status, body) in responses {
			let Ok(mut request) = server.recv() else {
				return;
			};
			let mut payload = Vec::new();
			let _ = request.as_reader().read_to_end(&mut payload);
			let recorded = Recorded {
				method: request.method().to_string(),
				url: request.url().to_string(),
				headers: request
					.headers()
					.iter()
					.map(|h| (h.field.as_str().as_str().to_owned(), h.value.as_str().to_owned()))
					.collect(),
				body: payload,
			};
			let _ = tx.send(recorded);
			let _ = request.respond(Response::from_string(body).with_status_code(status));
		}
	});

	(format!("http://127.0.0.1:{port}"), rx)
}

fn gateway(base: &str) -> HttpGateway {
	let config = GatewayConfig::default()
		.with_gateway_url(base)
		.unwrap()
		.with_pinning_url(&format!("{base}/pinning/pinFileToIPFS"))
		.unwrap();
	HttpGateway::new(&config).unwrap()
}

fn addr(raw: &str) -> ContentAddress {
	ContentAddress::new(raw).unwrap()
}

fn credential() -> Credential {
	Credential::parse("key123@secret456").unwrap()
}

#[test]
fn document_url_nests_under_ipfs() {
	let gw = gateway("http://gw.example/prefix/");
	assert_eq!(
		gw.document_url(&addr("QmDoc")).unwrap().as_str(),
		"http://gw.example/prefix/ipfs/QmDoc/document.json"
	);
}

#[test]
fn document_url_encodes_address_once() {
	let gw = gateway("http://gw.example");
	assert_eq!(
		gw.document_url(&addr("café")).unwrap().as_str(),
		"http://gw.example/ipfs/caf%C3%A9/document.json"
	);
}

#[test]
fn misconfigured_endpoint_is_a_config_error() {
	let config = GatewayConfig {
		pinning_url: Url::parse("ftp://pins.example/upload").unwrap(),
		..GatewayConfig::default()
	};
	assert!(matches!(
		HttpGateway::new(&config),
		Err(StorageError::Config(ConfigError::UnsupportedScheme { field: "pinning_url", .. }))
	));
}

#[tokio::test]
async fn load_fetches_document_json() {
	let (base, requests) = serve(vec![(200, r#"{"ops":[{"insert":"Hello\nworld\n"}]}"#)]);
	let body = gateway(&base).load(&addr("QmHello")).await.unwrap();

	assert_eq!(body, DocumentBody::from_text("Hello\nworld\n"));
	let req = requests.recv().unwrap();
	assert_eq!(req.method, "GET");
	assert_eq!(req.url, "/ipfs/QmHello/document.json");
}

#[tokio::test]
async fn load_maps_404_to_not_found() {
	let (base, _requests) = serve(vec![(404, "no link named document.json")]);
	let err = gateway(&base).load(&addr("QmMissing")).await.unwrap_err();
	assert!(matches!(err, StorageError::NotFound(a) if a.as_str() == "QmMissing"));
}

#[tokio::test]
async fn load_maps_server_error_to_transport() {
	let (base, _requests) = serve(vec![(502, "bad gateway")]);
	let err = gateway(&base).load(&addr("QmDoc")).await.unwrap_err();
	assert!(matches!(err, StorageError::Transport(_)));
}

#[tokio::test]
async fn load_rejects_non_delta_payload() {
	let (base, _requests) = serve(vec![(200, "<html>not json</html>")]);
	let err = gateway(&base).load(&addr("QmDoc")).await.unwrap_err();
	assert!(matches!(err, StorageError::MalformedContent(_)));
}

#[tokio::test]
async fn load_reports_unreachable_gateway_as_transport() {
	let server = Server::http("127.0.0.1:0").unwrap();
	let port = server.server_addr().to_ip().unwrap().port();
	drop(server);

	let err = gateway(&format!("http://127.0.0.1:{port}"))
		.load(&addr("QmDoc"))
		.await
		.unwrap_err();
	assert!(matches!(err, StorageError::Transport(_)));
}

#[tokio::test]
async fn store_submits_multipart_pin_with_credential_headers() {
	let (base, requests) = serve(vec![(200, r#"{"IpfsHash":"QmNew","PinSize":120}"#)]);
	let body = DocumentBody::from_text("Draft title\nbody text");
	let parent = addr("QmParent");

	let new_addr = gateway(&base)
		.store(&body, &credential(), Some(&parent))
		.await
		.unwrap();
	assert_eq!(new_addr, addr("QmNew"));

	let req = requests.recv().unwrap();
	assert_eq!(req.method, "POST");
	assert_eq!(req.url, "/pinning/pinFileToIPFS");
	assert_eq!(req.header(API_KEY_HEADER), Some("key123"));
	assert_eq!(req.header(API_SECRET_HEADER), Some("secret456"));
	assert!(req.header("content-type").unwrap().starts_with("multipart/form-data"));

	let text = req.body_text();
	assert!(text.contains(r#"name="file"; filename="base/document.json""#));
	assert!(text.contains(r#"name="file"; filename="base/meta.json""#));
	assert!(text.contains(r#"name="pinataMetadata""#));
	assert!(text.contains(r#"{"ops":[{"insert":"Draft title\nbody text\n"}]}"#));
	assert!(text.contains(r#""name":"Draft title","keyvalues":{"parent":"QmParent","time":"#));
}

#[tokio::test]
async fn store_without_parent_omits_link() {
	let (base, requests) = serve(vec![(200, r#"{"IpfsHash":"QmFirst"}"#)]);
	gateway(&base)
		.store(&DocumentBody::from_text("New"), &credential(), None)
		.await
		.unwrap();

	let text = requests.recv().unwrap().body_text();
	assert!(text.contains(r#"{"name":"New","keyvalues":{"time":"#));
	assert!(!text.contains("parent"));
}

#[tokio::test]
async fn store_classifies_refusals() {
	let cases = [
		(401, "AuthRejected"),
		(403, "AuthRejected"),
		(429, "QuotaExceeded"),
		(402, "QuotaExceeded"),
		(500, "Transport"),
	];
	for (status, expected) in cases {
		let (base, _requests) = serve(vec![(status, r#"{"error":"nope"}"#)]);
		let err = gateway(&base)
			.store(&DocumentBody::from_text("x"), &credential(), None)
			.await
			.unwrap_err();
		let actual = match err {
			StorageError::AuthRejected(_) => "AuthRejected",
			StorageError::QuotaExceeded(_) => "QuotaExceeded",
			StorageError::Transport(_) => "Transport",
			other => panic!("unexpected {other:?}"),
		};
		assert_eq!(actual, expected, "status {status}");
	}
}

#[tokio::test]
async fn store_without_address_in_response_fails() {
	let (base, _requests) = serve(vec![(200, r#"{"PinSize":12}"#)]);
	let err = gateway(&base)
		.store(&DocumentBody::from_text("x"), &credential(), None)
		.await
		.unwrap_err();
	assert!(matches!(err, StorageError::MalformedContent(_)));
}
