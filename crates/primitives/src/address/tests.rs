use super::*;

#[test]
fn accepts_opaque_identifier() {
	let addr = ContentAddress::new("QmRYPQ1HzXXNbKgAQk6MxMKjme7LjdJu2GCJ8tx6jsHjNt").unwrap();
	assert_eq!(addr.as_str(), "QmRYPQ1HzXXNbKgAQk6MxMKjme7LjdJu2GCJ8tx6jsHjNt");
	assert_eq!(addr.to_string(), addr.as_str());
}

#[test]
fn rejects_empty() {
	assert_eq!(ContentAddress::new(""), Err(PrimitiveError::EmptyAddress));
}

#[test]
fn rejects_path_separator() {
	assert!(matches!(
		"a/b".parse::<ContentAddress>(),
		Err(PrimitiveError::AddressSeparator(raw)) if raw == "a/b"
	));
}

#[test]
fn serde_is_transparent_and_validated() {
	let addr: ContentAddress = serde_json::from_str(r#""bafy""#).unwrap();
	assert_eq!(serde_json::to_string(&addr).unwrap(), r#""bafy""#);
	assert!(serde_json::from_str::<ContentAddress>(r#""""#).is_err());
}
