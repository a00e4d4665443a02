use proptest::prelude::*;

use super::*;

#[test]
fn parses_key_and_secret() {
	let cred = Credential::parse("k3y@s3cret").unwrap();
	assert_eq!(cred.key(), "k3y");
	assert_eq!(cred.secret(), "s3cret");
	assert_eq!(cred.to_param(), "k3y@s3cret");
}

#[test]
fn malformed_forms_are_absent() {
	for raw in ["", "@", "key", "key@", "@secret", "a@b@c", "key@@", "@@"] {
		assert!(Credential::parse(raw).is_none(), "{raw:?} should not parse");
	}
}

#[test]
fn new_rejects_empty_halves() {
	assert!(Credential::new("", "s").is_none());
	assert!(Credential::new("k", "").is_none());
	assert!(Credential::new("k", "s").is_some());
}

#[test]
fn debug_redacts_secret() {
	let cred = Credential::parse("key@hunter2").unwrap();
	let rendered = format!("{cred:?}");
	assert!(rendered.contains("key"));
	assert!(!rendered.contains("hunter2"));
}

proptest! {
	#[test]
	fn present_iff_single_separator_with_nonempty_halves(raw in "[a-z@]{0,12}") {
		let at_count = raw.matches('@').count();
		let expected = at_count == 1 && {
			let (key, secret) = raw.split_once('@').unwrap();
			!key.is_empty() && !secret.is_empty()
		};
		prop_assert_eq!(Credential::parse(&raw).is_some(), expected);
	}

	#[test]
	fn roundtrips_through_param(key in "[A-Za-z0-9]{1,16}", secret in "[A-Za-z0-9]{1,32}") {
		let cred = Credential::parse(&format!("{key}@{secret}")).unwrap();
		prop_assert_eq!(cred.key(), key.as_str());
		prop_assert_eq!(cred.secret(), secret.as_str());
	}
}
