use std::sync::Arc;

use inkpin_primitives::DocumentBody;
use inkpin_storage::{MemoryGateway, StorageError};

use crate::{Location, MemoryHistory, MemorySurface, Phase, Session, Surface, Trigger};

fn session(gw: &Arc<MemoryGateway>) -> Session<MemorySurface, MemoryHistory> {
	Session::new(gw.clone(), MemorySurface::new(), MemoryHistory::new())
}

/// Must never enter an editable phase without a credential.
///
/// - Enforced in: `DocumentController::enter_editable`
/// - Failure symptom: Visitors without keys can type and hit publish, which
///   then fails at the pinning service.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_editable_requires_credential() {
	let gw = Arc::new(MemoryGateway::new());
	let address = gw.insert(DocumentBody::from_text("shared")).unwrap();

	for raw in [
		"https://ink.example/".to_owned(),
		"https://ink.example/?auth=@secret".to_owned(),
		format!("https://ink.example/{address}?auth=onlykey"),
		format!("https://ink.example/{address}?auth=a@b@c"),
	] {
		let mut s = session(&gw);
		s.controller_mut().activate(Location::parse(&raw).unwrap()).unwrap();
		s.settle().await;
		let c = s.controller();
		assert!(!c.is_editable(), "{raw} became editable");
		assert!(!c.surface().is_enabled(), "{raw} enabled the surface");
		assert!(c.state().credential.is_none());
	}
}

/// Must leave address, content and dirty flag untouched when a store fails.
///
/// - Enforced in: `DocumentController::apply_published`
/// - Failure symptom: Unsaved edits are marked clean, or the URL points at a
///   snapshot that was never pinned.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_failed_publish_preserves_state() {
	let gw = Arc::new(MemoryGateway::new());
	let address = gw.insert(DocumentBody::from_text("base")).unwrap();
	let mut s = session(&gw);
	s.controller_mut()
		.activate(Location::parse(&format!("https://ink.example/{address}?auth=k@s")).unwrap())
		.unwrap();
	s.settle().await;
	s.controller_mut().surface_mut().edit(DocumentBody::from_text("base\nedit"));
	s.controller_mut().dispatch(Trigger::ContentChanged);

	let before = s.controller().state();
	let body = s.controller().surface().body().clone();
	gw.fail_next_store(StorageError::Transport("timed out".into()));
	s.controller_mut().dispatch(Trigger::PublishClicked);
	s.settle().await;

	assert_eq!(s.controller().state(), before);
	assert_eq!(s.controller().surface().body(), &body);
	assert!(s.controller().history().entries().is_empty());
}

/// Must keep at most one store in flight per session.
///
/// - Enforced in: `DocumentController::publish`
/// - Failure symptom: Double clicks pin two snapshots with the same parent and
///   the URL ends up at whichever finishes last.
#[cfg_attr(test, tokio::test)]
pub(crate) async fn test_single_store_in_flight() {
	let gw = Arc::new(MemoryGateway::new());
	let mut s = session(&gw);
	s.controller_mut()
		.activate(Location::parse("https://ink.example/?auth=k@s").unwrap())
		.unwrap();
	s.controller_mut().surface_mut().edit(DocumentBody::from_text("draft"));
	s.controller_mut().dispatch(Trigger::ContentChanged);

	for _ in 0..5 {
		s.controller_mut().dispatch(Trigger::PublishClicked);
	}
	assert_eq!(s.controller().phase(), &Phase::Publishing);
	s.settle().await;
	assert_eq!(gw.store_count(), 1);
}
