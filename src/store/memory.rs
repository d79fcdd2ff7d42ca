//! Thread-safe in-memory [`RequestTokenStore`] implementation for single-process hosts and tests.
//!
//! Entries older than the configured time-to-live are purged on every `save` and `take`, so
//! abandoned attempts never accumulate.

// crates.io
use time::Duration;
// self
use crate::{
	_prelude::*,
	auth::RequestToken,
	store::{RequestTokenStore, StoreFuture, StoreKey},
};

/// Lifetime of a pending request token when none is configured.
pub const DEFAULT_PENDING_TTL: Duration = Duration::minutes(10);

type StoreMap = Arc<RwLock<HashMap<StoreKey, PendingToken>>>;

#[derive(Clone, Debug)]
struct PendingToken {
	token: RequestToken,
	issued_at: OffsetDateTime,
}

/// Storage backend that keeps pending request tokens in-process.
#[derive(Clone, Debug)]
pub struct MemoryStore {
	map: StoreMap,
	ttl: Duration,
}
impl MemoryStore {
	/// Creates a store whose entries expire after `ttl`.
	pub fn with_ttl(ttl: Duration) -> Self {
		Self { map: StoreMap::default(), ttl }
	}

	/// Time-to-live applied to pending entries.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Number of request tokens still waiting for a callback, expired ones included until the
	/// next purge.
	pub fn pending(&self) -> usize {
		self.map.read().len()
	}

	fn save_at(&self, key: StoreKey, token: RequestToken, now: OffsetDateTime) {
		let mut map = self.map.write();

		Self::purge(&mut map, self.ttl, now);
		map.insert(key, PendingToken { token, issued_at: now });
	}

	fn take_at(&self, key: &StoreKey, now: OffsetDateTime) -> Option<RequestToken> {
		let mut map = self.map.write();

		Self::purge(&mut map, self.ttl, now);

		map.remove(key).map(|pending| pending.token)
	}

	fn purge(map: &mut HashMap<StoreKey, PendingToken>, ttl: Duration, now: OffsetDateTime) {
		map.retain(|_, pending| now - pending.issued_at < ttl);
	}
}
impl Default for MemoryStore {
	fn default() -> Self {
		Self::with_ttl(DEFAULT_PENDING_TTL)
	}
}
impl RequestTokenStore for MemoryStore {
	fn save<'a>(&'a self, key: &'a StoreKey, token: RequestToken) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			self.save_at(key.clone(), token, OffsetDateTime::now_utc());

			Ok(())
		})
	}

	fn take<'a>(&'a self, key: &'a StoreKey) -> StoreFuture<'a, Option<RequestToken>> {
		Box::pin(async move { Ok(self.take_at(key, OffsetDateTime::now_utc())) })
	}
}
