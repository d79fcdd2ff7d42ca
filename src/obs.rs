//! Optional observability helpers for authentication attempts.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `xing_oauth.flow` with the `flow` (protocol
//!   phase) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `xing_oauth_flow_total` counter for every
//!   attempt/success/failure/denial, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Protocol phases observed by the authenticator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Request-token acquisition and redirect to the provider.
	Authorize,
	/// Provider callback: denial check, token exchange, verification.
	Callback,
	/// Signed profile fetch and normalization.
	Profile,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Authorize => "authorize",
			FlowKind::Callback => "callback",
			FlowKind::Profile => "profile",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to an authenticator phase.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// User declined authorization at the provider.
	Denied,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
			FlowOutcome::Denied => "denied",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
