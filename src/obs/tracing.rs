// self
use crate::{_prelude::*, obs::FlowKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by authenticator phases.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("xing_oauth.flow", flow = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Emits an event inside the span for a provider-reported denial.
	pub fn record_denial(&self, problem: &str) {
		#[cfg(feature = "tracing")]
		{
			tracing::info!(parent: &self.span, problem, "user denied authorization");
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = problem;
		}
	}

	/// Emits an event inside the span for a terminal failure. Diagnostics such as raw payloads
	/// never reach the event; only the error's display form does.
	pub fn record_failure(&self, err: &Error) {
		#[cfg(feature = "tracing")]
		{
			tracing::warn!(parent: &self.span, error = %err, "authentication attempt failed");
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = err;
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recording_events_never_panics() {
		let span = FlowSpan::new(FlowKind::Callback, "events");

		span.record_denial("user_refused");
		span.record_failure(&Error::UnknownRequestToken);
	}

	#[tokio::test]
	async fn instrument_passes_output_through() {
		let span = FlowSpan::new(FlowKind::Profile, "fetch_profile");
		let fields = span.instrument(async { "id,first_name" }).await;

		assert_eq!(fields, "id,first_name");
	}
}
