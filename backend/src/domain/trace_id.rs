//! Per-request correlation id.
//!
//! The `Trace` middleware puts a [`TraceId`] into Tokio task-local storage
//! for the lifetime of a request. Anything running on that task, including
//! [`Error`](super::Error) construction, can read it with
//! [`TraceId::current`]. Task-locals do not follow work onto
//! `spawn_blocking` threads; capture the id first and re-enter it there with
//! [`TraceId::sync_scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

/// Header used both to accept a caller-supplied id and to return the
/// effective one.
pub const TRACE_ID_HEADER: &str = "trace-id";

tokio::task_local! {
    static CURRENT: TraceId;
}

/// UUID identifying one HTTP request across log lines and error bodies.
///
/// ```
/// use pixelwall::domain::TraceId;
///
/// let id: TraceId = "6f1c2a9e-0d3b-4c55-9a0e-1b2c3d4e5f60".parse().expect("uuid");
/// assert_eq!(id.to_string(), "6f1c2a9e-0d3b-4c55-9a0e-1b2c3d4e5f60");
/// assert!(TraceId::current().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random (v4) id.
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the request being served on this task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Drive `fut` with `self` as the current id.
    pub async fn scope<F: Future>(self, fut: F) -> F::Output {
        CURRENT.scope(self, fut).await
    }

    /// Run `f` synchronously with `id` as the current id; with `None` the
    /// closure runs unscoped.
    pub fn sync_scope<R>(id: Option<Self>, f: impl FnOnce() -> R) -> R {
        if let Some(id) = id {
            CURRENT.sync_scope(id, f)
        } else {
            f()
        }
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn scoped_future_observes_its_id() {
        let id = TraceId::generate();
        assert_eq!(id.scope(async { TraceId::current() }).await, Some(id));
        assert_eq!(TraceId::current(), None);
    }

    #[tokio::test]
    async fn blocking_work_sees_the_captured_id() {
        let id = TraceId::generate();
        let seen = id
            .scope(async {
                let captured = TraceId::current();
                tokio::task::spawn_blocking(move || TraceId::sync_scope(captured, TraceId::current))
                    .await
                    .expect("blocking task joins")
            })
            .await;
        assert_eq!(seen, Some(id));
    }

    #[rstest]
    fn unscoped_closure_still_runs() {
        assert!(TraceId::sync_scope(None, || TraceId::current().is_none()));
    }

    #[rstest]
    #[case("6f1c2a9e-0d3b-4c55-9a0e-1b2c3d4e5f60", true)]
    #[case("6F1C2A9E-0D3B-4C55-9A0E-1B2C3D4E5F60", true)]
    #[case("trace-123", false)]
    #[case("", false)]
    fn parses_only_uuids(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(raw.parse::<TraceId>().is_ok(), ok);
    }
}
