//! Upstream-resolver-list validation seam.

/// Validates per-client upstream resolver lists.
///
/// Implemented by the DNS layer; the directory only relays the verdict when a
/// client carries a non-empty upstream list.
pub trait UpstreamValidator: Send + Sync {
    fn validate(&self, upstreams: &[String]) -> anyhow::Result<()>;
}

/// Accepts every upstream list. Used when no DNS layer is wired in.
pub struct AllowAllUpstreams;

impl UpstreamValidator for AllowAllUpstreams {
    fn validate(&self, _upstreams: &[String]) -> anyhow::Result<()> {
        Ok(())
    }
}
