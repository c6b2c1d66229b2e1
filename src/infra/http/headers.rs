use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::RequestBuilder;

static NEXT_REQUEST: AtomicU64 = AtomicU64::new(0);

/// Attach correlation and identification headers to an outgoing request.
pub fn with_standard_headers(builder: RequestBuilder) -> RequestBuilder {
    builder.header("x-request-id", next_request_id()).header(
        reqwest::header::USER_AGENT,
        concat!("weather-mcp-gateway/", env!("CARGO_PKG_VERSION")),
    )
}

/// Process-unique id: monotonic sequence plus sub-second nanos so ids from
/// separate runs rarely collide in aggregated logs.
fn next_request_id() -> String {
    let seq = NEXT_REQUEST.fetch_add(1, Ordering::Relaxed);
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    format!("wx-{seq}-{nanos}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_distinct_and_prefixed() {
        let a = next_request_id();
        let b = next_request_id();
        assert!(a.starts_with("wx-"));
        assert_ne!(a, b);
    }
}
