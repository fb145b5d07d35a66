use axum::body::Body;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Emit `text` one character at a time, `delay` apart.
///
/// The answer is already complete when this starts; the pacing only drives
/// the typing effect in the browser. A zero delay sends the characters back
/// to back.
pub fn typing_stream(text: String, delay: Duration) -> impl Stream<Item = Result<String, Infallible>> + Send + 'static {
    async_stream::stream! {
        let mut ticker = (!delay.is_zero()).then(|| {
            let mut ticker = interval_at(Instant::now() + delay, delay);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });

        for ch in text.chars() {
            if let Some(ticker) = ticker.as_mut() {
                ticker.tick().await;
            }
            yield Ok::<_, Infallible>(ch.to_string());
        }
    }
}

/// `200 text/plain` response streaming `text` with the typing effect
pub fn typing_response(text: String, delay: Duration) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(typing_stream(text, delay)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    async fn collect(text: &str, delay: Duration) -> Vec<String> {
        typing_stream(text.to_string(), delay)
            .map(|chunk| match chunk {
                Ok(s) => s,
                Err(never) => match never {},
            })
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_one_chunk_per_char() {
        let chunks = collect("héllo 👋", Duration::ZERO).await;
        assert_eq!(chunks, vec!["h", "é", "l", "l", "o", " ", "👋"]);
    }

    #[tokio::test]
    async fn test_empty_text_ends_immediately() {
        assert!(collect("", Duration::from_millis(50)).await.is_empty());
    }

    #[tokio::test]
    async fn test_chunks_are_paced() {
        let start = std::time::Instant::now();
        let chunks = collect("abcd", Duration::from_millis(10)).await;
        assert_eq!(chunks.concat(), "abcd");
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
