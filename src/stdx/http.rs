use reqwest::{RequestBuilder, Response, StatusCode, header::RETRY_AFTER};
use std::{ops::RangeInclusive, time::Duration};

pub static DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Resends after the first attempt. The GraphQL endpoint rate limits in short
/// bursts, so a handful of tries spread over about a minute rides one out.
const MAX_RETRIES: u8 = 5;
/// Seconds before the first resend, when the api gives no `Retry-After`.
const FIRST_WAIT_SECS: RangeInclusive<u64> = 1..=3;
/// Seconds added to the wait after every resend.
const WAIT_STEP_SECS: u64 = 2;
/// Random extra seconds per resend, so concurrent detail fetches do not retry in lockstep.
const JITTER_SECS: RangeInclusive<u64> = 1..=3;
/// Upper bound on a `Retry-After` the api asks for.
const MAX_RETRY_AFTER_SECS: u64 = 60;

pub struct Retry(RequestBuilder);

impl Retry {
    pub async fn send(self) -> Result<Response, reqwest::Error> {
        let mut tries = MAX_RETRIES;
        let mut wait = fastrand::u64(FIRST_WAIT_SECS);

        loop {
            #[allow(clippy::expect_used, reason = "GraphQL bodies are in-memory strings, never streams")]
            let request = self.0.try_clone()
                .expect("`RequestBuilder` should only fail to clone when working with streams, and GraphQL bodies are plain bytes");

            let delay = match request.send().await {
                Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS && tries > 0 => {
                    let delay = retry_after(&response).unwrap_or(wait);
                    tracing::debug!(delay, tries, "rate limited by api, backing off");
                    delay
                }
                Err(err) if tries > 0 && (err.is_connect() || err.is_timeout() || err.is_request()) => {
                    tracing::debug!(wait, tries, %err, "request failed, backing off");
                    wait
                }
                Ok(response) => return Ok(response),
                Err(err) => return Err(err),
            };

            tokio::time::sleep(Duration::from_secs(delay)).await;
            tries -= 1;
            wait += WAIT_STEP_SECS + fastrand::u64(JITTER_SECS);
        }
    }
}

/// Seconds the api asked to wait, when sent as a plain number.
fn retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.min(MAX_RETRY_AFTER_SECS))
}

pub trait IRetry {
    fn retry(self) -> Retry;
}

impl IRetry for RequestBuilder {
    fn retry(self) -> Retry {
        Retry(self)
    }
}
