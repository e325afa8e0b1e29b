use std::{fmt, io};

use bytes::Bytes;
use reqwest::{header, RequestBuilder, Response, StatusCode};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{ClientOptions, Form, HttpClientError, Result};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Clone)]
/// Connection-pooled HTTP client with fixed timeouts and bounded retries.
///
/// Build one instance at startup and hand clones to every caller; clones
/// share the same connection pool.
pub struct RetryingClient {
    http: reqwest::Client,
    options: ClientOptions,
}

impl fmt::Debug for RetryingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryingClient")
            .field("options", &self.options)
            .finish()
    }
}

impl RetryingClient {
    /// Creates a client with the default timeouts and attempt limit.
    pub fn new() -> Result<Self> {
        Self::with_options(ClientOptions::default())
    }

    /// Creates a client from explicit options.
    pub fn with_options(options: ClientOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(options.connect_timeout())
            .timeout(options.attempt_timeout());
        if !options.keep_alive {
            builder = builder.pool_max_idle_per_host(0);
        }
        let http = builder.build().map_err(HttpClientError::Build)?;

        Ok(Self { http, options })
    }

    /// Options this client was built with.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Fetches `url` and returns the raw response body.
    ///
    /// The status code is not checked: a `500` body comes back as `Ok`.
    pub async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.send_with_retry(url, || self.http.get(url)).await?;
        read_body(url, response).await
    }

    /// Posts URL-encoded `form` to `url` and returns the raw response body.
    ///
    /// Like [`RetryingClient::get`], any status code is accepted.
    pub async fn post_form(&self, url: &str, form: impl Into<Form>) -> Result<Vec<u8>> {
        let encoded = form.into().encode();
        let response = self
            .send_with_retry(url, || {
                self.http
                    .post(url)
                    .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
                    .body(encoded.clone())
            })
            .await?;
        read_body(url, response).await
    }

    /// Posts `body` with the given content type and returns the response body.
    ///
    /// Only `200 OK` is accepted. Any other status is returned as
    /// [`HttpClientError::Status`] without reading the body or retrying.
    pub async fn post_body(
        &self,
        url: &str,
        content_type: &str,
        body: impl Into<Bytes>,
    ) -> Result<Vec<u8>> {
        let body = body.into();
        let response = self
            .send_with_retry(url, || {
                self.http
                    .post(url)
                    .header(header::CONTENT_TYPE, content_type)
                    .body(body.clone())
            })
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(url, status = status.as_u16(), "http status:{}", status.as_u16());
            return Err(HttpClientError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        read_body(url, response).await
    }

    /// Drains `reader` and posts its bytes as in [`RetryingClient::post_body`].
    ///
    /// The stream is read once up front so every attempt sends the full payload.
    /// A stream that stalls past the deadline fails with a timed-out
    /// [`HttpClientError::BodySource`].
    pub async fn post_reader<R>(
        &self,
        url: &str,
        content_type: &str,
        mut reader: R,
    ) -> Result<Vec<u8>>
    where
        R: AsyncRead + Unpin,
    {
        let mut body = Vec::new();
        let drain = reader.read_to_end(&mut body);
        let drained = match tokio::time::timeout(self.options.timeout(), drain).await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("request body not drained within {}ms", self.options.timeout_ms),
            )),
        };
        drained.map_err(|err| {
            tracing::error!(url, error = %err, "reading request body failed");
            HttpClientError::BodySource(err)
        })?;
        self.post_body(url, content_type, body).await
    }

    /// Sends the request built by `build` until one attempt gets a response.
    ///
    /// Attempts run back to back with no delay. Any response, whatever its
    /// status, ends the loop.
    async fn send_with_retry<F>(&self, url: &str, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let max_attempts = self.options.attempts();
        let mut attempt = 1usize;
        loop {
            match build().send().await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    if err.is_connect() {
                        tracing::error!(
                            url,
                            attempt,
                            max_attempts,
                            network = "tcp",
                            address = dial_address(err.url().map_or(url, |u| u.as_str())),
                            connect_timeout_ms = self.options.connect_timeout_ms,
                            error = %err,
                            "connect failed"
                        );
                    } else {
                        tracing::error!(url, attempt, max_attempts, error = %err, "request failed");
                    }

                    if attempt >= max_attempts {
                        return Err(HttpClientError::Transport {
                            url: url.to_owned(),
                            attempts: attempt,
                            source: err,
                        });
                    }

                    tracing::debug!(url, next_attempt = attempt + 1, "retrying request");
                    attempt += 1;
                }
            }
        }
    }
}

/// `host:port` the transport dials for `target`, with the scheme's default port.
fn dial_address(target: &str) -> Option<String> {
    let parsed = url::Url::parse(target).ok()?;
    let host = parsed.host_str()?;
    let port = parsed.port_or_known_default()?;
    Some(format!("{host}:{port}"))
}

/// Reads the whole body. The response is consumed, which hands the
/// connection back to the pool on every path.
async fn read_body(url: &str, response: Response) -> Result<Vec<u8>> {
    match response.bytes().await {
        Ok(body) => Ok(body.to_vec()),
        Err(err) => {
            tracing::error!(url, error = %err, "reading response body failed");
            Err(HttpClientError::BodyRead {
                url: url.to_owned(),
                source: err,
            })
        }
    }
}
