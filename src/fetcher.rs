use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use reqwest::redirect;
use tracing::debug;

use crate::config::HttpConfig;
use crate::error::FetchError;

/// Blocking HTTP client carrying browser-like headers for every request.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let max_redirects = config.max_redirects;
        let redirect_policy = redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() > max_redirects {
                attempt.error(format!("Too many redirects (>{max_redirects})"))
            } else {
                attempt.follow()
            }
        });

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        insert_header(&mut headers, USER_AGENT, &config.user_agent)?;
        insert_header(&mut headers, ACCEPT_LANGUAGE, &config.accept_language)?;
        insert_header(&mut headers, REFERER, &config.referer)?;

        let client = Client::builder()
            .redirect(redirect_policy)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client })
    }

    pub fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<serde_json::Value, FetchError> {
        let resp = self.send(url, params)?;
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn get_html(&self, url: &str, params: &[(&str, String)]) -> Result<String, FetchError> {
        Ok(self.send(url, params)?.text()?)
    }

    fn send(&self, url: &str, params: &[(&str, String)]) -> Result<Response, FetchError> {
        let resp = self.client.get(url).query(params).send()?;
        debug!(url = %resp.url(), status = resp.status().as_u16(), "http response");
        if !resp.status().is_success() {
            return Err(FetchError::Status {
                status: resp.status().as_u16(),
                url: resp.url().to_string(),
            });
        }
        Ok(resp)
    }
}

fn insert_header(
    headers: &mut HeaderMap,
    name: reqwest::header::HeaderName,
    value: &str,
) -> Result<(), FetchError> {
    let value = HeaderValue::from_str(value)
        .map_err(|e| FetchError::Decode(format!("invalid {name} header: {e}")))?;
    headers.insert(name, value);
    Ok(())
}

/// One-shot HTTP server on 127.0.0.1 that answers the first request with a canned response.
#[cfg(test)]
pub(crate) fn serve_once(status: &str, content_type: &str, body: &str) -> String {
    use std::io::{Read, Write};
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response.as_bytes()).unwrap();
    });

    format!("http://{addr}")
}
