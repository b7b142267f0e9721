use anyhow::{Context, Result};
use scraper::Html;
use tracing::info;

/// Fetch a page with one blocking GET and parse the body into a DOM tree.
///
/// Any transport error or non-success status is fatal for the run: the error
/// propagates to the caller before any output file is written.
pub fn fetch(url: &str) -> Result<Html> {
    info!("Fetching document: {}", url);
    let client = reqwest::blocking::Client::new();
    let body = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .with_context(|| format!("Failed to fetch content from URL: {}", url))?
        .text()
        .context("Failed to read response body")?;

    Ok(Html::parse_document(&body))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}", addr)
    }

    #[test]
    fn server_error_is_fatal() {
        let url = serve_once("HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\n\r\n");
        assert!(fetch(&url).is_err());
    }

    #[test]
    fn success_yields_parsed_tree() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-length: 38\r\n\r\n<html><body><p>hello</p></body></html>",
        );
        let html = fetch(&url).unwrap();
        let selector = scraper::Selector::parse("p").unwrap();
        let text: String = html.select(&selector).next().unwrap().text().collect();
        assert_eq!(text, "hello");
    }
}
