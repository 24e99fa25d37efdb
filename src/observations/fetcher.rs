use crate::config::ApiConfig;
use crate::observations::error::FetchError;
use crate::observations::response::{parse_body, RawRecord};
use chrono::NaiveDate;
use log::{info, warn};
use reqwest::blocking::Client;

/// A source of raw observation records, one calendar day at a time.
pub trait DailySource {
    fn fetch_day(&self, date: NaiveDate) -> Result<Vec<RawRecord>, FetchError>;
}

impl<T: DailySource + ?Sized> DailySource for &T {
    fn fetch_day(&self, date: NaiveDate) -> Result<Vec<RawRecord>, FetchError> {
        (**self).fetch_day(date)
    }
}

/// Fetches a day of water-temperature records from the KHOA `tideObsTemp` service.
///
/// Every call is a single blocking GET with the HTTP client's default timeouts.
pub struct KhoaFetcher {
    config: ApiConfig,
    client: Client,
}

impl KhoaFetcher {
    pub fn new(config: ApiConfig) -> KhoaFetcher {
        KhoaFetcher {
            config,
            client: Client::new(),
        }
    }

    /// Uses a caller-built HTTP client, e.g. one with a proxy or custom timeouts.
    pub fn with_client(config: ApiConfig, client: Client) -> KhoaFetcher {
        KhoaFetcher { config, client }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// The full request URL for `date`, service key included.
    pub fn request_url(&self, date: NaiveDate) -> String {
        self.url_with_key(date, &self.config.service_key)
    }

    /// Same as [`KhoaFetcher::request_url`] with the key masked, for logs and errors.
    pub fn display_url(&self, date: NaiveDate) -> String {
        self.url_with_key(date, "***")
    }

    fn url_with_key(&self, date: NaiveDate, key: &str) -> String {
        format!(
            "{}?ServiceKey={}&ObsCode={}&Date={}&ResultType=json",
            self.config.endpoint,
            key,
            self.config.obs_code,
            date.format("%Y%m%d")
        )
    }
}

impl DailySource for KhoaFetcher {
    fn fetch_day(&self, date: NaiveDate) -> Result<Vec<RawRecord>, FetchError> {
        let display_url = self.display_url(date);
        info!("Requesting {}", display_url);

        let response = self
            .client
            .get(self.request_url(date))
            .send()
            .map_err(|e| FetchError::NetworkRequest(display_url.clone(), e.without_url()))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", display_url, e.status());
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: display_url,
                        status,
                        source: e.without_url(),
                    }
                } else {
                    FetchError::NetworkRequest(display_url, e.without_url())
                });
            }
        };

        let body = response
            .text()
            .map_err(|e| FetchError::Decode(display_url.clone(), e.without_url()))?;
        let parsed = parse_body(&body)?;

        if let Some(message) = parsed.error_message() {
            warn!("API returned an error for {}: {}", date, message);
        }
        let station = parsed.station_name().map(str::to_string);

        match parsed.into_records() {
            Some(records) => {
                info!(
                    "Received {} records for {} from station {}",
                    records.len(),
                    date,
                    station.as_deref().unwrap_or(&self.config.obs_code)
                );
                Ok(records)
            }
            None => {
                warn!("No result data in response for {}", date);
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answers one request on a local port with a canned HTTP response.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/search.do", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut line = String::new();
            // Drain the request head before replying.
            while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
                line.clear();
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            reader.get_mut().write_all(response.as_bytes()).unwrap();
        });
        (endpoint, handle)
    }

    fn local_fetcher(endpoint: String) -> KhoaFetcher {
        let client = Client::builder().no_proxy().build().unwrap();
        KhoaFetcher::with_client(
            ApiConfig {
                endpoint,
                service_key: "secret==".to_string(),
                ..ApiConfig::default()
            },
            client,
        )
    }

    fn fetcher() -> KhoaFetcher {
        KhoaFetcher::new(ApiConfig {
            endpoint: "http://localhost/api/oceangrid/tideObsTemp/search.do".to_string(),
            service_key: "secret==".to_string(),
            obs_code: "DT_0005".to_string(),
        })
    }

    #[test]
    fn test_request_url_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            fetcher().request_url(date),
            "http://localhost/api/oceangrid/tideObsTemp/search.do?ServiceKey=secret==&ObsCode=DT_0005&Date=20240309&ResultType=json"
        );
    }

    #[test]
    fn test_display_url_masks_key() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let url = fetcher().display_url(date);
        assert!(!url.contains("secret"));
        assert!(url.contains("ServiceKey=***"));
        assert!(url.contains("Date=20240309"));
    }

    #[test]
    fn test_unreachable_host_is_a_fetch_error() {
        let fetcher = KhoaFetcher::new(ApiConfig {
            // Port 1 on localhost is never served; the connection is refused immediately.
            endpoint: "http://127.0.0.1:1/search.do".to_string(),
            ..ApiConfig::default()
        });
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        // A proxy in the environment may answer with a status instead of refusing.
        match fetcher.fetch_day(date) {
            Err(FetchError::NetworkRequest(url, _)) => assert!(url.contains("***")),
            Err(FetchError::HttpStatus { url, .. }) => assert!(url.contains("***")),
            other => panic!("Expected a request error, got {:?}", other),
        }
    }

    #[test]
    fn test_body_without_data_is_an_empty_day() -> Result<(), Box<dyn std::error::Error>> {
        let (endpoint, server) = serve_once("HTTP/1.1 200 OK", r#"{"result":{"error":"No search data"}}"#);
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let records = local_fetcher(endpoint).fetch_day(date)?;
        server.join().unwrap();
        assert!(records.is_empty());
        Ok(())
    }

    #[test]
    fn test_records_are_returned_from_data() -> Result<(), Box<dyn std::error::Error>> {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"result":{"meta":{"obs_post_name":"Busan"},"data":[{"record_time":"2024-03-09 09:00:00","water_temp":"12.1"}]}}"#,
        );
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let records = local_fetcher(endpoint).fetch_day(date)?;
        server.join().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].water_temp_text().as_deref(), Some("12.1"));
        Ok(())
    }

    #[test]
    fn test_server_error_maps_to_http_status() {
        let (endpoint, server) = serve_once("HTTP/1.1 500 Internal Server Error", "{}");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let result = local_fetcher(endpoint).fetch_day(date);
        server.join().unwrap();
        match result {
            Err(FetchError::HttpStatus { url, status, .. }) => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert!(url.contains("ServiceKey=***"));
                assert!(!url.contains("secret"));
            }
            other => panic!("Expected an HTTP status error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_json_body_is_a_parse_error() {
        let (endpoint, server) = serve_once("HTTP/1.1 200 OK", "<html>maintenance</html>");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let result = local_fetcher(endpoint).fetch_day(date);
        server.join().unwrap();
        assert!(matches!(result, Err(FetchError::JsonParse(_))));
    }
}
