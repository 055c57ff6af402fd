// API client module: a small blocking HTTP client for the product
// collection endpoint (`/produtos`). The view-model talks to it through the
// `ProductApi` trait so tests can swap in a fake.

use crate::error::{CatalogError, Result};
use crate::model::{Product, ProductPayload};
use log::debug;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// The five calls the catalog needs. Any non-2xx answer is an error.
pub trait ProductApi {
    fn list(&self) -> Result<Vec<Product>>;
    fn get(&self, id: i64) -> Result<Product>;
    fn create(&self, payload: &ProductPayload) -> Result<Product>;
    fn update(&self, id: i64, payload: &ProductPayload) -> Result<Product>;
    fn delete(&self, id: i64) -> Result<()>;
}

/// reqwest-backed client. `base_url` is the collection URL itself, e.g.
/// `http://localhost:8080/produtos`. Cloning shares the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(ApiClient::with_client(client, base_url))
    }

    /// Use a preconfigured reqwest client (custom timeouts, proxies).
    pub fn with_client(client: Client, base_url: &str) -> Self {
        ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

/// Turn a non-2xx response into `CatalogError::Status`, keeping the body
/// for the log.
fn check(res: Response) -> Result<Response> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().unwrap_or_default();
        return Err(CatalogError::Status { status, body });
    }
    Ok(res)
}

fn decode<T: DeserializeOwned>(res: Response) -> Result<T> {
    let txt = check(res)?.text()?;
    serde_json::from_str(&txt).map_err(|e| CatalogError::Decode(e.to_string()))
}

impl ProductApi for ApiClient {
    fn list(&self) -> Result<Vec<Product>> {
        debug!("GET {}", self.base_url);
        decode(self.client.get(&self.base_url).send()?)
    }

    fn get(&self, id: i64) -> Result<Product> {
        let url = self.item_url(id);
        debug!("GET {}", url);
        decode(self.client.get(&url).send()?)
    }

    fn create(&self, payload: &ProductPayload) -> Result<Product> {
        debug!("POST {}", self.base_url);
        decode(self.client.post(&self.base_url).json(payload).send()?)
    }

    fn update(&self, id: i64, payload: &ProductPayload) -> Result<Product> {
        let url = self.item_url(id);
        debug!("PUT {}", url);
        decode(self.client.put(&url).json(payload).send()?)
    }

    fn delete(&self, id: i64) -> Result<()> {
        let url = self.item_url(id);
        debug!("DELETE {}", url);
        check(self.client.delete(&url).send()?)?;
        Ok(())
    }
}
