use catalog_core::CatalogError;
use gloo::net::http::Request;
use shared::Item;

/// API client for the content listing endpoint
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    api_url: String,
}

impl ApiClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Fetch the full, unfiltered item collection
    pub async fn get_content_list(&self) -> Result<Vec<Item>, CatalogError> {
        match Request::get(&self.api_url).send().await {
            Ok(response) => {
                if !response.ok() {
                    return Err(CatalogError::Fetch(format!(
                        "HTTP {} {}",
                        response.status(),
                        response.status_text()
                    )));
                }
                match response.json::<Vec<Item>>().await {
                    Ok(items) => Ok(items),
                    Err(e) => Err(CatalogError::Fetch(format!("unreadable payload: {}", e))),
                }
            }
            Err(e) => Err(CatalogError::Fetch(e.to_string())),
        }
    }
}
