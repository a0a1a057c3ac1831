//! Centralized HTTP seam for both widgets.
//!
//! `F` is the multipart payload type produced by the paired [`Dom`]
//! implementation (`web_sys::FormData` in the browser).
//!
//! [`Dom`]: crate::infrastructure::dom::Dom

use crate::shared::errors::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
pub mod fetch;
#[cfg(not(target_arch = "wasm32"))]
pub mod fake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Lenient body parse: anything that is not valid JSON of the expected
    /// shape reads as "no JSON". Callers decide what that means.
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_str(&self.body).ok()
    }
}

#[async_trait(?Send)]
pub trait HttpClient<F>: Clone {
    async fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<HttpResponse>;

    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, String)],
        form: F,
    ) -> Result<HttpResponse>;
}
