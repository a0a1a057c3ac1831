//! Fetch-backed [`HttpClient`] used in the browser.
//!
//! Every request carries same-origin credentials so the session cookie
//! reaches the backend. Multipart bodies go out without a manual
//! Content-Type header; the browser adds the boundary itself.

use super::{HttpClient, HttpResponse};
use crate::shared::errors::{Result, WidgetError};
use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use web_sys::{FormData, RequestCredentials};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

impl FetchClient {
    fn prepare(mut builder: RequestBuilder, headers: &[(&str, String)]) -> RequestBuilder {
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        builder.credentials(RequestCredentials::SameOrigin)
    }

    async fn read(response: Response) -> HttpResponse {
        let status = response.status();
        // An unreadable body reads as empty; the widgets treat it as "no JSON".
        let body = response.text().await.unwrap_or_default();
        HttpResponse { status, body }
    }
}

#[async_trait(?Send)]
impl HttpClient<FormData> for FetchClient {
    async fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<HttpResponse> {
        let response = Self::prepare(Request::get(url), headers)
            .send()
            .await
            .map_err(|err| WidgetError::Network(err.to_string()))?;
        Ok(Self::read(response).await)
    }

    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, String)],
        form: FormData,
    ) -> Result<HttpResponse> {
        let request = Self::prepare(Request::post(url), headers)
            .body(form)
            .map_err(|err| WidgetError::Network(err.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|err| WidgetError::Network(err.to_string()))?;
        Ok(Self::read(response).await)
    }
}
