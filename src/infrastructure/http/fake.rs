//! Scripted [`HttpClient`] backing the native build.
//!
//! Responses are consumed from a queue in request order; every request is
//! recorded for assertions. A deferred entry stays pending until the test
//! resolves it, which is how out-of-order completions are exercised.

use super::{HttpClient, HttpResponse};
use crate::infrastructure::dom::fake::FakeForm;
use crate::shared::errors::{Result, WidgetError};
use async_trait::async_trait;
use futures::channel::oneshot;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub form: Option<FakeForm>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header == name)
            .map(|(_, value)| value.as_str())
    }
}

enum Scripted {
    Ready(Result<HttpResponse>),
    Deferred(oneshot::Receiver<Result<HttpResponse>>),
}

#[derive(Default)]
struct FakeHttpState {
    responses: VecDeque<Scripted>,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone, Default)]
pub struct FakeHttp {
    state: Rc<RefCell<FakeHttpState>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, status: u16, body: &str) {
        self.state
            .borrow_mut()
            .responses
            .push_back(Scripted::Ready(Ok(HttpResponse {
                status,
                body: body.to_string(),
            })));
    }

    pub fn enqueue_network_error(&self, message: &str) {
        self.state
            .borrow_mut()
            .responses
            .push_back(Scripted::Ready(Err(WidgetError::Network(
                message.to_string(),
            ))));
    }

    /// Enqueue a response that stays pending until the returned sender
    /// resolves it.
    pub fn enqueue_deferred(&self) -> oneshot::Sender<Result<HttpResponse>> {
        let (tx, rx) = oneshot::channel();
        self.state
            .borrow_mut()
            .responses
            .push_back(Scripted::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }

    fn record(&self, method: &str, url: &str, headers: &[(&str, String)], form: Option<FakeForm>) {
        self.state.borrow_mut().requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
            form,
        });
    }

    async fn respond(&self) -> Result<HttpResponse> {
        let scripted = self.state.borrow_mut().responses.pop_front();
        match scripted {
            None => Err(WidgetError::Network("no scripted response".to_string())),
            Some(Scripted::Ready(response)) => response,
            Some(Scripted::Deferred(receiver)) => receiver.await.unwrap_or_else(|_| {
                Err(WidgetError::Network("response sender dropped".to_string()))
            }),
        }
    }
}

#[async_trait(?Send)]
impl HttpClient<FakeForm> for FakeHttp {
    async fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<HttpResponse> {
        self.record("GET", url, headers, None);
        self.respond().await
    }

    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, String)],
        form: FakeForm,
    ) -> Result<HttpResponse> {
        self.record("POST", url, headers, Some(form));
        self.respond().await
    }
}
