//! Interceptor Pipeline
//!
//! An ordered chain of transform functions the client runs on every call:
//! request transforms mutate the [`RequestDescriptor`] before dispatch,
//! response transforms mutate the parsed JSON body before it is
//! deserialized. The default chain is empty — cross-cutting concerns such
//! as auth headers or tracing ids are added here at construction time
//! instead of being edited into call sites.

use std::fmt;
use std::sync::Arc;

use crate::api::descriptor::RequestDescriptor;

/// Transform applied to every outgoing request
pub type RequestTransform = Arc<dyn Fn(&mut RequestDescriptor) + Send + Sync>;

/// Transform applied to every successful JSON response body
pub type ResponseTransform = Arc<dyn Fn(&mut serde_json::Value) + Send + Sync>;

/// Ordered request/response transform pipeline
#[derive(Clone, Default)]
pub struct InterceptorChain {
    request: Vec<RequestTransform>,
    response: Vec<ResponseTransform>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request transform; transforms run in registration order
    pub fn on_request<F>(mut self, transform: F) -> Self
    where
        F: Fn(&mut RequestDescriptor) + Send + Sync + 'static,
    {
        self.request.push(Arc::new(transform));
        self
    }

    /// Append a response transform; transforms run in registration order
    pub fn on_response<F>(mut self, transform: F) -> Self
    where
        F: Fn(&mut serde_json::Value) + Send + Sync + 'static,
    {
        self.response.push(Arc::new(transform));
        self
    }

    pub(crate) fn apply_request(&self, descriptor: &mut RequestDescriptor) {
        for transform in &self.request {
            transform(descriptor);
        }
    }

    pub(crate) fn apply_response(&self, body: &mut serde_json::Value) {
        for transform in &self.response {
            transform(body);
        }
    }
}

impl fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("request", &self.request.len())
            .field("response", &self.response.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[test]
    fn test_empty_chain_is_a_passthrough() {
        let chain = InterceptorChain::new();
        let mut desc = RequestDescriptor::new(Method::GET, "/health");
        chain.apply_request(&mut desc);
        assert_eq!(desc.path, "/health");
        assert!(desc.headers.is_empty());

        let mut body = serde_json::json!({ "success": true });
        chain.apply_response(&mut body);
        assert_eq!(body, serde_json::json!({ "success": true }));
    }

    #[test]
    fn test_request_transforms_run_in_order() {
        let chain = InterceptorChain::new()
            .on_request(|desc| {
                desc.headers.push(("X-Step".to_string(), "one".to_string()));
            })
            .on_request(|desc| {
                desc.headers.push(("X-Step".to_string(), "two".to_string()));
            });

        let mut desc = RequestDescriptor::new(Method::GET, "/health");
        chain.apply_request(&mut desc);

        let values: Vec<&str> = desc.headers.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(values, vec!["one", "two"]);
    }

    #[test]
    fn test_response_transform_sees_parsed_body() {
        let chain = InterceptorChain::new().on_response(|body| {
            if let Some(obj) = body.as_object_mut() {
                obj.insert("seen".to_string(), serde_json::Value::Bool(true));
            }
        });

        let mut body = serde_json::json!({ "success": true });
        chain.apply_response(&mut body);
        assert_eq!(body["seen"], true);
    }
}
