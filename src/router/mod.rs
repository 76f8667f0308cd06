//! Request routing.
//!
//! A router holds an ordered table of `(method, pattern, handler)` entries
//! built once at startup and shared read-only by every connection task.
//! Dispatch scans the table in declaration order and the first entry whose
//! method and full pattern match wins, so more specific patterns belong
//! before more general ones.

pub mod resource;

use std::sync::Arc;

use regex::Regex;

use crate::http::request::{Method, Request};
use crate::http::response::Response;

pub use resource::{Resource, ResourceHandler};

/// A unit of request handling.
///
/// An error return is an unexpected handler failure; it is not caught by
/// the router but by the worker, which turns it into a 500.
pub trait Handler: Send + Sync {
    fn handle(&self, req: &mut Request) -> anyhow::Result<Response>;
}

impl<F> Handler for F
where
    F: Fn(&mut Request) -> anyhow::Result<Response> + Send + Sync,
{
    fn handle(&self, req: &mut Request) -> anyhow::Result<Response> {
        self(req)
    }
}

struct Route {
    method: Method,
    pattern: Regex,
    handler: Arc<dyn Handler>,
}

/// Builds the route table.
pub struct RouterBuilder {
    routes: Vec<Route>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registers a handler for `method` and a path pattern.
    ///
    /// The pattern must match the whole request path; it is anchored here,
    /// so `/item/(\d+)` matches `/item/42` but not `/item/42/x`. Capture
    /// groups become the request's params in group order.
    pub fn route(
        mut self,
        method: Method,
        pattern: &str,
        handler: impl Handler + 'static,
    ) -> anyhow::Result<Self> {
        let compiled = compile(pattern)?;
        self.routes.push(Route {
            method,
            pattern: compiled,
            handler: Arc::new(handler),
        });
        Ok(self)
    }

    /// Registers a [`Resource`] under one pattern for all four methods.
    pub fn resource(
        mut self,
        pattern: &str,
        resource: impl Resource + 'static,
    ) -> anyhow::Result<Self> {
        let compiled = compile(pattern)?;
        let handler: Arc<dyn Handler> = Arc::new(ResourceHandler(resource));
        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            self.routes.push(Route {
                method,
                pattern: compiled.clone(),
                handler: handler.clone(),
            });
        }
        Ok(self)
    }

    pub fn build(self) -> Router {
        Router {
            routes: self.routes,
        }
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(pattern: &str) -> anyhow::Result<Regex> {
    // Full-match semantics; the wrapping group is non-capturing so user
    // capture indices stay 1-based.
    Ok(Regex::new(&format!("^(?:{})$", pattern))?)
}

/// The immutable route table.
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Dispatches a request to the first matching route.
    ///
    /// Captured groups are appended to `req.params` before the handler
    /// runs. No match yields a plain 404.
    pub fn dispatch(&self, req: &mut Request) -> anyhow::Result<Response> {
        for route in &self.routes {
            if route.method != req.method {
                continue;
            }
            let captured: Vec<String> = match route.pattern.captures(&req.path) {
                Some(caps) => (1..caps.len())
                    .map(|i| caps.get(i).map_or(String::new(), |m| m.as_str().to_string()))
                    .collect(),
                None => continue,
            };
            req.params.extend(captured);
            return route.handler.handle(req);
        }
        Ok(Response::not_found())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
