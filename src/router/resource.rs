use crate::http::request::{Method, Request};
use crate::http::response::Response;

use super::Handler;

/// A handler shaped around the four methods.
///
/// Every operation defaults to 404, so a resource only overrides what it
/// actually serves. This is a thin convenience over [`Handler`] and
/// carries no state of its own.
pub trait Resource: Send + Sync {
    fn get(&self, _req: &mut Request) -> anyhow::Result<Response> {
        Ok(Response::not_found())
    }

    fn post(&self, _req: &mut Request) -> anyhow::Result<Response> {
        Ok(Response::not_found())
    }

    fn put(&self, _req: &mut Request) -> anyhow::Result<Response> {
        Ok(Response::not_found())
    }

    fn delete(&self, _req: &mut Request) -> anyhow::Result<Response> {
        Ok(Response::not_found())
    }
}

/// Adapts a [`Resource`] to the [`Handler`] contract by switching on the
/// request's method.
pub struct ResourceHandler<T>(pub T);

impl<T: Resource> Handler for ResourceHandler<T> {
    fn handle(&self, req: &mut Request) -> anyhow::Result<Response> {
        match req.method {
            Method::GET => self.0.get(req),
            Method::POST => self.0.post(req),
            Method::PUT => self.0.put(req),
            Method::DELETE => self.0.delete(req),
        }
    }
}
