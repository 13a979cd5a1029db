//! Per-route method handler table.

use hermes_core::Handler;
use http::Method;
use std::sync::Arc;

/// Maps HTTP methods to handlers for a single route node.
///
/// Besides the eight routable methods the table has two sentinel slots:
/// `ANY`, a catch-all consulted after method-specific handlers, and
/// `NOT_FOUND`, the fallback inherited by the whole subtree below the node.
///
/// Registering a method twice overwrites the previous handler; last write
/// wins.
#[derive(Clone, Default)]
pub struct MethodHandlers {
    get: Option<Arc<dyn Handler>>,
    head: Option<Arc<dyn Handler>>,
    post: Option<Arc<dyn Handler>>,
    put: Option<Arc<dyn Handler>>,
    patch: Option<Arc<dyn Handler>>,
    delete: Option<Arc<dyn Handler>>,
    connect: Option<Arc<dyn Handler>>,
    options: Option<Arc<dyn Handler>>,
    any: Option<Arc<dyn Handler>>,
    not_found: Option<Arc<dyn Handler>>,
}

impl MethodHandlers {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for one of the eight routable methods.
    ///
    /// Methods outside the routable set are ignored; the registration
    /// surface never passes one.
    pub fn insert(&mut self, method: &Method, handler: Arc<dyn Handler>) {
        match *method {
            Method::GET => self.get = Some(handler),
            Method::HEAD => self.head = Some(handler),
            Method::POST => self.post = Some(handler),
            Method::PUT => self.put = Some(handler),
            Method::PATCH => self.patch = Some(handler),
            Method::DELETE => self.delete = Some(handler),
            Method::CONNECT => self.connect = Some(handler),
            Method::OPTIONS => self.options = Some(handler),
            _ => {}
        }
    }

    /// Registers the catch-all handler.
    pub fn insert_any(&mut self, handler: Arc<dyn Handler>) {
        self.any = Some(handler);
    }

    /// Registers the subtree not-found handler.
    pub fn insert_not_found(&mut self, handler: Arc<dyn Handler>) {
        self.not_found = Some(handler);
    }

    /// Returns the handler registered for an exact method, if any.
    #[must_use]
    pub fn get(&self, method: &Method) -> Option<&Arc<dyn Handler>> {
        match *method {
            Method::GET => self.get.as_ref(),
            Method::HEAD => self.head.as_ref(),
            Method::POST => self.post.as_ref(),
            Method::PUT => self.put.as_ref(),
            Method::PATCH => self.patch.as_ref(),
            Method::DELETE => self.delete.as_ref(),
            Method::CONNECT => self.connect.as_ref(),
            Method::OPTIONS => self.options.as_ref(),
            _ => None,
        }
    }

    /// Returns the catch-all handler, if any.
    #[must_use]
    pub fn any(&self) -> Option<&Arc<dyn Handler>> {
        self.any.as_ref()
    }

    /// Returns the subtree not-found handler, if any.
    #[must_use]
    pub fn not_found(&self) -> Option<&Arc<dyn Handler>> {
        self.not_found.as_ref()
    }

    /// Returns the real methods registered on this table, in a fixed order.
    ///
    /// The sentinels are excluded; this is the `Allow` header content for a
    /// synthesized 405.
    #[must_use]
    pub fn allowed_methods(&self) -> Vec<Method> {
        let mut methods = Vec::with_capacity(8);
        if self.get.is_some() {
            methods.push(Method::GET);
        }
        if self.head.is_some() {
            methods.push(Method::HEAD);
        }
        if self.post.is_some() {
            methods.push(Method::POST);
        }
        if self.put.is_some() {
            methods.push(Method::PUT);
        }
        if self.patch.is_some() {
            methods.push(Method::PATCH);
        }
        if self.delete.is_some() {
            methods.push(Method::DELETE);
        }
        if self.connect.is_some() {
            methods.push(Method::CONNECT);
        }
        if self.options.is_some() {
            methods.push(Method::OPTIONS);
        }
        methods
    }

    /// Returns true if at least one real (non-sentinel) method is registered.
    #[must_use]
    pub fn has_real_method(&self) -> bool {
        !self.allowed_methods().is_empty()
    }

    /// Returns true if nothing at all is registered, sentinels included.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_real_method() && self.any.is_none() && self.not_found.is_none()
    }

    /// Returns every registered token name for route listings, sentinels
    /// rendered as `ANY` and `NOT_FOUND`.
    #[must_use]
    pub fn tokens(&self) -> Vec<&'static str> {
        let mut tokens: Vec<&'static str> = self
            .allowed_methods()
            .iter()
            .map(|m| match *m {
                Method::GET => "GET",
                Method::HEAD => "HEAD",
                Method::POST => "POST",
                Method::PUT => "PUT",
                Method::PATCH => "PATCH",
                Method::DELETE => "DELETE",
                Method::CONNECT => "CONNECT",
                _ => "OPTIONS",
            })
            .collect();
        if self.any.is_some() {
            tokens.push("ANY");
        }
        if self.not_found.is_some() {
            tokens.push("NOT_FOUND");
        }
        tokens
    }
}
