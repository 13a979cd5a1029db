//! Verb masks for method-filtered middleware.

use http::Method;
use thiserror::Error;

/// Error returned when a verb outside the routable method set is used in a
/// verb-filtered registration.
///
/// The routable set is GET, HEAD, POST, PUT, PATCH, DELETE, CONNECT and
/// OPTIONS. Anything else in a registration call is a programmer error and
/// is surfaced before the server starts taking traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a routable http method: {method}")]
pub struct UnknownVerbError {
    /// The offending method token.
    pub method: String,
}

const FLAG_GET: u8 = 1;
const FLAG_HEAD: u8 = 1 << 1;
const FLAG_POST: u8 = 1 << 2;
const FLAG_PUT: u8 = 1 << 3;
const FLAG_PATCH: u8 = 1 << 4;
const FLAG_DELETE: u8 = 1 << 5;
const FLAG_CONNECT: u8 = 1 << 6;
const FLAG_OPTIONS: u8 = 1 << 7;

/// A bitset over the eight routable HTTP methods.
///
/// Middleware bindings carry a mask; a binding runs for a request when the
/// request method's bit is set in the mask. The empty mask never matches,
/// including for requests whose method is outside the routable set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbMask(u8);

impl VerbMask {
    /// The mask matching every routable method.
    pub const ALL: VerbMask = VerbMask(u8::MAX);

    /// The mask matching nothing.
    pub const NONE: VerbMask = VerbMask(0);

    /// Returns the single-bit mask for a routable method.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVerbError`] for any method outside the routable set.
    pub fn from_method(method: &Method) -> Result<VerbMask, UnknownVerbError> {
        let flag = match *method {
            Method::GET => FLAG_GET,
            Method::HEAD => FLAG_HEAD,
            Method::POST => FLAG_POST,
            Method::PUT => FLAG_PUT,
            Method::PATCH => FLAG_PATCH,
            Method::DELETE => FLAG_DELETE,
            Method::CONNECT => FLAG_CONNECT,
            Method::OPTIONS => FLAG_OPTIONS,
            _ => {
                return Err(UnknownVerbError {
                    method: method.to_string(),
                })
            }
        };
        Ok(VerbMask(flag))
    }

    /// Returns the mask for an incoming request's method.
    ///
    /// Unlike [`VerbMask::from_method`] this is infallible: a method outside
    /// the routable set yields the empty mask, which no binding matches.
    #[must_use]
    pub fn request_mask(method: &Method) -> VerbMask {
        Self::from_method(method).unwrap_or(VerbMask::NONE)
    }

    /// Builds the union mask of the given methods.
    ///
    /// An empty slice yields [`VerbMask::NONE`].
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVerbError`] if any method is outside the routable set.
    pub fn for_methods(methods: &[Method]) -> Result<VerbMask, UnknownVerbError> {
        let mut mask = VerbMask::NONE;
        for method in methods {
            mask = mask.union(Self::from_method(method)?);
        }
        Ok(mask)
    }

    /// Builds the complement mask of the given methods.
    ///
    /// An empty slice yields [`VerbMask::ALL`]; listing all eight methods
    /// yields [`VerbMask::NONE`].
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVerbError`] if any method is outside the routable set.
    pub fn except_methods(methods: &[Method]) -> Result<VerbMask, UnknownVerbError> {
        if methods.is_empty() {
            return Ok(VerbMask::ALL);
        }
        Ok(Self::for_methods(methods)?.complement())
    }

    /// Returns the union of two masks.
    #[must_use]
    pub const fn union(self, other: VerbMask) -> VerbMask {
        VerbMask(self.0 | other.0)
    }

    /// Returns the complement of this mask.
    #[must_use]
    pub const fn complement(self) -> VerbMask {
        VerbMask(!self.0)
    }

    /// Returns true if this mask is empty.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this mask covers the given request mask.
    ///
    /// An empty request mask never matches anything.
    #[must_use]
    pub const fn matches(self, verb: VerbMask) -> bool {
        if verb.0 == 0 {
            return false;
        }
        self.0 & verb.0 == verb.0
    }
}
