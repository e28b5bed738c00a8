//! Badge-identity headers extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::types::BadgeIdentity;

/// Device identity reported by the badge firmware via the `panda-xpress`
/// (device id) and `panda-mac` headers.
///
/// Both are optional: anonymous triggers are legal and take the
/// unregistered branch, so extraction never rejects. Empty or unreadable
/// values count as absent.
#[derive(Debug, Clone)]
pub struct DeviceHeaders {
    pub device_id: Option<String>,
    pub device_mac: Option<String>,
}

impl DeviceHeaders {
    /// Composite identity, present only when both headers carry a value.
    pub fn identity(&self) -> Option<BadgeIdentity> {
        match (self.device_id.as_deref(), self.device_mac.as_deref()) {
            (Some(id), Some(mac)) => Some(BadgeIdentity::new(id, mac)),
            _ => None,
        }
    }
}

impl<S> FromRequestParts<S> for DeviceHeaders
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not
    // `async fn`); extracting synchronously and returning a 'static async
    // block sidesteps the lifetime-capture mismatch.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let device_id = header_value(parts, "panda-xpress");
        let device_mac = header_value(parts, "panda-mac");
        async move {
            Ok(Self {
                device_id,
                device_mac,
            })
        }
    }
}

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
