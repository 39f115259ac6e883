use std::future::{ready, Ready};

use actix_web::{
    dev::Payload, error::ErrorBadRequest, http::header::HeaderMap, Error, FromRequest,
    HttpRequest,
};

use crate::error::{FeeError, Result};
use crate::models::membership::{MembershipContext, MembershipTier};

/// Set by the session layer in front of this service.
pub const MEMBERSHIP_TIER_HEADER: &str = "X-Membership-Tier";

/// `None` when the header is absent; an error when it is present but not
/// a known tier.
pub fn tier_from_headers(headers: &HeaderMap) -> Option<Result<MembershipTier>> {
    let value = headers.get(MEMBERSHIP_TIER_HEADER)?;
    let tier = value
        .to_str()
        .map_err(|_| FeeError::UnknownTier(String::from_utf8_lossy(value.as_bytes()).into_owned()))
        .and_then(|raw| raw.parse());
    Some(tier)
}

/// Requests without a tier header are treated as visitors.
impl FromRequest for MembershipContext {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match tier_from_headers(req.headers()) {
            None => ready(Ok(MembershipContext::visitor())),
            Some(Ok(tier)) => ready(Ok(MembershipContext::member(tier))),
            Some(Err(e)) => ready(Err(ErrorBadRequest(e.to_string()))),
        }
    }
}
