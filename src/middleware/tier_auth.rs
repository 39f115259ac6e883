use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use log::{debug, warn};
use serde_json::json;

use crate::middleware::tier_context::tier_from_headers;
use crate::models::membership::MembershipTier;

/// Lets a request through when its membership tier matches `required_tier`
/// or is `admin`.
pub struct RequireTier {
    required_tier: MembershipTier,
}

impl RequireTier {
    pub fn new(tier: MembershipTier) -> Self {
        RequireTier {
            required_tier: tier,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireTier
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireTierService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireTierService {
            service,
            required_tier: self.required_tier,
        }))
    }
}

pub struct RequireTierService<S> {
    service: S,
    required_tier: MembershipTier,
}

impl<S, B> Service<ServiceRequest> for RequireTierService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let required_tier = self.required_tier;

        let denied = match tier_from_headers(req.headers()) {
            Some(Ok(tier)) => {
                debug!("Tier check - required: {}, presented: {}", required_tier, tier);
                if tier == required_tier || tier == MembershipTier::Admin {
                    let fut = self.service.call(req);
                    return Box::pin(async move {
                        fut.await.map(ServiceResponse::map_into_left_body)
                    });
                }
                warn!("Access denied to {} for {} tier", req.path(), tier);
                HttpResponse::Forbidden().json(json!({ "error": "Insufficient membership tier" }))
            }
            Some(Err(e)) => {
                warn!("Rejected membership header on {}: {}", req.path(), e);
                HttpResponse::BadRequest().json(json!({ "error": e.to_string() }))
            }
            None => HttpResponse::Unauthorized().json(json!({ "error": "No membership context" })),
        };

        Box::pin(ready(Ok(req.into_response(denied).map_into_right_body())))
    }
}
