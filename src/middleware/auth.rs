use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorInternalServerError, ErrorUnauthorized},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::state::AppState;

/// User id of the signed-in user, placed in request extensions by [`RequireLogin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedInUser(pub String);

/// Rejects requests with 401 unless a `user-id` preference is stored.
pub struct RequireLogin;

impl<S, B> Transform<S, ServiceRequest> for RequireLogin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequireLoginService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireLoginService { service }))
    }
}

pub struct RequireLoginService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireLoginService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let user_id = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.auth.user_id(),
            None => {
                return Box::pin(ready(Err(ErrorInternalServerError(
                    "Application state missing",
                ))))
            }
        };

        match user_id {
            Some(user_id) => {
                req.extensions_mut().insert(SignedInUser(user_id));
                Box::pin(self.service.call(req))
            }
            None => Box::pin(ready(Err(ErrorUnauthorized("Login required")))),
        }
    }
}
