use std::future::{ready, Ready};

use actix_web::{
    dev::Payload, error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest,
};

use crate::middleware::auth::Claims;
use crate::models::user::UserRole;

#[derive(Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(claims) = req.extensions().get::<Claims>() {
            ready(Ok(AuthenticatedUser {
                user_id: claims.user_id.clone(),
                email: claims.sub.clone(),
                role: claims
                    .role
                    .as_deref()
                    .map(UserRole::from_str_or_guest)
                    .unwrap_or(UserRole::Guest),
            }))
        } else {
            ready(Err(ErrorUnauthorized("User not authenticated")))
        }
    }
}
