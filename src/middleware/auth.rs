//! Authentication and role-based authorization stages.
//!
//! [`authenticate`] turns the bearer credential into a
//! [`UserIdentity`] and a [`Role`] and adds both to the request context.
//! [`RequireRoles`] reads the role back and admits the request only if it is
//! on the allow-list. Both fail closed with `401 Unauthorized`, and the client
//! cannot tell an authentication failure from an authorization one.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{Middleware, Next, from_fn};
use crate::context::{RequestContext, ROLE, USER_IDENTITY};
use crate::error::AuthError;
use crate::handler::{BoxedHandler, Handler};
use crate::identity::UserIdentity;
use crate::request::Request;
use crate::response::IntoResponse;
use crate::role::Role;

/// Header carrying the bearer credential.
pub const AUTHORIZATION: &str = "authorization";

/// Resolves `Authorization: Bearer <id>` and stores the identity and its role
/// in the request context under [`USER_IDENTITY`] and [`ROLE`].
pub fn authenticate() -> impl Middleware + Clone {
    from_fn(|req: Request, next: Next| async move {
        let identity = match UserIdentity::resolve(req.header_value(AUTHORIZATION)) {
            Ok(identity) => identity,
            Err(e) => return e.into_response(),
        };
        let role = Role::of(&identity);
        debug!(user_id = %identity, %role, "authenticated");

        let req = req
            .with_value(&USER_IDENTITY, identity)
            .with_value(&ROLE, role);
        next.run(req).await
    })
}

/// Admits a request only if its context role is in a fixed allow-list.
///
/// Matching is exact membership. Roles carry no rank, so [`Role::Root`] does
/// not pass a gate that lists only [`Role::SuperUser`].
#[derive(Clone, Debug)]
pub struct RequireRoles {
    allowed: Arc<[Role]>,
}

impl RequireRoles {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self { allowed: allowed.into_iter().collect() }
    }

    pub fn allowed(&self) -> &[Role] {
        &self.allowed
    }

    /// # Errors
    ///
    /// [`AuthError::MissingRole`] if no stage set a role,
    /// [`AuthError::RoleNotAllowed`] if the role is not on the list.
    pub fn check(&self, ctx: &RequestContext) -> Result<Role, AuthError> {
        let role = ctx.role().ok_or(AuthError::MissingRole)?;
        if self.allowed.contains(&role) {
            Ok(role)
        } else {
            Err(AuthError::RoleNotAllowed(role))
        }
    }
}

impl Middleware for RequireRoles {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        let gate = self.clone();
        (move |req: Request| {
            let next = next.clone();
            let decision = gate.check(req.context());
            async move {
                match decision {
                    Ok(role) => {
                        debug!(%role, "role allowed");
                        next.call(req).await
                    }
                    Err(e) => {
                        let user_id = req.context().identity().map_or("-", UserIdentity::as_str);
                        warn!(user_id, error = %e, "authorization denied");
                        e.into_response()
                    }
                }
            }
        })
        .into_boxed_handler()
    }
}

/// Gate admitting exactly the listed roles.
pub fn require_roles(allowed: impl IntoIterator<Item = Role>) -> RequireRoles {
    RequireRoles::new(allowed)
}

/// Gate admitting [`Role::Root`] and [`Role::SuperUser`].
pub fn require_superuser_or_higher() -> RequireRoles {
    RequireRoles::new([Role::Root, Role::SuperUser])
}
