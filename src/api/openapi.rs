use super::handlers::{auth, auth::types, health};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::admin::login,
        auth::admin::logout,
        auth::admin::session,
        auth::admin::change_password,
        auth::admin::list_admins,
        auth::admin::update_admin_status,
        auth::admin::update_fundi_subscription,
        auth::fundi::login,
        auth::fundi::logout,
        auth::fundi::session,
        auth::fundi::access,
        auth::fundi::premium,
        auth::fundi::change_password,
        auth::client::login,
        auth::client::logout,
        auth::client::session,
        auth::client::change_password,
    ),
    components(schemas(
        health::Health,
        types::AccessInfo,
        types::AdminListResponse,
        types::AdminLoginResponse,
        types::AdminProfile,
        types::AdminSessionResponse,
        types::ClientLoginResponse,
        types::ClientSessionResponse,
        types::ErrorBody,
        types::FundiLoginResponse,
        types::FundiProfile,
        types::FundiSessionResponse,
        types::LoginRequest,
        types::MessageResponse,
        types::PasswordChangeRequest,
        types::StatusUpdateRequest,
        types::SubscriptionUpdateRequest,
    )),
    tags(
        (name = "admin", description = "Platform staff sessions and account management"),
        (name = "fundi", description = "Service provider sessions and subscription access"),
        (name = "client", description = "Employer sessions"),
        (name = "health", description = "Service health"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let spec = openapi();
        assert_eq!(spec.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(spec.info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn documents_every_route_family() {
        let spec = openapi();
        let paths = &spec.paths.paths;

        for path in [
            "/health",
            "/v1/admin/login",
            "/v1/admin/admins/{id}/status",
            "/v1/admin/fundis/{id}/subscription",
            "/v1/fundi/access",
            "/v1/fundi/premium",
            "/v1/client/session",
        ] {
            assert!(paths.contains_key(path), "missing path: {path}");
        }
    }
}
