use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

/// Advertises the bearer token the API gateway forwards.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer-key",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Microsserviço de usuario da aplicação de e-commerce",
        version = "0.1.0",
        description = "API para gerenciamento de usuarios em aplicação de E-commer.",
        contact(name = "Time Backend", email = "backend@plataforma-ead.com"),
        license(name = "Apache 2.0", url = "http://plataforma-ead.com/api/licenca")
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/usuarios", api = domain_users::handlers::ApiDoc)
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_info() {
        let doc = ApiDoc::openapi();
        assert_eq!(
            doc.info.title,
            "Microsserviço de usuario da aplicação de e-commerce"
        );
        let license = doc.info.license.unwrap();
        assert_eq!(license.name, "Apache 2.0");
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer-key"));
        assert!(components.schemas.contains_key("ErrorResponse"));
    }

    #[test]
    fn test_user_paths_nested() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/usuarios/{usuarioId}"));
        assert!(paths.contains_key("/usuarios/{usuarioId}/senha"));
        assert!(paths.contains_key("/usuarios/{usuarioId}/status"));
        assert!(paths.contains_key("/usuarios/{usuarioId}/role"));
    }

    #[test]
    fn test_pool_exhaustion_documented() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.responses.contains_key("ServiceUnavailableResponse"));

        let detail = &doc.paths.paths["/usuarios/{usuarioId}"];
        let get = detail.get.as_ref().unwrap();
        assert!(get.responses.responses.contains_key("503"));
    }
}
