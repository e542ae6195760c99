//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marvel Characters API",
        version = "0.1.0",
        description = "MongoDB-backed REST API for managing Marvel characters",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/characters", api = domain_characters::ApiDoc)
    ),
    tags(
        (name = "Characters", description = "Marvel character management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
