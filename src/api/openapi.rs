//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, borrowings, health, patrons};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "Library Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::signin,
        auth::me,
        // Books
        books::create_book,
        books::get_book,
        // Patrons
        patrons::create_patron,
        patrons::get_patron,
        patrons::update_patron,
        patrons::delete_patron,
        // Borrowings
        borrowings::borrow_book,
        borrowings::return_book,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::SignUpRequest,
            crate::models::user::SignInRequest,
            crate::models::user::TokenResponse,
            auth::IdentityResponse,
            crate::models::user::Role,
            crate::models::user::User,
            // Books
            crate::models::book::Book,
            crate::models::book::BookStatus,
            crate::models::book::CreateBook,
            // Patrons
            crate::models::patron::Patron,
            crate::models::patron::CreatePatron,
            crate::models::patron::UpdatePatron,
            // Borrowings
            crate::models::borrowing::BorrowingRecord,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "patrons", description = "Patron management"),
        (name = "borrowings", description = "Borrow and return operations")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
