use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Result Portal API",
        version = "0.1.0",
        description = "Exam result management and student result lookup"
    ),
    paths(
        routes::health::route::health_check,
        routes::auth::route::login,
        routes::dashboard::route::get_dashboard,
        routes::students::route::create_student,
        routes::students::route::get_students,
        routes::students::route::get_student,
        routes::exams::route::create_exam,
        routes::exams::route::get_exams,
        routes::exams::route::get_exam,
        routes::exams::route::get_exam_statistics,
        routes::results::route::create_result,
        routes::results::route::get_exam_results,
        routes::results::route::lookup,
        routes::upload::route::upload_results,
        routes::upload::route::get_uploads,
    ),
    tags(
        (name = "Health", description = "Liveness and database checks"),
        (name = "Authentication", description = "Administrator login"),
        (name = "Students", description = "Student records"),
        (name = "Exams", description = "Exam definitions"),
        (name = "Results", description = "Manual result entry, result listings and student lookup"),
        (name = "Upload", description = "Bulk result import and upload history"),
        (name = "Statistics", description = "Dashboard and per-exam statistics"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
