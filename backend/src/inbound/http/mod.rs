//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate JSON payloads into domain drafts and change sets, call
//! the driving ports held in [`state::HttpState`], and map domain errors onto
//! HTTP responses.

use actix_web::web;

use crate::domain::Error;
use state::HttpState;

pub mod courses;
pub mod error;
pub mod health;
pub mod notes;
pub mod reports;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// JSON extractor settings: malformed bodies become `invalid_request` errors
/// with the usual error payload.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}

/// Register the `/api/v1` scope and its shared state.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use coursenote::inbound::http::{configure, state::HttpState};
///
/// let state = web::Data::new(HttpState::fixture());
/// let _app = App::new().configure(|cfg| configure(cfg, state));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<HttpState>) {
    cfg.app_data(state).app_data(json_config()).service(
        web::scope("/api/v1")
            .service(courses::list_courses)
            .service(courses::create_course)
            .service(courses::get_course)
            .service(courses::update_course)
            .service(courses::delete_course)
            .service(notes::list_course_notes)
            .service(notes::list_notes)
            .service(notes::create_note)
            .service(notes::get_note)
            .service(notes::update_note)
            .service(notes::delete_note)
            .service(reports::course_note_report),
    );
}
