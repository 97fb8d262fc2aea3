//! Test helpers for inbound HTTP components.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;

/// Fixture-backed state with selected ports replaced.
pub fn state_with(customise: impl FnOnce(&mut HttpState)) -> HttpState {
    let mut state = HttpState::fixture();
    customise(&mut state);
    state
}

/// App serving the `/api/v1` scope over `state`, wrapped in the trace
/// middleware the server uses.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .configure(|cfg| configure(cfg, web::Data::new(state)))
}
