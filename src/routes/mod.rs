// Route exports
pub mod pairings;

use crate::services::PairingStore;
use actix_web::web;

pub fn configure_routes<S: PairingStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(pairings::configure::<S>),
    );
}
