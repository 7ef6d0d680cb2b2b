pub mod router;
pub mod routes;

pub use router::{AppState, promptbuilder_router};
