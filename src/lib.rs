pub mod analysis;
pub mod export;
pub mod models;
pub mod service;
pub mod store;

pub use analysis::{AnalysisResponder, build_report, parse_view_flag};
pub use export::render_report;
pub use models::*;
pub use service::{AppState, build_router, create_app};
pub use store::{MongoSessionStore, SESSION_COLLECTION, SessionStore, StoreError};
