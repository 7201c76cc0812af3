//! REST API handlers for the ingestion service.

mod router;
mod uploads;


pub use router::create_router;
