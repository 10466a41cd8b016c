pub mod profile_header;
pub mod route_guard;

pub use profile_header::PROFILE_HEADER;
pub use route_guard::route_guard;
