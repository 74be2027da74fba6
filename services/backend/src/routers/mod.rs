pub mod root;
pub mod song;
pub use root::{count_route, health_check_route};
pub use song::song_routes;
