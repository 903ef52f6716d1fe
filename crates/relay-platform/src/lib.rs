pub mod session_url;
pub mod roles;
pub mod store;
pub mod suggest;
pub mod tick;
