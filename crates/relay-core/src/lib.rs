pub mod ports;
pub mod event_bus;
pub mod timer;
pub mod suggest;
pub mod controller;
