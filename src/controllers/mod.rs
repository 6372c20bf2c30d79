//! Request handlers.

pub mod home;
pub mod test_controller;
