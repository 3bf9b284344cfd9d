//! Orchestration of one kiosk: navigation, checkout and command dispatch.
//!
//! The domain layer holds the rules; this layer sequences them and talks to
//! the ports.
pub mod command;
pub mod kiosk;
pub mod navigator;
pub mod selfie;
