//! # SlotDesk Core
//!
//! Domain types and booking rules for the SlotDesk appointment service.
//!
//! ## Modules
//!
//! - **slots**: the fixed daily grid of bookable start times
//! - **booking**: availability, admission and the appointment lifecycle
//! - **notify**: notice composition and detached delivery
//! - **store**: persistence traits implemented by `slotdesk-db` and [`memory`]
//!
//! Nothing in this crate talks to the network or a database directly.

pub mod booking;
pub mod clock;
pub mod config;
pub mod errors;
pub mod format;
pub mod memory;
pub mod models;
pub mod notify;
pub mod slots;
pub mod store;
