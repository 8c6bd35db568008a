//! Service layer
//!
//! The timeout governor, its two enforcement strategies, and the helpers they
//! share for running bodies and classifying what they raised.

pub mod body_runner;
pub mod cause_chain;
pub mod cooperative_interrupt;
pub mod deadline_race;
pub mod strategy;
pub mod timeout_governor;

pub use cause_chain::{causes, find_deliberate_failure};
pub use cooperative_interrupt::CooperativeInterrupt;
pub use deadline_race::DeadlineRace;
pub use strategy::{Invocation, PlatformStrategy, TimeoutStrategy};
pub use timeout_governor::TimeoutGovernor;
