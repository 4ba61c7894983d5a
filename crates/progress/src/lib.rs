//! # Certificado Progress
//!
//! The simulated "analysing your data" indicator shown before a certificate is offered.
//!
//! - [`ProgressSimulator`]: two-state machine driven by elapsed time
//! - [`Ticker`]: cancellable periodic callbacks on tokio
//! - [`ProgressDriver`]: simulator + ticker, publishing [`ProgressView`]s on a watch channel
//! - [`ProgressView`]: what the indicator shows, including its SVG ring

pub mod driver;
pub mod simulator;
pub mod ticker;
pub mod view;

pub use driver::ProgressDriver;
pub use simulator::{ProgressSimulator, ProgressState, TickOutcome, TICK_INTERVAL, TOTAL_DURATION};
pub use ticker::{Ticker, TickerHandle};
pub use view::{ProgressArc, ProgressView};
