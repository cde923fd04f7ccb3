//! Event loop that turns user input and a periodic timer into controller
//! calls.
//!
//! Everything runs on one task. The only concurrent piece is the interval
//! task behind [`TickerHandle`], which does nothing but post ticks back into
//! the loop's channel.

mod driver;
mod ticker;

pub use driver::{Driver, UserInput, View};
pub use ticker::{Tick, TickerHandle};
