//! Domain model for the punch clock
//!
//! Pure dates, intervals and the merge/subtract algorithm, without any I/O
//! concerns.

mod block;
mod date;
mod day;
mod month;
mod totals;

pub use block::Block;
pub use date::{Date, FormatError};
pub use day::{Day, Limits};
pub use month::Month;
pub use totals::format_hhmm;
