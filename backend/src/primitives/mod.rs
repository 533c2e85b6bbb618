//! Shared value primitives used by every transformer.
//!
//! - [`numeric`]: lenient numeric coercion and Indian digit grouping
//! - [`dates`]: Excel serial dates, display dates and month labels
//! - [`words`]: amounts in Indian-English currency words

pub mod dates;
pub mod numeric;
pub mod words;

pub use dates::{excel_serial_to_date, format_date_cell, is_date_like, month_label_from_sheet};
pub use numeric::{clean_numeric, format_inr};
pub use words::amount_in_words;
