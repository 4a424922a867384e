mod bar;
mod dataset;

pub use bar::{Bar, DATE_FORMAT, ParseError};
pub(crate) use bar::check_price;
pub use dataset::{Dataset, DatasetIntegrityError};
