pub mod raw_bar;
pub mod request;
