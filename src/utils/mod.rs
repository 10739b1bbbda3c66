pub mod constants;
pub mod logger;

pub use logger::Logger;
