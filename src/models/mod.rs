pub mod config;
pub mod dictionary;
pub mod locale;

pub use config::Config;
pub use dictionary::Dictionary;
pub use locale::Locale;
