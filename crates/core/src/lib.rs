pub mod config;
pub mod dates;
pub mod district;
pub mod prices;
pub mod program;
pub mod record;

pub use config::{Config, ConfigError};
pub use dates::{effective_date_for, expiration_date_for};
pub use district::{District, DISTRICTS};
pub use prices::{PriceCategory, Prices};
pub use program::Program;
pub use record::{ParsedFields, RegistrationRecord, COUNCIL_NUMBER, TERM};
