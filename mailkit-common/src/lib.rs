pub mod address;
pub mod config;
pub mod error;
pub mod logging;
pub mod mailto;
pub mod paste;
pub mod text;

pub use tracing;

pub use address::{Address, AddressList};
pub use config::MailtoLimits;
pub use error::{Field, MailtoError, PasteError};
pub use mailto::{MailTo, MailtoUri};
