pub mod error;
pub mod loader;
pub mod models;
pub mod validator;

pub use error::{FixtureError, Result};
pub use loader::{load_database, load_file};
pub use models::{FORMAT_VERSION, FixtureSet};
pub use validator::{FixtureValidator, ValidationReport};
