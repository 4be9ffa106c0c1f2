pub mod config;
pub mod logger;
pub mod picsift_toml;

pub use config::*;
pub use logger::{Colors, setup_logging};
pub use picsift_toml::{PicsiftToml, load_picsift_toml};
