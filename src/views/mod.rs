//! Views - Screens and the components they compose

mod home;
mod secrets_list;
mod settings;

pub use home::*;
pub use secrets_list::*;
pub use settings::*;
