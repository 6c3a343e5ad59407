pub mod driver;
pub mod human;

pub use driver::{DriverCommand, TickDriver};
pub use human::HumanMode;
