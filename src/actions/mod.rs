pub mod catalog;

pub use catalog::ActionId;
