pub mod hostname;
pub mod identifier;
