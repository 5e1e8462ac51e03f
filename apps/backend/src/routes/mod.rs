pub mod layout;
pub mod parse;
