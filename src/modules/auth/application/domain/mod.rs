pub mod entities;
pub mod token;
