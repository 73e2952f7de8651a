pub mod entities;
pub mod form;
pub mod submission;
pub mod validation;
