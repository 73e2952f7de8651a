pub mod draft;
pub mod entities;
pub mod filters;
pub mod map;
