pub mod filters;
pub mod returns;
pub mod rows;
