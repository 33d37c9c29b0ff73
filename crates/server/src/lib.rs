pub mod errors;
pub mod forms;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod views;

pub use startup::run;
