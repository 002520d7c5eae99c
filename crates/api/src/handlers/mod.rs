pub mod questions;
pub mod recommendations;
