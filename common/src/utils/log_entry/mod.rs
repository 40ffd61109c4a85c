pub mod inference;
pub mod system;
pub mod web;
