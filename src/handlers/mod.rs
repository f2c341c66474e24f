pub mod people;
pub mod system;
