pub mod city;
pub mod person;

pub use city::{CityRegistry, Coordinate};
pub use person::Person;
