pub mod people;

pub use people::{PeopleError, PeopleService, Stage};
