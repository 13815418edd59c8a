//! Attorney records offered by the front-end forms.

pub mod directory;
pub mod model;
pub mod routes;


pub use directory::AttorneyDirectory;
pub use model::Attorney;
