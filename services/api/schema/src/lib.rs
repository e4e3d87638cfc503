pub mod bathrooms;
pub mod reviews;
pub mod users;
