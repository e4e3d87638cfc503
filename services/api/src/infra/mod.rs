pub mod db;
pub mod geocoder;
