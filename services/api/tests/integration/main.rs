mod auth_test;
mod geocode_test;
mod review_test;
mod router_test;
