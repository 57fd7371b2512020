mod common;
mod controller;
mod schema;
