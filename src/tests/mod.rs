use super::*;

mod cart_and_fetch;
mod quantity_controls;
