#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(clippy::pedantic)]

pub mod models;
