#![warn(unused_imports)]
#![deny(clippy::clone_on_copy)]
#![deny(clippy::style)]

pub mod app_config;
pub mod logging;
pub mod startup;
