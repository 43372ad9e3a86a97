pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod controller;
pub mod events;
pub mod generator;
pub mod history;
pub mod request;
pub mod spinner;
