//! MCP gateway exposing Open-Meteo weather lookups as two callable tools:
//! `get_weather` (by coordinates) and `get_weather_by_city`.

pub mod api;
pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
