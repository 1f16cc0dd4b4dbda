//! Bike-share station map server.
//!
//! Fetches a provider's GBFS station feeds, classifies every station into a
//! health category and serves a map with one toggleable overlay per
//! category plus a summary panel.

pub mod cache;
pub mod classify;
pub mod config;
pub mod domain;
pub mod gbfs;
pub mod render;
pub mod web;
