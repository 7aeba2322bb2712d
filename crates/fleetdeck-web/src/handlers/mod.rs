//! HTTP handlers for the dashboard

pub mod actions;
pub mod pages;
