//! Nearest bus stop finder.
//!
//! Answers: "Which bus stop is closest to me, which bus leaves from it next,
//! and when does it get where it's going?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod resrobot;
pub mod select;
pub mod web;
