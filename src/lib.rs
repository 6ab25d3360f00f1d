// src/lib.rs

//! Campus Guide Core Library
//!
//! The search/view core of the campus guide application: substring search
//! with snippet highlighting over guide pages and campus facilities, a
//! typed event bus, and a pure view-state machine, assembled by an explicit
//! composition root ([`app::GuideApp`]).

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod models;
pub mod nav;
pub mod render;
pub mod search;
pub mod source;
pub mod storage;
pub mod view;
