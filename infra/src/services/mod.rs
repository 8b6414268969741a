//! Infrastructure implementations of core service capabilities

pub mod auth;
