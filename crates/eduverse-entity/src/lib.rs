//! # eduverse-entity
//!
//! Domain entity models for Eduverse. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.

pub mod chat;
pub mod class_group;
pub mod grade;
pub mod notification;
pub mod payment;
pub mod role;
pub mod schedule;
pub mod school;
pub mod subject;
pub mod user;
