//! HTTP handlers, grouped by domain.

pub mod auth;
pub mod chat;
pub mod class_group;
pub mod grade;
pub mod health;
pub mod notification;
pub mod payment;
pub mod schedule;
pub mod school;
pub mod subject;
pub mod user;
pub mod ws;
