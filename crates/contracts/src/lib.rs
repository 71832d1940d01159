//! Общие типы админки фида Rozetka.
//!
//! Здесь живёт всё, что не зависит от DOM: DTO обмена с сервером,
//! состояние сопоставления категорий, форма настроек и валидация.

pub mod domain;
pub mod projections;
pub mod shared;
pub mod usecases;
