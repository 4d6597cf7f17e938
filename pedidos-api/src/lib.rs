//! # Pedidos API Server Library
//!
//! Order-management REST API: clientes, produtos, categorias, pedidos, and
//! pagamentos, with the settlement guard on pedido mutations.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
