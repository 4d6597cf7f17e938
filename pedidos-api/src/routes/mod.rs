/// API route handlers
///
/// One module per resource:
///
/// - `health`: liveness endpoint
/// - `auth`: token issuance
/// - `clientes`, `categorias`, `tipo_pagamento`, `pagamentos`: entity CRUD
/// - `produtos`: products, filtered listing, category links
/// - `pedidos`: orders, product links, and the settlement guard

pub mod auth;
pub mod categorias;
pub mod clientes;
pub mod health;
pub mod pagamentos;
pub mod pedidos;
pub mod produtos;
pub mod tipo_pagamento;
