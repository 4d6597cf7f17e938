/// Database models
///
/// One module per entity, each with its row struct and query methods.
///
/// # Models
///
/// - `user`: API credential holders (token issuance)
/// - `cliente`: customers
/// - `categoria`: product categories
/// - `tipo_pagamento`: payment methods
/// - `produto`: products, category links, and filtered search
/// - `pedido`: orders, product links, and the settlement guard
/// - `pagamento`: payments; a pagamento settles its pedido
///
/// # Example
///
/// ```no_run
/// use pedidos_shared::models::cliente::{Cliente, CreateCliente};
/// use pedidos_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let cliente = Cliente::create(&pool, CreateCliente {
///     nome: "Maria".to_string(),
///     idade: 31,
///     email: "maria@example.com".to_string(),
///     cpf: "12345678901".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod categoria;
pub mod cliente;
pub mod pagamento;
pub mod pedido;
pub mod produto;
pub mod tipo_pagamento;
pub mod user;
