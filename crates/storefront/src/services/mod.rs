//! Stateful services wrapping the pure `verde-core` transitions.
//!
//! # Services
//!
//! - `shopper` - the shopper's cart, wishlist and active discount
//! - `admin` - the admin console gate and order book
//!
//! Each service owns its state blob and writes it back to the
//! [`KeyValueStore`](crate::persistence::KeyValueStore) after every
//! mutation. Write failures are logged and never roll back memory.

pub mod admin;
pub mod shopper;

pub use admin::AdminConsole;
pub use shopper::{SelectionError, ShopperSession, generate_order_number};
