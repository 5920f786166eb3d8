//! Page Builder WASM API
//!
//! JavaScript-facing functions over the single mounted builder session.
//!
//! - `helpers`: console logging macros, JS conversion, session access
//! - `types`: result and argument shapes shared by the API modules
//! - `builder`: mount scope, page load, history, saving, shortcuts
//! - `layout`: cell and block editing, divider drags, drop targets
//! - `products`: variant matching and binding resolution

pub mod helpers;
pub mod types;
pub mod builder;
pub mod layout;
pub mod products;

pub use builder::*;
pub use layout::*;
pub use products::*;
