//! Search structures over records. Each index is independent and incrementally
//! updateable; the catalog engine keeps them consistent with the record store.

mod arena;

pub mod balanced;
pub mod hash;
pub mod ordered;
pub mod prefix;

pub use balanced::BalancedIndex;
pub use hash::{next_prime, title_hash, HashIndex};
pub use ordered::OrderedIndex;
pub use prefix::{normalize_title, PrefixIndex};
