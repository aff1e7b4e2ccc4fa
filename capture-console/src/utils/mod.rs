pub mod normalize;
pub mod safe_join;

pub use normalize::{normalize, normalize_args};
pub use safe_join::safe_join;
