//! SeaORM entities used by the `orm` strategy.

pub mod comment;
pub mod post;
