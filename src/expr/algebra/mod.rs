
//! Algebraic queries on expression trees.

pub mod degree;
