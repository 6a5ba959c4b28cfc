//! Solve constraint satisfaction problems by backtracking search with constraint propagation,
//! and build CSP models for KenKen puzzles, Latin grids and N-Queens

#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

#[macro_use]
extern crate log;

pub mod collections;
pub mod csp;
pub mod error;
pub mod model;
pub mod propagate;
pub mod puzzle;
pub mod search;

mod generate;
mod parse;

type HashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
type HashSet<T> = std::collections::HashSet<T, ahash::RandomState>;
type LinkedHashSet<T> = linked_hash_set::LinkedHashSet<T, ahash::RandomState>;
