pub mod square;

pub(crate) mod range_set;

pub use self::square::Square;
