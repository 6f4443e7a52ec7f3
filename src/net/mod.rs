/// The networking boundary: the `Transport` trait and its implementations.

pub mod transport;
