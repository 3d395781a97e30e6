pub mod nullable;

pub use nullable::nullable_field;
