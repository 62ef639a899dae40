//! Language listeners mapping parse-tree productions to engine calls

pub mod common;
pub mod cpp;
pub mod java;

pub use cpp::CppListener;
pub use java::JavaListener;
