//! `nd-array` - Strided N-dimensional arrays with generic op dispatch.
//!
//! This crate provides:
//! - A `ShapeDescriptor` describing how a flat buffer maps onto an N-d array
//! - An `NdArray` type over owned or caller-borrowed buffers
//! - `TadPack` decomposition of an array into slices along chosen axes
//! - An `OpExecutor` trait for transform, pairwise, scalar, reduce, reduce3
//!   and broadcast op families
//! - A reference `CpuExecutor` implementation with rayon parallelism
//! - Element types (f16, f32, f64)

pub mod backend;
pub mod config;
pub mod cpu;
pub mod element;
pub mod error;
pub mod index;
pub mod ops;
pub mod shape;
pub mod storage;
pub mod tad;
pub mod tensor;

// Re-export primary types at the crate root for convenience.
pub use backend::{OpExecutor, RawView, RawViewMut};
pub use config::ExecConfig;
pub use cpu::CpuExecutor;
pub use element::{DType, Element};
pub use error::{Result, TensorError};
pub use shape::{Order, ShapeDescriptor};
pub use storage::Storage;
pub use tad::TadPack;
pub use tensor::NdArray;
