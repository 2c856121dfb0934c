//! OpenCL implementation of the compute traits, built on the `ocl` crate.
//!
//! Buffers are `float2` arrays; the GL vertex buffer is registered with
//! `clCreateFromGLBuffer` and handed over with
//! `clEnqueueAcquireGLObjects` / `clEnqueueReleaseGLObjects`.

mod backend;

pub use backend::{OclBackend, OclDriver, OclProgram};
