//! GPU device and window surface.
//!
//! One [`Gpu`] exists per game window. It owns the wgpu device/queue pair and
//! hands out a [`GpuFrame`] per rendered frame.

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
