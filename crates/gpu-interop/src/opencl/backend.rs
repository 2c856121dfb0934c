//! [`OclDriver`] and [`OclBackend`].

use std::ffi::c_void;

use glcl_core::Point;
use ocl::enums::{ContextPropertyValue, PlatformInfo as PlatformInfoKind};
use ocl::flags::MemFlags;
use ocl::prm::Float2;
use ocl::{Buffer, Context, Device, Kernel, Platform, Program, Queue};
use tracing::{debug, info, warn};

use crate::compute::{ComputeBackend, ComputeDriver, GlBufferId};
use crate::error::InteropError;
use crate::platform::{pick_platform, PlatformInfo, SharingProperty, SharingRequest};

fn driver_err(err: impl std::fmt::Display) -> InteropError {
    InteropError::Driver(err.to_string())
}

fn to_float2(points: &[Point]) -> Vec<Float2> {
    points.iter().map(|p| Float2::new(p.x, p.y)).collect()
}

fn property_value(property: SharingProperty) -> ContextPropertyValue {
    match property {
        SharingProperty::GlContext(handle) => ContextPropertyValue::GlContextKhr(handle as *mut c_void),
        SharingProperty::GlxDisplay(handle) => {
            ContextPropertyValue::GlxDisplayKhr(handle as *mut c_void)
        }
        SharingProperty::EglDisplay(handle) => ContextPropertyValue::EglDisplayKhr(handle as _),
        SharingProperty::WglHdc(handle) => ContextPropertyValue::WglHdcKhr(handle as *mut c_void),
        SharingProperty::CglShareGroup(handle) => {
            ContextPropertyValue::CglSharegroupKhr(handle as *mut c_void)
        }
    }
}

/// Every platform the ICD loader knows about. A loader without any installed
/// driver reports an error here, which is the same as finding no platform.
fn list_platforms() -> Result<Vec<Platform>, InteropError> {
    match ocl::core::get_platform_ids() {
        Ok(ids) => Ok(ids.into_iter().map(Platform::new).collect()),
        Err(err) => {
            warn!(%err, "OpenCL platform enumeration failed");
            Err(InteropError::NoInteropCapablePlatform)
        }
    }
}

/// Discovers OpenCL platforms through the installed ICD loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct OclDriver;

impl ComputeDriver for OclDriver {
    type Backend = OclBackend;

    fn platforms(&self) -> Result<Vec<PlatformInfo>, InteropError> {
        list_platforms()?
            .into_iter()
            .enumerate()
            .map(|(index, platform)| {
                let name = platform.name().map_err(driver_err)?;
                let extensions = platform
                    .info(PlatformInfoKind::Extensions)
                    .map_err(driver_err)?
                    .to_string();
                Ok(PlatformInfo::new(index, name, &extensions))
            })
            .collect()
    }

    fn create_shared_context(&self, request: &SharingRequest) -> Result<OclBackend, InteropError> {
        let platform = pick_platform(list_platforms()?, request.platform)?;

        let devices = Device::list_all(&platform)
            .map_err(|e| InteropError::DeviceUnavailable(e.to_string()))?;
        let device_index = request.device.unwrap_or(0);
        let device = *devices.get(device_index).ok_or_else(|| {
            InteropError::DeviceUnavailable(format!(
                "device index {device_index} out of range ({} devices)",
                devices.len()
            ))
        })?;

        let mut builder = Context::builder();
        if request.platform.is_some() {
            builder.platform(platform.clone());
        }
        for property in &request.properties {
            builder.property(property_value(*property));
        }
        let context = builder
            .devices(device)
            .build()
            .map_err(|e| InteropError::DeviceUnavailable(e.to_string()))?;

        let queue = Queue::new(&context, device, None).map_err(driver_err)?;

        let platform_name = platform.name().unwrap_or_else(|_| "<unknown>".into());
        let device_name = device.name().unwrap_or_else(|_| "<unknown>".into());
        info!(platform = %platform_name, device = %device_name, "created GL-sharing OpenCL context");

        Ok(OclBackend {
            context,
            device,
            queue,
            platform_name,
            device_name,
        })
    }
}

/// A built OpenCL program.
pub struct OclProgram {
    program: Program,
}

/// OpenCL context, device and in-order queue sharing the current GL context.
pub struct OclBackend {
    context: Context,
    device: Device,
    queue: Queue,
    platform_name: String,
    device_name: String,
}

impl ComputeBackend for OclBackend {
    type Buffer = Buffer<Float2>;
    type SharedBuffer = Buffer<Float2>;
    type Program = OclProgram;

    fn describe(&self) -> String {
        format!("{} / {}", self.platform_name, self.device_name)
    }

    fn create_read_only_buffer(&mut self, points: &[Point]) -> Result<Buffer<Float2>, InteropError> {
        let host = to_float2(points);
        let buffer = Buffer::<Float2>::builder()
            .queue(self.queue.clone())
            .flags(MemFlags::new().read_only())
            .len(host.len())
            .copy_host_slice(&host)
            .build()
            .map_err(driver_err)?;
        debug!(len = host.len(), "created read-only compute buffer");
        Ok(buffer)
    }

    fn register_gl_buffer(
        &mut self,
        gl_buffer: GlBufferId,
        len: usize,
    ) -> Result<Buffer<Float2>, InteropError> {
        let shared =
            Buffer::<Float2>::from_gl_buffer(&self.queue, Some(MemFlags::new().read_write()), gl_buffer)
                .map_err(driver_err)?;
        if shared.len() != len {
            return Err(InteropError::Driver(format!(
                "GL buffer {gl_buffer} holds {} points, expected {len}",
                shared.len()
            )));
        }
        Ok(shared)
    }

    fn build_program(&mut self, source: &str) -> Result<OclProgram, InteropError> {
        let program = Program::builder()
            .src(source)
            .devices(self.device)
            .build(&self.context)
            .map_err(|e| InteropError::KernelCompile { log: e.to_string() })?;
        Ok(OclProgram { program })
    }

    fn enqueue_acquire(&mut self, shared: &Buffer<Float2>) -> Result<(), InteropError> {
        shared
            .cmd()
            .gl_acquire()
            .enq()
            .map_err(|e| InteropError::InteropAcquire(e.to_string()))
    }

    fn enqueue_release(&mut self, shared: &Buffer<Float2>) -> Result<(), InteropError> {
        shared
            .cmd()
            .gl_release()
            .enq()
            .map_err(|e| InteropError::InteropRelease(e.to_string()))
    }

    fn enqueue_kernel(
        &mut self,
        program: &OclProgram,
        kernel: &str,
        global_size: usize,
        input: &Buffer<Float2>,
        output: &Buffer<Float2>,
    ) -> Result<(), InteropError> {
        let kernel = Kernel::builder()
            .program(&program.program)
            .name(kernel)
            .queue(self.queue.clone())
            .global_work_size(global_size)
            .arg(input)
            .arg(output)
            .build()
            .map_err(driver_err)?;

        // SAFETY: both arguments are live buffers of `global_size` elements
        // and the kernel indexes them by global id only.
        unsafe { kernel.enq().map_err(driver_err) }
    }

    fn finish(&mut self) -> Result<(), InteropError> {
        self.queue.finish().map_err(driver_err)
    }
}
