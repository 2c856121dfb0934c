//! CPU stand-in for the GL and OpenCL drivers.
//!
//! Both mock backends share one [`MockGpu`], which holds vertex memory,
//! per-buffer ownership and an ordered log of every driver call.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{bail, Result};
use glcl_core::{InputDataset, Point, Projection, Viewport};
use glcl_plot::kernel::{curve_y, KERNEL_NAME};
use glcl_plot::{GraphicsBackend, PlotWidget};
use gpu_interop::{
    ComputeBackend, ComputeDriver, GlBufferId, GlShareHandles, InteropError, Ownership,
    PlatformInfo, PlatformPairedStrategy, SharingRequest, WindowSystem,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Platforms,
    CreateContext,
    CreateVertexBuffer(usize),
    GlFinish,
    GlFlush,
    ClearColor,
    Viewport(u32, u32),
    ReadOnlyBuffer(usize),
    Register(GlBufferId),
    BuildProgram,
    Acquire,
    Kernel(usize),
    Release,
    Finish,
    Draw(usize),
}

#[derive(Debug, Default, Clone)]
pub struct Faults {
    pub no_sharing_platform: bool,
    pub no_device: bool,
    pub no_gl_context: bool,
    pub compile_error: Option<String>,
    pub reject_acquire: bool,
    pub fail_kernel: bool,
    pub reject_release: bool,
}

#[derive(Debug, Default)]
pub struct MockGpu {
    pub faults: Faults,
    pub events: Vec<Event>,
    pub memory: HashMap<GlBufferId, Vec<[f32; 2]>>,
    pub ownership: HashMap<GlBufferId, Ownership>,
    pub clear_color: Option<[f32; 4]>,
    pub viewport: Option<Viewport>,
    next_id: GlBufferId,
}

impl MockGpu {
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Contents of the single vertex buffer created by the widget.
    pub fn vertices(&self) -> Vec<[f32; 2]> {
        assert_eq!(self.memory.len(), 1, "expected exactly one vertex buffer");
        self.memory.values().next().cloned().unwrap_or_default()
    }
}

pub type SharedGpu = Rc<RefCell<MockGpu>>;

pub fn shared_gpu(faults: Faults) -> SharedGpu {
    Rc::new(RefCell::new(MockGpu {
        faults,
        next_id: 1,
        ..MockGpu::default()
    }))
}

// ---------------------------------------------------------------------------
// Graphics side
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct MockVertexBuffer {
    pub id: GlBufferId,
}

pub struct MockGraphics {
    pub gpu: SharedGpu,
}

impl GraphicsBackend for MockGraphics {
    type VertexBuffer = MockVertexBuffer;

    fn share_handles(&self) -> Option<GlShareHandles> {
        if self.gpu.borrow().faults.no_gl_context {
            return None;
        }
        Some(GlShareHandles {
            window_system: WindowSystem::Glx,
            context: 0xc0,
            display: 0xd0,
            share_group: 0x5a,
        })
    }

    fn create_vertex_buffer(&mut self, count: usize) -> Result<MockVertexBuffer> {
        let mut gpu = self.gpu.borrow_mut();
        let id = gpu.next_id;
        gpu.next_id += 1;
        gpu.memory.insert(id, vec![[0.0, 0.0]; count]);
        gpu.ownership.insert(id, Ownership::GraphicsOwned);
        gpu.log(Event::CreateVertexBuffer(count));
        Ok(MockVertexBuffer { id })
    }

    fn vertex_buffer_id(&self, buffer: &MockVertexBuffer) -> GlBufferId {
        buffer.id
    }

    fn set_clear_color(&mut self, rgba: [f32; 4]) {
        let mut gpu = self.gpu.borrow_mut();
        gpu.clear_color = Some(rgba);
        gpu.log(Event::ClearColor);
    }

    fn set_viewport(&mut self, viewport: Viewport, _projection: &Projection) -> Result<()> {
        let mut gpu = self.gpu.borrow_mut();
        gpu.viewport = Some(viewport);
        gpu.log(Event::Viewport(viewport.width, viewport.height));
        Ok(())
    }

    fn finish(&mut self) {
        self.gpu.borrow_mut().log(Event::GlFinish);
    }

    fn flush(&mut self) {
        self.gpu.borrow_mut().log(Event::GlFlush);
    }

    fn draw_line_strip(&mut self, buffer: &MockVertexBuffer, count: usize, _color: [f32; 3]) -> Result<()> {
        let mut gpu = self.gpu.borrow_mut();
        let owner = gpu.ownership.get(&buffer.id).copied();
        assert_eq!(
            owner,
            Some(Ownership::GraphicsOwned),
            "draw issued while buffer {} is not graphics-owned",
            buffer.id
        );
        if gpu.memory[&buffer.id].len() < count {
            bail!("draw of {count} vertices overruns buffer {}", buffer.id);
        }
        gpu.log(Event::Draw(count));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Compute side
// ---------------------------------------------------------------------------

pub struct MockDriver {
    pub gpu: SharedGpu,
}

impl ComputeDriver for MockDriver {
    type Backend = MockBackend;

    fn platforms(&self) -> Result<Vec<PlatformInfo>, InteropError> {
        let mut gpu = self.gpu.borrow_mut();
        gpu.log(Event::Platforms);
        let mut platforms = vec![PlatformInfo::new(0, "Mock CPU", "cl_khr_icd")];
        if !gpu.faults.no_sharing_platform {
            platforms.push(PlatformInfo::new(
                1,
                "Mock GPU",
                "cl_khr_icd cl_khr_gl_sharing cl_APPLE_gl_sharing",
            ));
        }
        Ok(platforms)
    }

    fn create_shared_context(&self, request: &SharingRequest) -> Result<MockBackend, InteropError> {
        let mut gpu = self.gpu.borrow_mut();
        gpu.log(Event::CreateContext);
        if gpu.faults.no_device {
            return Err(InteropError::DeviceUnavailable("no GPU device on mock platform".into()));
        }
        assert!(!request.properties.is_empty(), "sharing request without GL properties");
        Ok(MockBackend {
            gpu: self.gpu.clone(),
        })
    }
}

pub struct MockBackend {
    pub gpu: SharedGpu,
}

impl ComputeBackend for MockBackend {
    type Buffer = Vec<Point>;
    type SharedBuffer = GlBufferId;
    type Program = String;

    fn describe(&self) -> String {
        "Mock GPU / mock device".into()
    }

    fn create_read_only_buffer(&mut self, points: &[Point]) -> Result<Vec<Point>, InteropError> {
        self.gpu.borrow_mut().log(Event::ReadOnlyBuffer(points.len()));
        Ok(points.to_vec())
    }

    fn register_gl_buffer(&mut self, gl_buffer: GlBufferId, len: usize) -> Result<GlBufferId, InteropError> {
        let mut gpu = self.gpu.borrow_mut();
        gpu.log(Event::Register(gl_buffer));
        match gpu.memory.get(&gl_buffer) {
            Some(mem) if mem.len() == len => Ok(gl_buffer),
            Some(mem) => Err(InteropError::Driver(format!(
                "buffer {gl_buffer} holds {} points, expected {len}",
                mem.len()
            ))),
            None => Err(InteropError::Driver(format!("no GL buffer {gl_buffer}"))),
        }
    }

    fn build_program(&mut self, source: &str) -> Result<String, InteropError> {
        let mut gpu = self.gpu.borrow_mut();
        gpu.log(Event::BuildProgram);
        if let Some(log) = gpu.faults.compile_error.clone() {
            return Err(InteropError::KernelCompile { log });
        }
        Ok(source.to_string())
    }

    fn enqueue_acquire(&mut self, shared: &GlBufferId) -> Result<(), InteropError> {
        let mut gpu = self.gpu.borrow_mut();
        gpu.log(Event::Acquire);
        if gpu.faults.reject_acquire {
            return Err(InteropError::InteropAcquire("CL_INVALID_GL_OBJECT".into()));
        }
        let owner = gpu.ownership.get_mut(shared).expect("acquire of unregistered buffer");
        owner.require(Ownership::GraphicsOwned)?;
        *owner = Ownership::ComputeOwned;
        Ok(())
    }

    fn enqueue_release(&mut self, shared: &GlBufferId) -> Result<(), InteropError> {
        let mut gpu = self.gpu.borrow_mut();
        gpu.log(Event::Release);
        if gpu.faults.reject_release {
            return Err(InteropError::InteropRelease("CL_OUT_OF_RESOURCES".into()));
        }
        let owner = gpu.ownership.get_mut(shared).expect("release of unregistered buffer");
        owner.require(Ownership::ComputeOwned)?;
        *owner = Ownership::GraphicsOwned;
        Ok(())
    }

    fn enqueue_kernel(
        &mut self,
        program: &String,
        kernel: &str,
        global_size: usize,
        input: &Vec<Point>,
        output: &GlBufferId,
    ) -> Result<(), InteropError> {
        let mut gpu = self.gpu.borrow_mut();
        gpu.log(Event::Kernel(global_size));
        if gpu.faults.fail_kernel {
            return Err(InteropError::Driver("CL_OUT_OF_RESOURCES".into()));
        }
        assert_eq!(kernel, KERNEL_NAME);
        assert!(program.contains(kernel));
        assert_eq!(
            gpu.ownership.get(output),
            Some(&Ownership::ComputeOwned),
            "kernel wrote a buffer it does not own"
        );
        let memory = gpu.memory.get_mut(output).expect("kernel output not registered");
        for i in 0..global_size {
            let x = input[i].x;
            memory[i] = [x, curve_y(x)];
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), InteropError> {
        self.gpu.borrow_mut().log(Event::Finish);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub type MockWidget = PlotWidget<MockGraphics, MockDriver>;

pub fn widget_with(dataset: InputDataset, faults: Faults) -> (MockWidget, SharedGpu) {
    let gpu = shared_gpu(faults);
    let widget = PlotWidget::new(
        MockGraphics { gpu: gpu.clone() },
        MockDriver { gpu: gpu.clone() },
        Box::new(PlatformPairedStrategy::default()),
        dataset,
    );
    (widget, gpu)
}

pub fn widget(count: usize) -> (MockWidget, SharedGpu) {
    let dataset = InputDataset::linspace(count).expect("non-empty dataset");
    widget_with(dataset, Faults::default())
}
