//! The fixed OpenCL program.
//!
//! Work item `i` copies `x` from the read-only input and writes
//! `AMPLITUDE * sin(FREQUENCY * x)` as `y` into the shared vertex buffer.

/// Entry point inside [`KERNEL_SOURCE`].
pub const KERNEL_NAME: &str = "sine_wave";

pub const AMPLITUDE: f32 = 0.5;
pub const FREQUENCY: f32 = 10.0;

pub const KERNEL_SOURCE: &str = r#"
__kernel void sine_wave(__global const float2* input, __global float2* vertices)
{
    size_t i = get_global_id(0);

    vertices[i].x = input[i].x;
    vertices[i].y = 0.5f * sin(10.0f * input[i].x);
}
"#;

/// Host-side value of the curve at `x`.
pub fn curve_y(x: f32) -> f32 {
    AMPLITUDE * (FREQUENCY * x).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_defines_entry_point() {
        assert!(KERNEL_SOURCE.contains(&format!("__kernel void {KERNEL_NAME}(")));
    }

    #[test]
    fn curve_matches_formula() {
        for x in [-1.0f32, -0.3, 0.0, 0.25, 1.0] {
            assert!((curve_y(x) - 0.5 * (10.0 * x).sin()).abs() < 1e-6);
        }
        assert_eq!(curve_y(0.0), 0.0);
    }
}
