//! Point pipeline shader.
//!
//! WGSL source for both stages, embedded so the pipeline needs no asset
//! lookup at startup.
//!
//! ## Binding contract
//!
//! ```text
//! vertex buffer 0    : tightly packed float32x3 positions
//! group 0, binding 0 : frame transform (mat4x4<f32>), slot 1
//! group 1, binding 0 : cursor position in NDC (vec2<f32> + pad), slot 2
//! ```
//!
//! The vertex stage emits clip-space position plus a point-size factor,
//! boosted near the cursor. The point-list topology rasterizes single
//! pixels, so the size factor is folded into the fragment intensity
//! instead of a raster width. The fragment stage reads the cursor to
//! modulate color and alpha; the pipeline blends source-alpha over
//! destination on both color and alpha.

/// Vertex stage entry point.
pub const VS_ENTRY: &str = "vs_main";

/// Fragment stage entry point.
pub const FS_ENTRY: &str = "fs_main";

/// WGSL source for the point pipeline.
pub const POINTS_WGSL: &str = r#"
struct FrameUniforms {
    transform: mat4x4<f32>,
}

struct CursorUniform {
    position: vec2<f32>,
    pad: vec2<f32>,
}

@group(0) @binding(0) var<uniform> frame: FrameUniforms;
@group(1) @binding(0) var<uniform> cursor: CursorUniform;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) intensity: f32,
}

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = frame.transform * vec4<f32>(position, 1.0);

    // Perspective point size; one raster pixel, so it becomes intensity.
    let size = clamp(3.0 / max(out.clip_position.w, 0.1), 0.2, 3.0);

    // Points near the cursor glow brighter.
    let ndc = out.clip_position.xy / max(out.clip_position.w, 0.1);
    let glow = 1.0 - 0.5 * clamp(length(ndc - cursor.position), 0.0, 1.0);

    out.intensity = (size / 3.0) * (0.5 + 0.5 * glow);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // Shift hue with cursor x, lift brightness with cursor y.
    let warmth = 0.5 + 0.5 * cursor.position.x;
    let lift = 0.7 + 0.3 * cursor.position.y;
    let tint = vec3<f32>(
        0.55 + 0.45 * warmth,
        0.75,
        1.0 - 0.45 * warmth,
    );
    let alpha = in.intensity * lift;
    return vec4<f32>(tint * alpha, alpha);
}
"#;
