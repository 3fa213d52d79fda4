//! Phong lighting system with a fixed-capacity light registry
//!
//! The registry holds up to [`MAX_LIGHT_SOURCES`] lights; a light's index in
//! the backing sequence is also its uniform-array slot in the fragment
//! shader. Every mutation immediately re-uploads the affected slots and the
//! enabled-count uniform, so the registry and the shader's uniform state
//! always agree and nothing needs re-uploading per frame — static lights
//! persist across frames at zero cost.
//!
//! Removal is swap-remove: the last light moves into the vacated index (its
//! visible slot changes), the old top slot is reset to the default record,
//! and the count shrinks by one. Shader-side code only depends on the count
//! and per-slot fields, never on persistent light identity, so the slot move
//! is safe.
//!
//! ## Uniform naming contract
//!
//! The names written here are the wire format between host code and the
//! shader text and must match `resources/shaders/basic_lighting.frag`
//! exactly: `lightSources[<index>].<field>` per light,
//! `enabledLightSourceCount` for the active count, plus `material.<field>`,
//! `view`, `projection`, `viewPos`, and `model`.

use crate::foundation::math::{Mat4, Vec3};
use crate::render::camera::FlyCamera;
use crate::render::shader::{ShaderProgram, ShaderResult, UniformSink};
use std::path::Path;

/// Maximum number of simultaneously enabled light sources
///
/// Must match the array size in the fragment shader.
pub const MAX_LIGHT_SOURCES: usize = 8;

/// Uniform name of the active light count
const ENABLED_COUNT_UNIFORM: &str = "enabledLightSourceCount";

/// A single light source descriptor
///
/// A plain value record with no identity beyond its registry index. A
/// directional light uses only `direction` and the three color terms; point
/// and spot lights additionally use `position`, the attenuation
/// coefficients, and the spot cutoff angle (180° means "no cutoff", i.e. a
/// point light).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    /// Directional lights are parallel rays with no position or attenuation
    pub is_directional: bool,
    /// World-space position (point/spot lights only)
    pub position: Vec3,
    /// Light direction
    pub direction: Vec3,
    /// Constant attenuation coefficient
    pub constant: f32,
    /// Linear attenuation coefficient
    pub linear: f32,
    /// Quadratic attenuation coefficient
    pub quadratic: f32,
    /// Spot cone cutoff angle in degrees; 180 disables the cone
    pub spot_cutoff_degrees: f32,
    /// Ambient color contribution
    pub ambient: Vec3,
    /// Diffuse color contribution
    pub diffuse: Vec3,
    /// Specular color contribution
    pub specular: Vec3,
}

impl Default for LightSource {
    fn default() -> Self {
        Self {
            is_directional: false,
            position: Vec3::zeros(),
            direction: Vec3::zeros(),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            spot_cutoff_degrees: 180.0,
            ambient: Vec3::zeros(),
            diffuse: Vec3::zeros(),
            specular: Vec3::zeros(),
        }
    }
}

/// Fixed-capacity registry of light sources
///
/// Mutation methods take a [`UniformSink`] and push the resulting uniform
/// state through it immediately; there is no dirty or deferred state.
/// Boundary violations (full registry, out-of-range index) are logged and
/// leave both the registry and the sink untouched.
#[derive(Debug, Default)]
pub struct LightRegistry {
    lights: Vec<LightSource>,
}

impl LightRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of enabled lights
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Whether the registry holds no lights
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Append a light and upload its slot
    ///
    /// Warns and no-ops when the registry already holds
    /// [`MAX_LIGHT_SOURCES`] lights. On success the new slot's full uniform
    /// state and the enabled-count uniform are written.
    pub fn add(&mut self, sink: &mut impl UniformSink, light: LightSource) -> bool {
        if self.lights.len() == MAX_LIGHT_SOURCES {
            log::warn!("light registry is full (max {MAX_LIGHT_SOURCES}), add ignored");
            return false;
        }

        self.lights.push(light);
        write_light(sink, self.lights.len() - 1, &light);
        sink.set_i32(ENABLED_COUNT_UNIFORM, self.lights.len() as i32);
        true
    }

    /// Replace the light at `index` and re-upload its slot
    ///
    /// The valid range is `[0, MAX_LIGHT_SOURCES)` rather than
    /// `[0, len)`: removal resets the vacated slot at `index == len`, which
    /// must be writable even though no light is stored there. When `index`
    /// addresses a stored light, the registry record is replaced so registry
    /// and shader state stay in agreement.
    ///
    /// Direction, the three color terms, and the directional flag are always
    /// written; position, attenuation, and spot cutoff only for
    /// non-directional lights. The enabled-count uniform is always
    /// re-written, keeping the shader self-consistent after any edit.
    pub fn edit(&mut self, sink: &mut impl UniformSink, index: usize, light: LightSource) -> bool {
        if index >= MAX_LIGHT_SOURCES {
            log::error!(
                "light index {index} outside the valid range 0..{MAX_LIGHT_SOURCES}, edit ignored"
            );
            return false;
        }

        if index < self.lights.len() {
            self.lights[index] = light;
        }
        write_light(sink, index, &light);
        sink.set_i32(ENABLED_COUNT_UNIFORM, self.lights.len() as i32);
        true
    }

    /// Remove the light at `index` by swap-remove
    ///
    /// The last light moves into `index` (changing its visible slot), the
    /// vacated top slot is reset to the default record, the moved light is
    /// re-uploaded at its new slot, and the enabled-count uniform shrinks.
    /// Removing the sole light, or the current last light, degenerates to a
    /// plain shrink plus slot reset.
    pub fn remove(&mut self, sink: &mut impl UniformSink, index: usize) -> bool {
        if index >= self.lights.len() {
            log::error!(
                "light index {index} outside the enabled range 0..{}, remove ignored",
                self.lights.len()
            );
            return false;
        }

        let top = self.lights.len() - 1;
        self.lights.swap_remove(index);

        write_light(sink, top, &LightSource::default());
        if index < self.lights.len() {
            write_light(sink, index, &self.lights[index]);
        }
        sink.set_i32(ENABLED_COUNT_UNIFORM, self.lights.len() as i32);
        true
    }

    /// Borrow the light at `index`
    ///
    /// Logs an error and returns `None` when `index` is outside `[0, len)`.
    pub fn get(&self, index: usize) -> Option<&LightSource> {
        if index >= self.lights.len() {
            log::error!(
                "light index {index} outside the enabled range 0..{}",
                self.lights.len()
            );
            return None;
        }
        Some(&self.lights[index])
    }

    /// Mutably borrow the light at `index`
    ///
    /// Changes made through this reference are not uploaded; call
    /// [`LightRegistry::edit`] to push a modified record to the shader.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut LightSource> {
        if index >= self.lights.len() {
            log::error!(
                "light index {index} outside the enabled range 0..{}",
                self.lights.len()
            );
            return None;
        }
        Some(&mut self.lights[index])
    }
}

/// Format the uniform name for one field of one light slot
fn slot_uniform(slot: usize, field: &str) -> String {
    format!("lightSources[{slot}].{field}")
}

/// Push the full uniform state of one light into its slot
///
/// Positional and attenuation fields are skipped for directional lights;
/// they are meaningless for parallel rays and the shader never reads them
/// when the directional flag is set.
fn write_light(sink: &mut impl UniformSink, slot: usize, light: &LightSource) {
    sink.set_vec3(&slot_uniform(slot, "direction"), light.direction);
    sink.set_vec3(&slot_uniform(slot, "ambient"), light.ambient);
    sink.set_vec3(&slot_uniform(slot, "diffuse"), light.diffuse);
    sink.set_vec3(&slot_uniform(slot, "specular"), light.specular);

    if light.is_directional {
        sink.set_bool(&slot_uniform(slot, "isDirLight"), true);
    } else {
        sink.set_bool(&slot_uniform(slot, "isDirLight"), false);
        sink.set_vec3(&slot_uniform(slot, "position"), light.position);
        sink.set_f32(&slot_uniform(slot, "constant"), light.constant);
        sink.set_f32(&slot_uniform(slot, "linear"), light.linear);
        sink.set_f32(&slot_uniform(slot, "quadratic"), light.quadratic);
        sink.set_f32(&slot_uniform(slot, "spotCutoff"), light.spot_cutoff_degrees);
    }
}

/// The Phong lighting pipeline: shader program plus light registry
///
/// Owns the basic-lighting shader pair and forwards registry mutations with
/// the program bound, so every mutation lands in the right program's uniform
/// state.
///
/// ## Bind-frame contract
///
/// Each frame the driver calls [`LightingSystem::begin_frame`] (activates
/// the program, uploads `view`, `projection`, and `viewPos`) and
/// [`LightingSystem::set_model_matrix`] per drawn object. Light uniforms are
/// not touched per frame.
pub struct LightingSystem {
    shader: ShaderProgram,
    registry: LightRegistry,
}

impl LightingSystem {
    /// Load the lighting shader pair and initialize material bindings
    ///
    /// Binds `material.diffuse` to texture unit 0, `material.specular` to
    /// unit 1, and sets the default shininess of 32.
    ///
    /// # Errors
    /// Propagates any [`crate::render::ShaderError`] from reading, compiling,
    /// or linking the shader pair.
    pub fn new<P: AsRef<Path>>(
        gl: &glow::Context,
        vertex_path: P,
        fragment_path: P,
    ) -> ShaderResult<Self> {
        let shader = ShaderProgram::from_files(gl, vertex_path, fragment_path)?;

        shader.activate(gl);
        shader.set_i32(gl, "material.diffuse", 0);
        shader.set_i32(gl, "material.specular", 1);
        shader.set_f32(gl, "material.shininess", 32.0);

        Ok(Self {
            shader,
            registry: LightRegistry::new(),
        })
    }

    /// Activate the program and upload the per-frame camera uniforms
    pub fn begin_frame(&self, gl: &glow::Context, camera: &FlyCamera, projection: &Mat4) {
        self.shader.activate(gl);
        self.shader.set_mat4(gl, "view", &camera.view_matrix());
        self.shader.set_mat4(gl, "projection", projection);
        self.shader.set_vec3(gl, "viewPos", camera.eye_position());
    }

    /// Upload the model matrix for the next draw call
    pub fn set_model_matrix(&self, gl: &glow::Context, model: &Mat4) {
        self.shader.set_mat4(gl, "model", model);
    }

    /// Append a light; see [`LightRegistry::add`]
    pub fn add_light(&mut self, gl: &glow::Context, light: LightSource) -> bool {
        let mut sink = self.shader.bind(gl);
        self.registry.add(&mut sink, light)
    }

    /// Replace a light; see [`LightRegistry::edit`]
    pub fn edit_light(&mut self, gl: &glow::Context, index: usize, light: LightSource) -> bool {
        let mut sink = self.shader.bind(gl);
        self.registry.edit(&mut sink, index, light)
    }

    /// Remove a light; see [`LightRegistry::remove`]
    pub fn remove_light(&mut self, gl: &glow::Context, index: usize) -> bool {
        let mut sink = self.shader.bind(gl);
        self.registry.remove(&mut sink, index)
    }

    /// Borrow the light at `index`; see [`LightRegistry::get`]
    pub fn light(&self, index: usize) -> Option<&LightSource> {
        self.registry.get(index)
    }

    /// Number of enabled lights
    pub fn light_count(&self) -> usize {
        self.registry.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every uniform write so tests can assert on the wire format
    #[derive(Debug, Default)]
    struct RecordingSink {
        writes: Vec<(String, Recorded)>,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Recorded {
        Bool(bool),
        I32(i32),
        F32(f32),
        Vec3([f32; 3]),
        Mat4,
    }

    impl UniformSink for RecordingSink {
        fn set_bool(&mut self, name: &str, value: bool) {
            self.writes.push((name.to_string(), Recorded::Bool(value)));
        }
        fn set_i32(&mut self, name: &str, value: i32) {
            self.writes.push((name.to_string(), Recorded::I32(value)));
        }
        fn set_f32(&mut self, name: &str, value: f32) {
            self.writes.push((name.to_string(), Recorded::F32(value)));
        }
        fn set_vec3(&mut self, name: &str, value: Vec3) {
            self.writes
                .push((name.to_string(), Recorded::Vec3([value.x, value.y, value.z])));
        }
        fn set_mat4(&mut self, name: &str, _value: &Mat4) {
            self.writes.push((name.to_string(), Recorded::Mat4));
        }
    }

    impl RecordingSink {
        /// Most recent value written under `name`
        fn last(&self, name: &str) -> Option<Recorded> {
            self.writes
                .iter()
                .rev()
                .find(|(n, _)| n == name)
                .map(|(_, v)| *v)
        }

        fn wrote(&self, name: &str) -> bool {
            self.writes.iter().any(|(n, _)| n == name)
        }

        fn clear(&mut self) {
            self.writes.clear();
        }
    }

    fn point_light(x: f32) -> LightSource {
        LightSource {
            position: Vec3::new(x, 1.0, 1.0),
            direction: Vec3::new(0.0, -1.0, 0.0),
            ambient: Vec3::new(0.2, 0.2, 0.2),
            diffuse: Vec3::new(1.0, 0.0, 0.0),
            specular: Vec3::new(1.0, 1.0, 1.0),
            ..LightSource::default()
        }
    }

    fn directional_light() -> LightSource {
        LightSource {
            is_directional: true,
            direction: Vec3::new(0.0, -1.0, 0.0),
            ambient: Vec3::new(0.2, 0.2, 0.2),
            diffuse: Vec3::new(1.0, 1.0, 1.0),
            specular: Vec3::new(1.0, 1.0, 1.0),
            ..LightSource::default()
        }
    }

    #[test]
    fn test_add_up_to_capacity_then_reject() {
        let mut registry = LightRegistry::new();
        let mut sink = RecordingSink::default();

        for i in 0..MAX_LIGHT_SOURCES {
            assert!(registry.add(&mut sink, point_light(i as f32)));
        }
        assert_eq!(registry.len(), MAX_LIGHT_SOURCES);

        sink.clear();
        assert!(!registry.add(&mut sink, point_light(99.0)));
        assert_eq!(registry.len(), MAX_LIGHT_SOURCES);
        assert!(sink.writes.is_empty(), "rejected add must not touch the shader");
    }

    #[test]
    fn test_enabled_count_tracks_registry_size() {
        let mut registry = LightRegistry::new();
        let mut sink = RecordingSink::default();

        for i in 0..3 {
            registry.add(&mut sink, point_light(i as f32));
            assert_eq!(
                sink.last("enabledLightSourceCount"),
                Some(Recorded::I32(i + 1))
            );
        }
    }

    #[test]
    fn test_directional_edit_skips_positional_fields() {
        let mut registry = LightRegistry::new();
        let mut sink = RecordingSink::default();
        registry.add(&mut sink, directional_light());

        sink.clear();
        registry.edit(&mut sink, 0, directional_light());

        assert_eq!(
            sink.last("lightSources[0].isDirLight"),
            Some(Recorded::Bool(true))
        );
        assert!(sink.wrote("lightSources[0].direction"));
        assert!(sink.wrote("lightSources[0].ambient"));
        assert!(sink.wrote("lightSources[0].diffuse"));
        assert!(sink.wrote("lightSources[0].specular"));
        assert!(!sink.wrote("lightSources[0].position"));
        assert!(!sink.wrote("lightSources[0].constant"));
        assert!(!sink.wrote("lightSources[0].linear"));
        assert!(!sink.wrote("lightSources[0].quadratic"));
        assert!(!sink.wrote("lightSources[0].spotCutoff"));
    }

    #[test]
    fn test_point_edit_uploads_all_fields() {
        let mut registry = LightRegistry::new();
        let mut sink = RecordingSink::default();
        registry.add(&mut sink, point_light(0.0));

        sink.clear();
        registry.edit(&mut sink, 0, point_light(5.0));

        assert_eq!(
            sink.last("lightSources[0].isDirLight"),
            Some(Recorded::Bool(false))
        );
        assert_eq!(
            sink.last("lightSources[0].position"),
            Some(Recorded::Vec3([5.0, 1.0, 1.0]))
        );
        assert_eq!(
            sink.last("lightSources[0].constant"),
            Some(Recorded::F32(1.0))
        );
        assert_eq!(
            sink.last("lightSources[0].linear"),
            Some(Recorded::F32(0.09))
        );
        assert_eq!(
            sink.last("lightSources[0].quadratic"),
            Some(Recorded::F32(0.032))
        );
        assert_eq!(
            sink.last("lightSources[0].spotCutoff"),
            Some(Recorded::F32(180.0))
        );
    }

    #[test]
    fn test_edit_replaces_stored_record() {
        let mut registry = LightRegistry::new();
        let mut sink = RecordingSink::default();
        registry.add(&mut sink, point_light(0.0));

        let replacement = point_light(7.0);
        registry.edit(&mut sink, 0, replacement);
        assert_eq!(registry.get(0), Some(&replacement));
    }

    #[test]
    fn test_remove_sole_light_resets_slot_zero() {
        let mut registry = LightRegistry::new();
        let mut sink = RecordingSink::default();
        registry.add(&mut sink, point_light(0.0));

        sink.clear();
        assert!(registry.remove(&mut sink, 0));

        assert!(registry.is_empty());
        assert_eq!(
            sink.last("enabledLightSourceCount"),
            Some(Recorded::I32(0))
        );
        // Slot 0 now holds the default record: zero vectors, default scalars
        assert_eq!(
            sink.last("lightSources[0].diffuse"),
            Some(Recorded::Vec3([0.0, 0.0, 0.0]))
        );
        assert_eq!(
            sink.last("lightSources[0].constant"),
            Some(Recorded::F32(1.0))
        );
    }

    #[test]
    fn test_remove_middle_swaps_last_into_slot() {
        let mut registry = LightRegistry::new();
        let mut sink = RecordingSink::default();
        for i in 0..4 {
            registry.add(&mut sink, point_light(i as f32));
        }

        sink.clear();
        assert!(registry.remove(&mut sink, 1));

        // The old last element (x=3) now lives at index 1
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(1), Some(&point_light(3.0)));
        assert_eq!(
            sink.last("lightSources[1].position"),
            Some(Recorded::Vec3([3.0, 1.0, 1.0]))
        );
        // The vacated top slot (3) holds the default record
        assert_eq!(
            sink.last("lightSources[3].diffuse"),
            Some(Recorded::Vec3([0.0, 0.0, 0.0]))
        );
        assert_eq!(
            sink.last("enabledLightSourceCount"),
            Some(Recorded::I32(3))
        );
    }

    #[test]
    fn test_remove_current_last_element() {
        // Regression: removing the last enabled light of a partially full
        // registry must shrink cleanly instead of indexing past the end.
        let mut registry = LightRegistry::new();
        let mut sink = RecordingSink::default();
        for i in 0..3 {
            registry.add(&mut sink, point_light(i as f32));
        }

        sink.clear();
        assert!(registry.remove(&mut sink, 2));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0), Some(&point_light(0.0)));
        assert_eq!(registry.get(1), Some(&point_light(1.0)));
        assert_eq!(
            sink.last("lightSources[2].diffuse"),
            Some(Recorded::Vec3([0.0, 0.0, 0.0]))
        );
        assert_eq!(
            sink.last("enabledLightSourceCount"),
            Some(Recorded::I32(2))
        );
    }

    #[test]
    fn test_add_then_get_roundtrips_all_fields() {
        let mut registry = LightRegistry::new();
        let mut sink = RecordingSink::default();

        let light = LightSource {
            is_directional: false,
            position: Vec3::new(1.0, 2.0, 3.0),
            direction: Vec3::new(0.0, -1.0, 0.5),
            constant: 0.9,
            linear: 0.1,
            quadratic: 0.05,
            spot_cutoff_degrees: 25.0,
            ambient: Vec3::new(0.1, 0.1, 0.1),
            diffuse: Vec3::new(0.8, 0.4, 0.2),
            specular: Vec3::new(1.0, 1.0, 1.0),
        };
        registry.add(&mut sink, light);
        assert_eq!(registry.get(0), Some(&light));
    }

    #[test]
    fn test_out_of_range_indices_leave_state_untouched() {
        let mut registry = LightRegistry::new();
        let mut sink = RecordingSink::default();
        registry.add(&mut sink, point_light(0.0));

        sink.clear();
        assert!(!registry.remove(&mut sink, 1));
        assert!(!registry.edit(&mut sink, MAX_LIGHT_SOURCES, point_light(9.0)));
        assert!(registry.get(1).is_none());
        assert!(registry.get_mut(5).is_none());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0), Some(&point_light(0.0)));
        assert!(sink.writes.is_empty(), "rejected calls must not touch the shader");
    }

    #[test]
    fn test_edit_accepts_vacant_slot_below_capacity() {
        // Removal relies on resetting the slot just above the current count;
        // edit therefore accepts the full [0, MAX) range.
        let mut registry = LightRegistry::new();
        let mut sink = RecordingSink::default();
        registry.add(&mut sink, point_light(0.0));

        sink.clear();
        assert!(registry.edit(&mut sink, 1, LightSource::default()));
        assert_eq!(registry.len(), 1, "no record is stored in a vacant slot");
        assert!(sink.wrote("lightSources[1].diffuse"));
    }

    #[test]
    fn test_default_light_source_attenuation() {
        let light = LightSource::default();
        assert!((light.constant - 1.0).abs() < f32::EPSILON);
        assert!((light.linear - 0.09).abs() < f32::EPSILON);
        assert!((light.quadratic - 0.032).abs() < f32::EPSILON);
        assert!((light.spot_cutoff_degrees - 180.0).abs() < f32::EPSILON);
        assert!(!light.is_directional);
    }

    #[test]
    fn test_slot_uniform_naming_contract() {
        assert_eq!(slot_uniform(0, "position"), "lightSources[0].position");
        assert_eq!(slot_uniform(7, "isDirLight"), "lightSources[7].isDirLight");
    }
}
