//! # Noise Module
//!
//! Coherent noise used to synthesize terrain heightfields.
//!
//! A [`NoiseField`] is built once from [`NoiseSettings`] and materializes its
//! whole sample grid eagerly, so every later query is a plain array read.
//! Three generators are available:
//!
//! * **1D** - linear value noise between adjacent lattice values
//! * **2D** - octave-stacked, smoothstep-interpolated value noise, normalized to `[0, 1]`
//! * **3D** - octave-stacked classic Perlin gradient noise, left in its natural range
//!
//! The output is a pure function of the settings and the seed. Two fields
//! built from equal settings with the same seed hold bit-identical maps.

use cgmath::{InnerSpace, Vector3};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoxelError};

use lattice::PermutationTable;

pub mod lattice;

/// The generator used to fill a [`NoiseField`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NoiseMode {
    /// Linear value noise along a single axis.
    OneDimensional,
    /// Fractal value noise over a plane. This is the terrain mode.
    TwoDimensional,
    /// Fractal Perlin gradient noise over a volume.
    ThreeDimensional,
}

impl NoiseMode {
    /// Number of sample axes for this mode.
    pub fn dimensions(self) -> u32 {
        match self {
            NoiseMode::OneDimensional => 1,
            NoiseMode::TwoDimensional => 2,
            NoiseMode::ThreeDimensional => 3,
        }
    }
}

impl TryFrom<u32> for NoiseMode {
    type Error = VoxelError;

    fn try_from(dimensions: u32) -> Result<Self> {
        match dimensions {
            1 => Ok(NoiseMode::OneDimensional),
            2 => Ok(NoiseMode::TwoDimensional),
            3 => Ok(NoiseMode::ThreeDimensional),
            other => Err(VoxelError::InvalidNoiseMode(other)),
        }
    }
}

/// Construction parameters for a [`NoiseField`].
///
/// `dimensions` is kept as a raw number so that configuration files can name
/// any mode; it is validated when the field is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Number of sample axes, 1 to 3.
    pub dimensions: u32,
    /// Seed for the lattice tables. A random seed is drawn when absent.
    pub seed: Option<u32>,
    /// Samples along x.
    pub width: usize,
    /// Samples along y (the world z axis for terrain).
    pub height: usize,
    /// Samples along z, 3D only.
    pub depth: usize,
    /// Number of stacked layers in 2D and 3D modes.
    pub octave_count: u32,
    /// Lattice frequency of the first octave.
    pub base_frequency: f32,
    /// Frequency factor applied between consecutive octaves.
    pub frequency_multiplier: f32,
    /// Amplitude factor applied between consecutive octaves.
    pub amplitude_multiplier: f32,
    /// Scale from normalized noise to terrain height in blocks.
    pub height_scale: f32,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        NoiseSettings {
            dimensions: 2,
            seed: None,
            width: 96,
            height: 96,
            depth: 1,
            octave_count: 3,
            base_frequency: 0.03,
            frequency_multiplier: 1.8,
            amplitude_multiplier: 0.5,
            height_scale: 15.0,
        }
    }
}

/// Anything that can report a terrain column height.
///
/// Chunks are generated against this trait rather than against
/// [`NoiseField`] directly, so a world can be built from any heightfield.
pub trait HeightSource {
    /// Height in blocks of the column at world `(x, z)`.
    fn height_at(&self, x: usize, z: usize) -> f32;

    /// Horizontal sample extents `(x, z)` that `height_at` accepts.
    fn extents(&self) -> (usize, usize);
}

/// An immutable, fully materialized noise sample grid.
#[derive(Debug, Clone)]
pub struct NoiseField {
    seed: u32,
    mode: NoiseMode,
    width: usize,
    height: usize,
    depth: usize,
    octave_count: u32,
    base_frequency: f32,
    frequency_multiplier: f32,
    amplitude_multiplier: f32,
    height_scale: f32,
    permutation: PermutationTable,
    gradients: Option<Vec<Vector3<f32>>>,
    noise_map: Vec<f32>,
}

impl NoiseField {
    /// Builds the lattice tables and synthesizes the whole noise map.
    ///
    /// # Errors
    /// Returns [`VoxelError::InvalidNoiseMode`] for an unknown dimensionality and
    /// [`VoxelError::InvalidArgument`] for empty extents, a zero octave count,
    /// a non-positive amplitude multiplier, or octaves whose frequencies or
    /// amplitudes overflow `f32`. No partial field is returned.
    pub fn new(settings: &NoiseSettings) -> Result<Self> {
        let mode = NoiseMode::try_from(settings.dimensions)?;
        Self::validate(mode, settings)?;

        let seed = settings.seed.unwrap_or_else(|| fastrand::u32(..));
        debug!("Building {}D noise field with seed {}", mode.dimensions(), seed);

        let mut rng = fastrand::Rng::with_seed(u64::from(seed));
        let permutation = PermutationTable::new(&mut rng);
        let gradients = match mode {
            NoiseMode::ThreeDimensional => Some(lattice::random_gradients(&mut rng)),
            _ => None,
        };

        let (height, depth) = match mode {
            NoiseMode::OneDimensional => (1, 1),
            NoiseMode::TwoDimensional => (settings.height, 1),
            NoiseMode::ThreeDimensional => (settings.height, settings.depth),
        };

        let mut field = NoiseField {
            seed,
            mode,
            width: settings.width,
            height,
            depth,
            octave_count: settings.octave_count,
            base_frequency: settings.base_frequency,
            frequency_multiplier: settings.frequency_multiplier,
            amplitude_multiplier: settings.amplitude_multiplier,
            height_scale: settings.height_scale,
            permutation,
            gradients,
            noise_map: Vec::new(),
        };

        field.noise_map = match mode {
            NoiseMode::OneDimensional => field.synthesize_1d(),
            NoiseMode::TwoDimensional => field.synthesize_2d(),
            NoiseMode::ThreeDimensional => field.synthesize_3d(),
        };

        info!(
            "Synthesized {}D noise field {}x{}x{} ({} samples, seed {})",
            mode.dimensions(),
            field.width,
            field.height,
            field.depth,
            field.noise_map.len(),
            seed
        );

        Ok(field)
    }

    fn validate(mode: NoiseMode, settings: &NoiseSettings) -> Result<()> {
        if settings.width == 0 {
            return Err(VoxelError::InvalidArgument("noise width must be non-zero".into()));
        }
        if mode != NoiseMode::OneDimensional && settings.height == 0 {
            return Err(VoxelError::InvalidArgument("noise height must be non-zero".into()));
        }
        if mode == NoiseMode::ThreeDimensional && settings.depth == 0 {
            return Err(VoxelError::InvalidArgument("noise depth must be non-zero".into()));
        }
        if mode != NoiseMode::OneDimensional && settings.octave_count == 0 {
            return Err(VoxelError::InvalidArgument(
                "octave count must be at least 1".into(),
            ));
        }
        if mode == NoiseMode::TwoDimensional && settings.amplitude_multiplier <= 0.0 {
            return Err(VoxelError::InvalidArgument(format!(
                "amplitude multiplier must be positive, got {}",
                settings.amplitude_multiplier
            )));
        }
        if !settings.base_frequency.is_finite() || !settings.frequency_multiplier.is_finite() {
            return Err(VoxelError::InvalidArgument("frequencies must be finite".into()));
        }
        Self::validate_octaves(mode, settings)
    }

    /// Rejects octave progressions whose sample coordinates or summed
    /// amplitudes leave the finite `f32` range.
    fn validate_octaves(mode: NoiseMode, settings: &NoiseSettings) -> Result<()> {
        let (octave_count, largest_extent) = match mode {
            NoiseMode::OneDimensional => (1, settings.width),
            NoiseMode::TwoDimensional => (settings.octave_count, settings.width.max(settings.height)),
            NoiseMode::ThreeDimensional => (
                settings.octave_count,
                settings.width.max(settings.height).max(settings.depth),
            ),
        };
        let largest_coordinate = largest_extent.saturating_sub(1) as f32;

        let mut frequency = settings.base_frequency;
        let mut amplitude = 1.0_f32;
        let mut amplitude_total = 0.0_f32;
        for octave in 0..octave_count {
            if !frequency.is_finite() || !(largest_coordinate * frequency).is_finite() {
                return Err(VoxelError::InvalidArgument(format!(
                    "octave {octave} frequency {frequency} overflows the sample lattice"
                )));
            }
            amplitude_total += amplitude;
            if !amplitude_total.is_finite() {
                return Err(VoxelError::InvalidArgument(format!(
                    "octave {octave} amplitude {amplitude} overflows the noise sum"
                )));
            }
            frequency *= settings.frequency_multiplier;
            amplitude *= settings.amplitude_multiplier;
        }
        Ok(())
    }

    fn synthesize_1d(&self) -> Vec<f32> {
        (0..self.width)
            .map(|x| {
                let sample = x as f32 * self.base_frequency;
                let cell = sample.floor();
                let t = sample - cell;
                let cell = cell as i32;
                let a = PermutationTable::value(self.permutation.hash1(cell));
                let b = PermutationTable::value(self.permutation.hash1(cell.wrapping_add(1)));
                lerp(a, b, t)
            })
            .collect()
    }

    fn synthesize_2d(&self) -> Vec<f32> {
        let mut map = Vec::with_capacity(self.width * self.height);
        let mut max_value = 0.0_f32;

        for y in 0..self.height {
            for x in 0..self.width {
                let mut value = 0.0;
                let mut frequency = self.base_frequency;
                let mut amplitude = 1.0;
                for _ in 0..self.octave_count {
                    value += amplitude * self.value_noise_2d(x as f32 * frequency, y as f32 * frequency);
                    frequency *= self.frequency_multiplier;
                    amplitude *= self.amplitude_multiplier;
                }
                max_value = max_value.max(value);
                map.push(value);
            }
        }

        // All-zero maps stay all zero.
        if max_value > 0.0 {
            for value in &mut map {
                *value /= max_value;
            }
        }

        map
    }

    fn value_noise_2d(&self, x: f32, y: f32) -> f32 {
        let cell_x = x.floor();
        let cell_y = y.floor();
        let tx = smoothstep(x - cell_x);
        let ty = smoothstep(y - cell_y);
        let (xi, yi) = (cell_x as i32, cell_y as i32);

        let corner = |dx: i32, dy: i32| {
            PermutationTable::value(self.permutation.hash2(xi.wrapping_add(dx), yi.wrapping_add(dy)))
        };

        let bottom = lerp(corner(0, 0), corner(1, 0), tx);
        let top = lerp(corner(0, 1), corner(1, 1), tx);
        lerp(bottom, top, ty)
    }

    fn synthesize_3d(&self) -> Vec<f32> {
        let mut map = Vec::with_capacity(self.width * self.height * self.depth);

        for z in 0..self.depth {
            for y in 0..self.height {
                for x in 0..self.width {
                    let point = Vector3::new(x as f32, y as f32, z as f32);
                    let mut value = 0.0;
                    let mut frequency = self.base_frequency;
                    let mut amplitude = 1.0;
                    for _ in 0..self.octave_count {
                        value += amplitude * self.perlin_3d(point * frequency);
                        frequency *= self.frequency_multiplier;
                        amplitude *= self.amplitude_multiplier;
                    }
                    map.push(value);
                }
            }
        }

        map
    }

    fn perlin_3d(&self, point: Vector3<f32>) -> f32 {
        let gradients = match &self.gradients {
            Some(gradients) => gradients,
            None => unreachable!("gradient table is built for every 3D field"),
        };

        let cell = point.map(f32::floor);
        let offset = point - cell;
        let (xi, yi, zi) = (cell.x as i32, cell.y as i32, cell.z as i32);

        let corner = |dx: i32, dy: i32, dz: i32| {
            let gradient = gradients[self.permutation.hash3(
                xi.wrapping_add(dx),
                yi.wrapping_add(dy),
                zi.wrapping_add(dz),
            )];
            gradient.dot(offset - Vector3::new(dx as f32, dy as f32, dz as f32))
        };

        let u = smoothstep(offset.x);
        let v = smoothstep(offset.y);
        let w = smoothstep(offset.z);

        let x00 = lerp(corner(0, 0, 0), corner(1, 0, 0), u);
        let x10 = lerp(corner(0, 1, 0), corner(1, 1, 0), u);
        let x01 = lerp(corner(0, 0, 1), corner(1, 0, 1), u);
        let x11 = lerp(corner(0, 1, 1), corner(1, 1, 1), u);

        lerp(lerp(x00, x10, v), lerp(x01, x11, v), w)
    }

    /// Reads a 1D sample.
    ///
    /// # Panics
    /// Panics if `x` is outside the sample grid.
    pub fn noise_at_1d(&self, x: usize) -> f32 {
        assert!(x < self.width, "noise sample {x} outside width {}", self.width);
        self.noise_map[x]
    }

    /// Reads a 2D sample.
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the sample grid.
    pub fn noise_at(&self, x: usize, y: usize) -> f32 {
        assert!(
            x < self.width && y < self.height,
            "noise sample ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        self.noise_map[y * self.width + x]
    }

    /// Reads a 3D sample.
    ///
    /// # Panics
    /// Panics if `(x, y, z)` is outside the sample grid.
    pub fn noise_at_3d(&self, x: usize, y: usize, z: usize) -> f32 {
        assert!(
            x < self.width && y < self.height && z < self.depth,
            "noise sample ({x}, {y}, {z}) outside {}x{}x{} grid",
            self.width,
            self.height,
            self.depth
        );
        self.noise_map[(z * self.height + y) * self.width + x]
    }

    /// The seed the lattice tables were built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The generator that filled this field.
    pub fn mode(&self) -> NoiseMode {
        self.mode
    }

    /// Sample grid extents `(width, height, depth)`.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    /// Number of stacked octaves.
    pub fn octave_count(&self) -> u32 {
        self.octave_count
    }

    /// The dense sample array, x-fastest.
    pub fn noise_map(&self) -> &[f32] {
        &self.noise_map
    }
}

impl HeightSource for NoiseField {
    /// 1D fields extrude along z, 3D fields are sampled on their `y = 0` slice.
    fn height_at(&self, x: usize, z: usize) -> f32 {
        let sample = match self.mode {
            NoiseMode::OneDimensional => self.noise_at_1d(x),
            NoiseMode::TwoDimensional => self.noise_at(x, z),
            NoiseMode::ThreeDimensional => self.noise_at_3d(x, 0, z),
        };
        sample * self.height_scale
    }

    fn extents(&self) -> (usize, usize) {
        match self.mode {
            NoiseMode::OneDimensional => (self.width, usize::MAX),
            NoiseMode::TwoDimensional => (self.width, self.height),
            NoiseMode::ThreeDimensional => (self.width, self.depth),
        }
    }
}

/// `3t² - 2t³`
#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
