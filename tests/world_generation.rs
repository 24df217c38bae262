use cgmath::Point3;
use voxel_terrain::engine_state::voxels::block::material_type::MaterialType;
use voxel_terrain::engine_state::voxels::chunk::{CHUNK_DIMENSION, CHUNK_VOLUME};
use voxel_terrain::engine_state::voxels::noise::{HeightSource, NoiseField, NoiseSettings};
use voxel_terrain::engine_state::voxels::world::World;
use voxel_terrain::error::VoxelError;

fn seeded_settings(seed: u32) -> NoiseSettings {
    NoiseSettings {
        dimensions: 2,
        seed: Some(seed),
        width: 96,
        height: 96,
        octave_count: 3,
        base_frequency: 0.03,
        frequency_multiplier: 1.8,
        amplitude_multiplier: 0.5,
        ..NoiseSettings::default()
    }
}

/// Heights that rise by one block every two columns along x.
struct Ramp;

impl HeightSource for Ramp {
    fn height_at(&self, x: usize, _z: usize) -> f32 {
        x as f32 / 2.0
    }

    fn extents(&self) -> (usize, usize) {
        (64, 64)
    }
}

#[test]
fn test_same_seed_same_world() {
    let first = NoiseField::new(&seeded_settings(42)).unwrap();
    let second = NoiseField::new(&seeded_settings(42)).unwrap();
    assert_eq!(first.noise_map(), second.noise_map());

    let first_world = World::new(&first, 6).unwrap();
    let second_world = World::new(&second, 6).unwrap();
    assert_eq!(first_world.terrain_buffer(), second_world.terrain_buffer());
    assert_eq!(first_world.origin(), second_world.origin());
}

/// FNV-1a over the packed words, independent of host byte order.
fn terrain_checksum(words: &[u32]) -> u64 {
    words.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &word| {
        (hash ^ u64::from(word)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

#[test]
fn test_seed_42_matches_recorded_output() {
    let field = NoiseField::new(&seeded_settings(42)).unwrap();
    let map = field.noise_map();

    let recorded = [
        (0, 0.235_739_5),
        (1, 0.241_773_66),
        (95, 0.715_959_7),
        (96, 0.236_082_32),
        (1000, 0.832_171_7),
        (4660, 0.501_171_8),
        (9215, 0.561_503_05),
    ];
    for (index, expected) in recorded {
        assert!(
            (map[index] - expected).abs() < 1.0e-6,
            "noise_map[{index}] = {}, recorded {expected}",
            map[index]
        );
    }
    assert_eq!(map[36], 1.0);

    let world = World::new(&field, 6).unwrap();
    assert_eq!(terrain_checksum(world.terrain_buffer()), 0x3091_ad79_09d4_f988);
    assert!((world.origin().y - 9.051_114).abs() < 1.0e-5);
    let solid: usize = world.chunks().iter().map(|chunk| chunk.solid_block_count()).sum();
    assert_eq!(solid, 84_803);
}

#[test]
fn test_different_seeds_differ() {
    let first = NoiseField::new(&seeded_settings(42)).unwrap();
    let second = NoiseField::new(&seeded_settings(43)).unwrap();
    assert_ne!(first.noise_map(), second.noise_map());
}

#[test]
fn test_two_dimensional_map_is_normalized() {
    let field = NoiseField::new(&seeded_settings(42)).unwrap();
    let map = field.noise_map();

    assert_eq!(map.len(), 96 * 96);
    assert!(map.iter().all(|value| (0.0..=1.0).contains(value)));
    let max = map.iter().copied().fold(f32::MIN, f32::max);
    assert!((max - 1.0).abs() < 1e-6);
}

#[test]
fn test_terrain_buffer_covers_every_chunk() {
    let field = NoiseField::new(&seeded_settings(7)).unwrap();
    let world = World::new(&field, 6).unwrap();

    assert_eq!(world.chunk_count(), 36);
    assert_eq!(world.terrain_buffer().len(), 36 * CHUNK_VOLUME);
    assert!(world.chunks().iter().all(|chunk| chunk.is_active()));
}

#[test]
fn test_surface_follows_heightfield() {
    let field = NoiseField::new(&seeded_settings(42)).unwrap();
    let world = World::new(&field, 6).unwrap();
    let extent = 6 * CHUNK_DIMENSION;

    for z in (0..extent).step_by(5) {
        for x in (0..extent).step_by(3) {
            let expected = field.height_at(x, z).floor().clamp(0.0, 15.0) as usize;
            let column = |y: usize| world.get_block(Point3::new(x as f32 + 0.5, y as f32, z as f32 + 0.5));

            assert_eq!(column(expected).material(), MaterialType::Grass, "column ({x}, {z})");
            if expected > 0 {
                assert_eq!(column(expected - 1).material(), MaterialType::Dirt);
            }
            if expected < CHUNK_DIMENSION - 1 {
                assert!(column(expected + 1).is_air());
            }
        }
    }
}

#[test]
fn test_origin_sits_above_center_column() {
    let field = NoiseField::new(&seeded_settings(42)).unwrap();
    let world = World::new(&field, 6).unwrap();
    let origin = world.origin();

    assert_eq!(origin.x, 48.0);
    assert_eq!(origin.z, 48.0);
    assert_eq!(origin.y, field.height_at(48, 48) + 1.0);
}

#[test]
fn test_first_chunk_column_from_custom_heights() {
    let world = World::new(&Ramp, 4).unwrap();
    let chunk = world.get_chunk(0, 0, 0);

    // Column x = 11 has height 5.5, so grass at 5 over five dirt blocks.
    for y in 0..5 {
        assert_eq!(chunk.get_block(11, y, 0).material(), MaterialType::Dirt);
    }
    assert_eq!(chunk.get_block(11, 5, 0).material(), MaterialType::Grass);
    for y in 6..CHUNK_DIMENSION {
        assert!(chunk.get_block(11, y, 0).is_air());
    }

    // Beyond x = 30 the ramp is clamped to the top layer.
    let far = world.get_chunk(3, 0, 2);
    assert_eq!(far.get_block(0, 15, 0).material(), MaterialType::Grass);
    assert_eq!(world.origin(), Point3::new(32.0, 17.0, 32.0));
}

#[test]
fn test_other_noise_modes_drive_worlds() {
    let line = NoiseField::new(&NoiseSettings {
        dimensions: 1,
        ..seeded_settings(3)
    })
    .unwrap();
    let world = World::new(&line, 2).unwrap();
    for x in 0..32 {
        let expected = line.height_at(x, 0).floor().clamp(0.0, 15.0);
        let block = world.get_block(Point3::new(x as f32, expected, 31.0));
        assert_eq!(block.material(), MaterialType::Grass);
    }

    let volume = NoiseField::new(&NoiseSettings {
        dimensions: 3,
        width: 32,
        height: 4,
        depth: 32,
        ..seeded_settings(3)
    })
    .unwrap();
    assert_eq!(volume.noise_map().len(), 32 * 4 * 32);
    assert_eq!(World::new(&volume, 2).unwrap().chunk_count(), 4);
}

#[test]
fn test_invalid_configurations_are_rejected() {
    let bad_mode = NoiseField::new(&NoiseSettings {
        dimensions: 4,
        ..seeded_settings(1)
    });
    assert!(matches!(bad_mode, Err(VoxelError::InvalidNoiseMode(4))));

    let no_octaves = NoiseField::new(&NoiseSettings {
        octave_count: 0,
        ..seeded_settings(1)
    });
    assert!(matches!(no_octaves, Err(VoxelError::InvalidArgument(_))));

    let field = NoiseField::new(&seeded_settings(1)).unwrap();
    assert!(matches!(World::new(&field, 7), Err(VoxelError::InvalidArgument(_))));
}
