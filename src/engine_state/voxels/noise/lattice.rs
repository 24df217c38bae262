//! # Lattice Module
//!
//! Seeded lookup tables that assign pseudo-random values to integer lattice
//! points. Every noise mode hashes the corners of the lattice cell containing
//! a sample point through the same [`PermutationTable`]; 3D noise additionally
//! maps the hash to a unit gradient vector.

use cgmath::{InnerSpace, Vector3};

/// Number of distinct entries in the permutation table.
pub const PERMUTATION_SIZE: usize = 512;

const LATTICE_MASK: i32 = PERMUTATION_SIZE as i32 - 1;

/// A shuffled `0..PERMUTATION_SIZE` sequence, stored twice back to back.
///
/// Duplicating the sequence lets nested lookups such as
/// `table[table[x] + y]` index past `PERMUTATION_SIZE` without wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationTable {
    table: Vec<usize>,
}

impl PermutationTable {
    /// Builds a table with a Fisher-Yates shuffle driven by `rng`.
    ///
    /// The same generator state always yields the same table.
    pub fn new(rng: &mut fastrand::Rng) -> Self {
        let mut table: Vec<usize> = (0..PERMUTATION_SIZE).collect();

        for i in (1..PERMUTATION_SIZE).rev() {
            let j = rng.usize(0..=i);
            table.swap(i, j);
        }

        table.extend_from_within(0..PERMUTATION_SIZE);

        PermutationTable { table }
    }

    /// Wraps any lattice coordinate, negative ones included, into `0..PERMUTATION_SIZE`.
    #[inline]
    fn wrap(coord: i32) -> usize {
        (coord & LATTICE_MASK) as usize
    }

    /// Hashes a 1D lattice point into `0..PERMUTATION_SIZE`.
    #[inline]
    pub fn hash1(&self, x: i32) -> usize {
        self.table[Self::wrap(x)]
    }

    /// Hashes a 2D lattice point into `0..PERMUTATION_SIZE`.
    #[inline]
    pub fn hash2(&self, x: i32, y: i32) -> usize {
        self.table[self.hash1(x) + Self::wrap(y)]
    }

    /// Hashes a 3D lattice point into `0..PERMUTATION_SIZE`.
    #[inline]
    pub fn hash3(&self, x: i32, y: i32, z: i32) -> usize {
        self.table[self.hash2(x, y) + Self::wrap(z)]
    }

    /// Maps a hash to a scalar lattice value in `[0, 1]`.
    #[inline]
    pub fn value(hash: usize) -> f32 {
        hash as f32 / (PERMUTATION_SIZE - 1) as f32
    }

    /// The full doubled table.
    pub fn as_slice(&self) -> &[usize] {
        &self.table
    }
}

/// Generates `PERMUTATION_SIZE` unit vectors uniformly distributed over the sphere.
///
/// Candidates are drawn from the `[-1, 1]³` cube and rejected when they fall
/// outside the unit ball (or too close to its center) before normalization.
pub fn random_gradients(rng: &mut fastrand::Rng) -> Vec<Vector3<f32>> {
    let mut gradients = Vec::with_capacity(PERMUTATION_SIZE);

    while gradients.len() < PERMUTATION_SIZE {
        let candidate = Vector3::new(
            rng.f32() * 2.0 - 1.0,
            rng.f32() * 2.0 - 1.0,
            rng.f32() * 2.0 - 1.0,
        );
        let length_squared = candidate.magnitude2();
        if length_squared > 1.0e-4 && length_squared <= 1.0 {
            gradients.push(candidate / length_squared.sqrt());
        }
    }

    gradients
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_a_doubled_permutation() {
        let mut rng = fastrand::Rng::with_seed(7);
        let table = PermutationTable::new(&mut rng);
        let slice = table.as_slice();

        assert_eq!(slice.len(), 2 * PERMUTATION_SIZE);
        assert_eq!(&slice[..PERMUTATION_SIZE], &slice[PERMUTATION_SIZE..]);

        let mut seen = vec![false; PERMUTATION_SIZE];
        for &entry in &slice[..PERMUTATION_SIZE] {
            assert!(!seen[entry], "duplicate entry {entry}");
            seen[entry] = true;
        }
    }

    #[test]
    fn test_same_seed_same_table() {
        let a = PermutationTable::new(&mut fastrand::Rng::with_seed(99));
        let b = PermutationTable::new(&mut fastrand::Rng::with_seed(99));
        let c = PermutationTable::new(&mut fastrand::Rng::with_seed(100));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hashes_stay_in_range_for_negative_coordinates() {
        let table = PermutationTable::new(&mut fastrand::Rng::with_seed(3));

        for coord in [-1_000_000, -513, -1, 0, 1, 511, 512, 1_000_000] {
            assert!(table.hash1(coord) < PERMUTATION_SIZE);
            assert!(table.hash2(coord, -coord) < PERMUTATION_SIZE);
            assert!(table.hash3(coord, coord, -coord) < PERMUTATION_SIZE);
        }
        assert_eq!(table.hash1(-1), table.hash1(LATTICE_MASK));
    }

    #[test]
    fn test_gradients_are_unit_vectors() {
        let gradients = random_gradients(&mut fastrand::Rng::with_seed(11));

        assert_eq!(gradients.len(), PERMUTATION_SIZE);
        for gradient in gradients {
            assert!((gradient.magnitude() - 1.0).abs() < 1.0e-4);
        }
    }
}
