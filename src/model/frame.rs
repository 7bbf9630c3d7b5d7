use std::collections::BTreeMap;

use super::arrays::{ArrayData, ArrayError, Arrays};
use super::atom::{Atom, Vec3};
use super::element::Element;
use super::info::Info;

/// One atomic configuration of a trajectory.
///
/// Atoms (element + position) are fixed once the frame is built; metadata and
/// per-atom arrays can be edited. Every array holds exactly one row per atom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    atoms: Vec<Atom>,
    pub info: Info,
    arrays: Arrays,
    pub lattice: Option<[[f64; 3]; 3]>,
    pub pbc: [bool; 3],
}

impl Frame {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self {
            atoms,
            ..Self::default()
        }
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.atoms.iter().map(|a| a.element)
    }

    #[inline]
    pub fn arrays(&self) -> &Arrays {
        &self.arrays
    }

    pub fn array(&self, key: &str) -> Option<&ArrayData> {
        self.arrays.get(key)
    }

    /// Attaches a per-atom array, replacing (and returning) any previous array
    /// under the same key.
    pub fn set_array(
        &mut self,
        key: impl Into<String>,
        data: ArrayData,
    ) -> Result<Option<ArrayData>, ArrayError> {
        self.arrays
            .insert_checked(key.into(), data, self.atoms.len())
    }

    pub fn remove_array(&mut self, key: &str) -> Option<ArrayData> {
        self.arrays.remove(key)
    }

    #[inline]
    pub fn is_periodic(&self) -> bool {
        self.pbc.iter().any(|&p| p)
    }

    /// Atom counts per element, ordered by atomic number.
    pub fn composition(&self) -> BTreeMap<Element, usize> {
        let mut counts = BTreeMap::new();
        for element in self.elements() {
            *counts.entry(element).or_insert(0) += 1;
        }
        counts
    }

    pub fn total_mass(&self) -> f64 {
        self.elements().map(|e| e.atomic_mass()).sum()
    }
}
