//! # Dataset Container
//!
//! [`NmrDataset`] is an ordered, index-addressable list of spectra. It does
//! not check that its spectra agree with each other.
//!
//! ```rust
//! use nmrpro::dataset::NmrDataset;
//!
//! let dataset = NmrDataset::new(1);
//! assert!(dataset.is_empty());
//! ```

use std::ops::{Index, IndexMut};

use crate::spectrum::Spectrum;

mod error;


pub use error::DatasetError;

/// Ordered collection of spectra
#[derive(Debug, Clone, Default)]
pub struct NmrDataset {
    /// Dimensionality the dataset was created for
    pub nd: usize,
    spectra: Vec<Spectrum>,
}

impl NmrDataset {
    /// Empty dataset for `nd`-dimensional spectra
    pub fn new(nd: usize) -> Self {
        Self {
            nd,
            spectra: Vec::new(),
        }
    }

    /// Dataset holding `spectra`, in order
    pub fn from_spectra(nd: usize, spectra: Vec<Spectrum>) -> Self {
        Self { nd, spectra }
    }

    /// Number of spectra
    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    /// Whether the dataset holds no spectra
    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }

    fn check(&self, index: usize) -> Result<(), DatasetError> {
        if index < self.spectra.len() {
            Ok(())
        } else {
            Err(DatasetError::IndexOutOfBounds {
                index,
                len: self.spectra.len(),
            })
        }
    }

    /// Spectrum at `index`
    pub fn get(&self, index: usize) -> Option<&Spectrum> {
        self.spectra.get(index)
    }

    /// Mutable spectrum at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Spectrum> {
        self.spectra.get_mut(index)
    }

    /// Replace the spectrum at `index`, returning the previous one
    pub fn set(&mut self, index: usize, spectrum: Spectrum) -> Result<Spectrum, DatasetError> {
        self.check(index)?;
        Ok(std::mem::replace(&mut self.spectra[index], spectrum))
    }

    /// Add a spectrum at the end
    pub fn append(&mut self, spectrum: Spectrum) {
        self.spectra.push(spectrum);
    }

    /// Insert a spectrum at `index`, shifting later spectra up
    pub fn insert(&mut self, index: usize, spectrum: Spectrum) -> Result<(), DatasetError> {
        if index > self.spectra.len() {
            return Err(DatasetError::IndexOutOfBounds {
                index,
                len: self.spectra.len(),
            });
        }
        self.spectra.insert(index, spectrum);
        Ok(())
    }

    /// Remove and return the spectrum at `index`, shifting later spectra down
    pub fn pop(&mut self, index: usize) -> Result<Spectrum, DatasetError> {
        self.check(index)?;
        Ok(self.spectra.remove(index))
    }

    /// Remove and return the last spectrum
    pub fn pop_last(&mut self) -> Option<Spectrum> {
        self.spectra.pop()
    }

    /// Iterate in order
    pub fn iter(&self) -> std::slice::Iter<'_, Spectrum> {
        self.spectra.iter()
    }

    /// Iterate mutably in order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Spectrum> {
        self.spectra.iter_mut()
    }
}

impl Index<usize> for NmrDataset {
    type Output = Spectrum;

    fn index(&self, index: usize) -> &Spectrum {
        &self.spectra[index]
    }
}

impl IndexMut<usize> for NmrDataset {
    fn index_mut(&mut self, index: usize) -> &mut Spectrum {
        &mut self.spectra[index]
    }
}

impl<'a> IntoIterator for &'a NmrDataset {
    type Item = &'a Spectrum;
    type IntoIter = std::slice::Iter<'a, Spectrum>;

    fn into_iter(self) -> Self::IntoIter {
        self.spectra.iter()
    }
}

impl IntoIterator for NmrDataset {
    type Item = Spectrum;
    type IntoIter = std::vec::IntoIter<Spectrum>;

    fn into_iter(self) -> Self::IntoIter {
        self.spectra.into_iter()
    }
}

impl Extend<Spectrum> for NmrDataset {
    fn extend<I: IntoIterator<Item = Spectrum>>(&mut self, iter: I) {
        self.spectra.extend(iter);
    }
}
