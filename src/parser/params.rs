//! CSI parameter handling
//!
//! Parameters are semicolon-separated decimal numbers. Values saturate at
//! `u16::MAX`; an empty parameter is stored as 0 and reads as "default".
//! A parameter may carry colon-separated subparameters (`38:2::255:0:0`,
//! `4:3`); the first number is the parameter, the rest are its group.

use serde::{Deserialize, Serialize};

/// Default maximum number of parameters we'll track
pub const MAX_PARAMS: usize = 32;

/// CSI parameters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Params {
    /// Parameter values (0 means default/unspecified)
    values: Vec<u16>,
    /// Subparameters for each value, empty when none were given
    subparams: Vec<Vec<u16>>,
}

impl Params {
    /// Create empty params
    pub fn new() -> Self {
        Self::default()
    }

    /// Create params from a slice
    pub fn from_slice(values: &[u16]) -> Self {
        Self {
            values: values.to_vec(),
            subparams: vec![Vec::new(); values.len()],
        }
    }

    /// Create params from `(value, subparams)` groups
    pub fn from_groups(groups: &[(u16, &[u16])]) -> Self {
        Self {
            values: groups.iter().map(|&(v, _)| v).collect(),
            subparams: groups.iter().map(|&(_, sub)| sub.to_vec()).collect(),
        }
    }

    /// Get parameter at index, returning None if absent or zero
    pub fn get(&self, index: usize) -> Option<u16> {
        self.values.get(index).copied().filter(|&v| v != 0)
    }

    /// Get parameter at index with default value
    pub fn get_or(&self, index: usize, default: u16) -> u16 {
        self.get(index).unwrap_or(default)
    }

    /// Count-style parameter: absent or zero means 1
    pub fn count(&self, index: usize) -> usize {
        usize::from(self.get_or(index, 1))
    }

    /// 1-based position parameter converted to a 0-based index
    pub fn position(&self, index: usize) -> usize {
        self.count(index) - 1
    }

    /// Get raw value at index (0 if not present)
    pub fn raw(&self, index: usize) -> u16 {
        self.values.get(index).copied().unwrap_or(0)
    }

    /// Colon subparameters of the value at index (empty if none)
    pub fn subparams(&self, index: usize) -> &[u16] {
        self.subparams.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.values.iter().copied()
    }

    /// Iterate over values together with their subparameters
    pub fn iter_with_subparams(&self) -> impl Iterator<Item = (u16, &[u16])> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &v)| (v, self.subparams(i)))
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.values
    }
}

/// Incremental parameter collector used by the parser
#[derive(Debug, Clone)]
pub(crate) struct ParamsBuilder {
    values: Vec<u16>,
    subparams: Vec<Vec<u16>>,
    current: u16,
    has_digit: bool,
    /// Leading value of a colon group once the first `:` is seen
    group_head: Option<u16>,
    group: Vec<u16>,
    max: usize,
}

impl ParamsBuilder {
    pub(crate) fn new(max: usize) -> Self {
        Self {
            values: Vec::with_capacity(max.min(MAX_PARAMS)),
            subparams: Vec::with_capacity(max.min(MAX_PARAMS)),
            current: 0,
            has_digit: false,
            group_head: None,
            group: Vec::new(),
            max,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
        self.subparams.clear();
        self.current = 0;
        self.has_digit = false;
        self.group_head = None;
        self.group.clear();
    }

    pub(crate) fn push_digit(&mut self, digit: u8) {
        self.current = self
            .current
            .saturating_mul(10)
            .saturating_add(u16::from(digit));
        self.has_digit = true;
    }

    /// `;` separator
    pub(crate) fn separator(&mut self) {
        self.commit();
    }

    /// `:` subparameter separator
    pub(crate) fn sub_separator(&mut self) {
        if self.group_head.is_none() {
            self.group_head = Some(self.current);
        } else if self.group.len() < self.max {
            self.group.push(self.current);
        }
        self.current = 0;
        self.has_digit = false;
    }

    fn commit(&mut self) {
        let value = match self.group_head.take() {
            Some(head) => {
                if self.group.len() < self.max {
                    self.group.push(self.current);
                }
                head
            }
            None => self.current,
        };
        let group = std::mem::take(&mut self.group);
        // parameters past the limit are dropped
        if self.values.len() < self.max {
            self.values.push(value);
            self.subparams.push(group);
        }
        self.current = 0;
        self.has_digit = false;
    }

    /// Finish the sequence, taking the collected parameters
    pub(crate) fn finish(&mut self) -> Params {
        if self.has_digit || self.group_head.is_some() || !self.values.is_empty() {
            self.commit();
        }
        let values = std::mem::take(&mut self.values);
        let subparams = std::mem::take(&mut self.subparams);
        self.clear();
        Params { values, subparams }
    }
}
