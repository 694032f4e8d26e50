//! Terminal mode flags and tab stops
//!
//! Modes are independent booleans packed into one bitmask. Origin mode is
//! kept on the cursor because it is saved and restored with it.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Mode flags toggled by SM/RM and DECSET/DECRST
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Modes: u8 {
        /// IRM - characters push existing content right
        const INSERT           = 1 << 0;
        /// DECAWM - cursor advances to the next line at the right margin
        const WRAP             = 1 << 1;
        /// DECSCNM - swap default fg/bg when rendering
        const REVERSE_VIDEO    = 1 << 2;
        /// DECTCEM reset - cursor hidden
        const HIDE_CURSOR      = 1 << 3;
        /// Alternate screen buffer active
        const ALT_SCREEN       = 1 << 4;
        /// LNM - line feed also returns the carriage
        const LINEFEED_NEWLINE = 1 << 5;
    }
}

impl Default for Modes {
    fn default() -> Self {
        Modes::WRAP
    }
}

impl Modes {
    pub fn cursor_visible(self) -> bool {
        !self.contains(Modes::HIDE_CURSOR)
    }
}

/// Default tab interval
pub const TAB_WIDTH: usize = 8;

/// Tab stop columns
///
/// Stored as one flag per column so set/clear is O(1) and the sorted list
/// falls out of iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TabStops {
    stops: Vec<bool>,
}

impl TabStops {
    /// Default stops every 8 columns starting at column 8
    pub fn new(cols: usize) -> Self {
        let stops = (0..cols).map(Self::is_default_stop).collect();
        Self { stops }
    }

    fn is_default_stop(col: usize) -> bool {
        col > 0 && col % TAB_WIDTH == 0
    }

    pub fn cols(&self) -> usize {
        self.stops.len()
    }

    /// Restore the default stops
    pub fn reset(&mut self) {
        *self = Self::new(self.stops.len());
    }

    /// HTS
    pub fn set(&mut self, col: usize) {
        if let Some(stop) = self.stops.get_mut(col) {
            *stop = true;
        }
    }

    /// TBC 0
    pub fn clear(&mut self, col: usize) {
        if let Some(stop) = self.stops.get_mut(col) {
            *stop = false;
        }
    }

    /// TBC 3
    pub fn clear_all(&mut self) {
        self.stops.fill(false);
    }

    pub fn is_set(&self, col: usize) -> bool {
        self.stops.get(col).copied().unwrap_or(false)
    }

    /// Next stop strictly right of `col`, or the last column if none
    pub fn next(&self, col: usize) -> usize {
        let last = self.stops.len().saturating_sub(1);
        (col.saturating_add(1)..self.stops.len())
            .find(|&c| self.stops[c])
            .unwrap_or(last)
    }

    /// Previous stop strictly left of `col`, or column 0 if none
    pub fn prev(&self, col: usize) -> usize {
        (0..col.min(self.stops.len()))
            .rev()
            .find(|&c| self.stops[c])
            .unwrap_or(0)
    }

    /// Sorted list of stop columns
    pub fn to_vec(&self) -> Vec<usize> {
        self.stops
            .iter()
            .enumerate()
            .filter_map(|(col, &set)| set.then_some(col))
            .collect()
    }

    /// Resize, keeping existing stops and adding defaults in new columns
    pub fn resize(&mut self, cols: usize) {
        let old = self.stops.len();
        self.stops.truncate(cols);
        self.stops.extend((old..cols).map(Self::is_default_stop));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_default() {
        let modes = Modes::default();
        assert!(modes.contains(Modes::WRAP));
        assert!(!modes.contains(Modes::INSERT));
        assert!(!modes.contains(Modes::ALT_SCREEN));
        assert!(modes.cursor_visible());
    }

    #[test]
    fn test_modes_toggle() {
        let mut modes = Modes::default();
        modes.set(Modes::HIDE_CURSOR, true);
        assert!(!modes.cursor_visible());
        modes.toggle(Modes::ALT_SCREEN);
        assert!(modes.contains(Modes::ALT_SCREEN));
        modes.remove(Modes::WRAP);
        assert!(!modes.contains(Modes::WRAP));
    }

    #[test]
    fn test_default_tab_stops() {
        let tabs = TabStops::new(80);
        assert_eq!(tabs.to_vec(), vec![8, 16, 24, 32, 40, 48, 56, 64, 72]);
        assert!(!tabs.is_set(0));
    }

    #[test]
    fn test_tab_stops_small_screens() {
        assert!(TabStops::new(0).to_vec().is_empty());
        assert!(TabStops::new(8).to_vec().is_empty());
        assert_eq!(TabStops::new(9).to_vec(), vec![8]);
    }

    #[test]
    fn test_next_and_prev() {
        let tabs = TabStops::new(80);
        assert_eq!(tabs.next(0), 8);
        assert_eq!(tabs.next(8), 16);
        assert_eq!(tabs.next(75), 79);
        assert_eq!(tabs.prev(20), 16);
        assert_eq!(tabs.prev(16), 8);
        assert_eq!(tabs.prev(5), 0);
    }

    #[test]
    fn test_set_and_clear() {
        let mut tabs = TabStops::new(40);
        tabs.set(3);
        tabs.clear(8);
        assert_eq!(tabs.to_vec(), vec![3, 16, 24, 32]);
        tabs.set(100);
        tabs.clear_all();
        assert!(tabs.to_vec().is_empty());
        assert_eq!(tabs.next(0), 39);
        tabs.reset();
        assert_eq!(tabs.to_vec(), vec![8, 16, 24, 32]);
    }

    #[test]
    fn test_resize_keeps_custom_stops() {
        let mut tabs = TabStops::new(20);
        tabs.clear_all();
        tabs.set(5);
        tabs.resize(30);
        assert_eq!(tabs.to_vec(), vec![5, 24]);
        tabs.resize(4);
        assert!(tabs.to_vec().is_empty());
        assert_eq!(tabs.cols(), 4);
    }
}
