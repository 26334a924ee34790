//! Puzzle inputs read from local files

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-based input lookup
///
/// Directory structure: `{input_dir}/day{day:02}.txt`. A single day can be
/// pointed at an explicit file instead.
pub struct InputStore {
    input_dir: PathBuf,
    file_override: Option<(u8, PathBuf)>,
}

impl InputStore {
    pub fn new(input_dir: PathBuf) -> Self {
        Self {
            input_dir,
            file_override: None,
        }
    }

    /// Read `day`'s input from `file` instead of the input directory
    pub fn with_file(mut self, day: u8, file: PathBuf) -> Self {
        self.file_override = Some((day, file));
        self
    }

    /// Get the input path for a specific day
    pub fn input_path(&self, day: u8) -> PathBuf {
        match &self.file_override {
            Some((override_day, file)) if *override_day == day => file.clone(),
            _ => self.input_dir.join(format!("day{:02}.txt", day)),
        }
    }

    /// Check if the input file exists
    pub fn contains(&self, day: u8) -> bool {
        self.input_path(day).is_file()
    }

    /// Paths of the days whose input is missing, in the order given
    pub fn missing(&self, days: impl IntoIterator<Item = u8>) -> Vec<PathBuf> {
        days.into_iter()
            .filter(|&day| !self.contains(day))
            .map(|day| self.input_path(day))
            .collect()
    }

    /// Read a day's input
    pub fn read(&self, day: u8) -> Result<String, InputError> {
        let path = self.input_path(day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::Missing { day, path },
            _ => InputError::Io { path, source },
        })
    }
}
