use std::{fmt, sync::Mutex};

use crate::render::Line;

/// The fixed set of places the client writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Primary,
    Error,
    Random,
    GlobalAverage,
}

impl Region {
    pub const fn all() -> &'static [Region] {
        &[Region::Primary, Region::Error, Region::Random, Region::GlobalAverage]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Region::Primary => "Weather",
            Region::Error => "Errors",
            Region::Random => "Random location",
            Region::GlobalAverage => "Global average",
        }
    }

    const fn index(self) -> usize {
        match self {
            Region::Primary => 0,
            Region::Error => 1,
            Region::Random => 2,
            Region::GlobalAverage => 3,
        }
    }
}

/// What a region currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    Empty,
    Weather(Vec<Line>),
    Message(String),
    /// A message flagged as an error where it is shown.
    InlineError(String),
}

impl Content {
    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Empty)
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Empty => Ok(()),
            Content::Weather(lines) => {
                let mut first = true;
                for line in lines {
                    if !first {
                        writeln!(f)?;
                    }
                    first = false;
                    write!(f, "{line}")?;
                }
                Ok(())
            }
            Content::Message(msg) => f.write_str(msg),
            Content::InlineError(msg) => {
                let mut first = true;
                for line in msg.lines() {
                    if !first {
                        writeln!(f)?;
                    }
                    first = false;
                    write!(f, "! {}", line.trim())?;
                }
                Ok(())
            }
        }
    }
}

/// Somewhere regions can be drawn. Every write replaces the whole region.
pub trait Surface: Send + Sync {
    fn show(&self, region: Region, content: Content);

    fn clear(&self, region: Region) {
        self.show(region, Content::Empty);
    }
}

/// In-memory surface holding the current content of every region.
#[derive(Debug, Default)]
pub struct Board {
    regions: Mutex<[Content; 4]>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, region: Region) -> Content {
        self.lock()[region.index()].clone()
    }

    /// Snapshot of every region in display order.
    pub fn snapshot(&self) -> Vec<(Region, Content)> {
        let regions = self.lock();
        Region::all().iter().map(|r| (*r, regions[r.index()].clone())).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, [Content; 4]> {
        // A panicking writer cannot leave a half-written region behind.
        self.regions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Surface for Board {
    fn show(&self, region: Region, content: Content) {
        self.lock()[region.index()] = content;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (region, content) in self.snapshot() {
            if content.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            first = false;
            writeln!(f, "== {} ==", region.title())?;
            writeln!(f, "{content}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_starts_empty() {
        let board = Board::new();
        assert!(Region::all().iter().all(|r| board.get(*r).is_empty()));
        assert_eq!(board.to_string(), "");
    }

    #[test]
    fn show_replaces_and_clear_empties() {
        let board = Board::new();
        board.show(Region::Error, Content::Message("first".into()));
        board.show(Region::Error, Content::Message("second".into()));
        assert_eq!(board.get(Region::Error), Content::Message("second".into()));

        board.clear(Region::Error);
        assert!(board.get(Region::Error).is_empty());
    }

    #[test]
    fn prints_only_filled_regions() {
        let board = Board::new();
        board.show(
            Region::Random,
            Content::Weather(vec![Line { label: "Location", value: "Delhi".into() }]),
        );
        board.show(Region::GlobalAverage, Content::InlineError("hint\n   Failed".into()));

        let text = board.to_string();
        assert!(!text.contains("== Weather =="));
        assert!(text.contains("== Random location ==\nLocation: Delhi\n"));
        assert!(text.contains("== Global average ==\n! hint\n! Failed\n"));
    }
}
