use crate::model::ids::QuestionId;
use crate::model::intent::NavigationIntent;
use crate::model::snapshot::{QuestionStatus, SectionSnapshot, StatusSnapshot};
use crate::model::status::{QuestionStatusMap, StatusFlags};

/// Visual state of one tile. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileState {
    Unvisited,
    Visited,
    Attempted,
}

impl TileState {
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            TileState::Unvisited => "q-unvisited",
            TileState::Visited => "q-visited",
            TileState::Attempted => "q-attempted",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TileState::Unvisited => "Unvisited",
            TileState::Visited => "Visited (No Answer)",
            TileState::Attempted => "Attempted",
        }
    }
}

/// Merge the server status with the local flags.
///
/// Attempted wins if either source says so; visited only counts when the
/// question is not attempted.
#[must_use]
pub fn resolve_tile_state(server: QuestionStatus, local: StatusFlags) -> TileState {
    if server == QuestionStatus::Attempted || local.attempted {
        TileState::Attempted
    } else if local.visited {
        TileState::Visited
    } else {
        TileState::Unvisited
    }
}

/// One rendered question tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: QuestionId,
    pub number: u32,
    pub section: String,
    pub server_status: QuestionStatus,
    pub state: TileState,
    pub is_current: bool,
}

impl Tile {
    #[must_use]
    pub fn class_list(&self) -> String {
        let mut classes = format!("qc-tile {}", self.state.class_name());
        if self.is_current {
            classes.push_str(" q-current");
        }
        classes
    }

    #[must_use]
    pub fn aria_label(&self) -> String {
        format!("Question {}, {}", self.number, self.state.label())
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("Q{}: {}", self.number, self.state.label())
    }

    #[must_use]
    pub fn intent(&self) -> NavigationIntent {
        NavigationIntent::new(self.section.clone(), self.number)
    }

    /// Recompute the three-state class against fresh local flags, keeping the
    /// server status from the last snapshot.
    pub fn refresh_state(&mut self, visited: &QuestionStatusMap, attempted: &QuestionStatusMap) {
        let flags = StatusFlags::lookup(&self.id, visited, attempted);
        self.state = resolve_tile_state(self.server_status, flags);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSection {
    pub name: String,
    pub count: usize,
    pub tiles: Vec<Tile>,
}

/// The full sidebar grid as of the last render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileBoard {
    pub sections: Vec<TileSection>,
}

impl TileBoard {
    /// Build a board from an authoritative snapshot merged with local flags.
    ///
    /// `current` overlays the current marker in addition to the snapshot's
    /// own `is_current` flag.
    #[must_use]
    pub fn build(
        snapshot: &StatusSnapshot,
        visited: &QuestionStatusMap,
        attempted: &QuestionStatusMap,
        current: Option<&QuestionId>,
    ) -> Self {
        let sections = snapshot
            .sections
            .iter()
            .map(|section| build_section(section, visited, attempted, current))
            .collect();
        Self { sections }
    }

    pub fn refresh_states(&mut self, visited: &QuestionStatusMap, attempted: &QuestionStatusMap) {
        for tile in self.tiles_mut() {
            tile.refresh_state(visited, attempted);
        }
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.sections.iter().flat_map(|section| section.tiles.iter())
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.tiles.iter_mut())
    }

    #[must_use]
    pub fn tile(&self, id: &QuestionId) -> Option<&Tile> {
        self.tiles().find(|tile| &tile.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn build_section(
    section: &SectionSnapshot,
    visited: &QuestionStatusMap,
    attempted: &QuestionStatusMap,
    current: Option<&QuestionId>,
) -> TileSection {
    let tiles = section
        .questions
        .iter()
        .map(|question| {
            let flags = StatusFlags::lookup(&question.id, visited, attempted);
            Tile {
                id: question.id.clone(),
                number: question.number,
                section: section.name.clone(),
                server_status: question.status,
                state: resolve_tile_state(question.status, flags),
                is_current: question.is_current || current == Some(&question.id),
            }
        })
        .collect();

    TileSection {
        name: section.name.clone(),
        count: section.display_count(),
        tiles,
    }
}
