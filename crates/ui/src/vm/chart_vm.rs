use exam_core::model::{NavigationIntent, QuestionId, TileBoard};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileVm {
    pub id: QuestionId,
    pub number: u32,
    pub section: String,
    pub class: String,
    pub aria_label: String,
    pub title: String,
}

impl TileVm {
    #[must_use]
    pub fn intent(&self) -> NavigationIntent {
        NavigationIntent::new(self.section.clone(), self.number)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartSectionVm {
    pub name: String,
    pub count: usize,
    /// Header text, e.g. `25 Qs`.
    pub count_label: String,
    pub tiles: Vec<TileVm>,
}

/// Map the rendered board to display rows, overlaying the sidebar's own
/// current-question marker on top of the board's.
#[must_use]
pub fn map_chart(board: &TileBoard, marker: Option<&QuestionId>) -> Vec<ChartSectionVm> {
    board
        .sections
        .iter()
        .map(|section| ChartSectionVm {
            name: section.name.clone(),
            count: section.count,
            count_label: format!("{} Qs", section.count),
            tiles: section
                .tiles
                .iter()
                .map(|tile| {
                    let mut tile = tile.clone();
                    tile.is_current |= marker == Some(&tile.id);
                    TileVm {
                        class: tile.class_list(),
                        aria_label: tile.aria_label(),
                        title: tile.title(),
                        number: tile.number,
                        section: tile.section,
                        id: tile.id,
                    }
                })
                .collect(),
        })
        .collect()
}

#[must_use]
pub fn drawer_toggle_label(open: bool) -> &'static str {
    if open { "Close" } else { "Open" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{
        QuestionSnapshot, QuestionStatus, QuestionStatusMap, SectionSnapshot, StatusSnapshot,
    };

    fn qid(raw: &str) -> QuestionId {
        QuestionId::new(raw).unwrap()
    }

    fn board() -> TileBoard {
        let snapshot = StatusSnapshot {
            sections: vec![SectionSnapshot {
                name: "Chemistry".into(),
                count: None,
                questions: vec![
                    QuestionSnapshot {
                        id: qid("Q1"),
                        number: 1,
                        status: QuestionStatus::Attempted,
                        is_current: false,
                    },
                    QuestionSnapshot {
                        id: qid("Q2"),
                        number: 2,
                        status: QuestionStatus::Unanswered,
                        is_current: false,
                    },
                ],
            }],
        };
        let mut visited = QuestionStatusMap::new();
        visited.mark(qid("Q2"));
        TileBoard::build(&snapshot, &visited, &QuestionStatusMap::new(), None)
    }

    #[test]
    fn maps_labels_and_counts() {
        let sections = map_chart(&board(), None);
        assert_eq!(sections[0].name, "Chemistry");
        assert_eq!(sections[0].count, 2);
        assert_eq!(sections[0].count_label, "2 Qs");

        let first = &sections[0].tiles[0];
        assert_eq!(first.class, "qc-tile q-attempted");
        assert_eq!(first.aria_label, "Question 1, Attempted");
        assert_eq!(first.title, "Q1: Attempted");

        let second = &sections[0].tiles[1];
        assert_eq!(second.class, "qc-tile q-visited");
        assert_eq!(second.aria_label, "Question 2, Visited (No Answer)");
        assert_eq!(second.intent(), NavigationIntent::new("Chemistry", 2));
    }

    #[test]
    fn marker_overlays_current() {
        let sections = map_chart(&board(), Some(&qid("Q2")));
        assert_eq!(sections[0].tiles[1].class, "qc-tile q-visited q-current");
        assert_eq!(sections[0].tiles[0].class, "qc-tile q-attempted");
    }

    #[test]
    fn drawer_label_flips() {
        assert_eq!(drawer_toggle_label(false), "Open");
        assert_eq!(drawer_toggle_label(true), "Close");
    }
}
