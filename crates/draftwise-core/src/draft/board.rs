// Snake draft board: the draft log laid out as rounds x seats.

use super::pick::{snake_seat, DraftEntry};

/// Grid of picks. `cells[round][seat]`, both 0-based.
#[derive(Debug, Clone)]
pub struct DraftBoard<'a> {
    pub num_teams: usize,
    pub cells: Vec<Vec<Option<&'a DraftEntry>>>,
}

impl<'a> DraftBoard<'a> {
    /// Lay out `entries` (in pick order) over at least `min_rounds` rounds.
    pub fn build(entries: &'a [DraftEntry], num_teams: usize, min_rounds: usize) -> Self {
        if num_teams == 0 {
            return DraftBoard {
                num_teams,
                cells: Vec::new(),
            };
        }

        let needed = entries.len().div_ceil(num_teams);
        let rounds = min_rounds.max(needed);
        let mut cells = vec![vec![None; num_teams]; rounds];

        for (idx, entry) in entries.iter().enumerate() {
            let round = idx / num_teams;
            let seat = snake_seat(idx as u32 + 1, num_teams as u32) as usize - 1;
            cells[round][seat] = Some(entry);
        }

        DraftBoard { num_teams, cells }
    }

    pub fn rounds(&self) -> usize {
        self.cells.len()
    }

    /// Cell at 1-based `round` and `seat`.
    pub fn get(&self, round: usize, seat: usize) -> Option<&'a DraftEntry> {
        self.cells
            .get(round.checked_sub(1)?)?
            .get(seat.checked_sub(1)?)
            .copied()
            .flatten()
    }
}
