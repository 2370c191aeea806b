#![cfg(feature = "std")]

//! Text rendering of boards for the console.

use std::fmt::Write;
use std::string::String;

use crate::{
    board::Board,
    common::CellState,
    coord::Coord,
    player::TargetView,
    targeting::DensityMap,
};

fn glyph(state: CellState) -> char {
    match state {
        CellState::Unknown => '.',
        CellState::Miss => 'o',
        CellState::Hit => 'X',
        CellState::Sunk => '#',
    }
}

fn render_grid(size: usize, mut cell: impl FnMut(Coord) -> char) -> String {
    let mut out = String::from("   ");
    for x in 0..size {
        let _ = write!(out, " {}", (b'A' + x as u8) as char);
    }
    out.push('\n');
    for y in 0..size {
        let _ = write!(out, "{:2} ", y + 1);
        for x in 0..size {
            let _ = write!(out, " {}", cell(Coord::new(x, y)));
        }
        out.push('\n');
    }
    out
}

/// Render a board. With `reveal`, intact ship cells show as `S`.
pub fn render_board(board: &Board, reveal: bool) -> String {
    render_grid(board.size(), |c| {
        let state = board.cell_state(c).unwrap_or(CellState::Unknown);
        if reveal && state == CellState::Unknown && board.ship_at(c).is_some() {
            'S'
        } else {
            glyph(state)
        }
    })
}

/// Render what an attacker knows about the opponent's board.
pub fn render_view(view: &TargetView<'_>) -> String {
    render_grid(view.size(), |c| {
        glyph(view.cell_state(c).unwrap_or(CellState::Unknown))
    })
}

/// Render a density map scaled to 0..=9 per cell.
pub fn render_density(map: &DensityMap) -> String {
    let peak = (0..map.size() * map.size())
        .map(|i| map.get(Coord::new(i % map.size(), i / map.size())))
        .max()
        .unwrap_or(0);
    render_grid(map.size(), |c| {
        let w = map.get(c);
        if peak == 0 || w == 0 {
            '.'
        } else {
            char::from_digit((u128::from(w) * 9 / u128::from(peak)) as u32, 10).unwrap_or('9')
        }
    })
}

/// Legend line matching the glyphs above.
pub fn legend(reveal: bool) -> &'static str {
    if reveal {
        "Legend: S=Ship  X=Hit  #=Sunk  o=Miss  .=Water"
    } else {
        "Legend: X=Hit  #=Sunk  o=Miss  .=Unknown"
    }
}
