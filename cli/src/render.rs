use std::fmt::Write;

use sweeper_core::{CellView, GamePhase, LayoutGenerator, Minesweeper};

pub fn glyph(view: CellView) -> char {
    match view {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Revealed(0) => '.',
        CellView::Revealed(count) => char::from(b'0' + count.min(8)),
        CellView::Mine => '*',
        CellView::TriggeredMine => 'X',
        CellView::Misflagged => '!',
    }
}

fn phase_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::NotStarted => "ready",
        GamePhase::Active => "playing",
        GamePhase::Won => "you win!",
        GamePhase::Lost => "game over",
    }
}

/// Text rendering of the board with a status line and coordinate labels.
pub fn render<G: LayoutGenerator>(game: &Minesweeper<G>) -> String {
    let mut out = String::new();
    let (width, height) = game.size();

    // writing into a String cannot fail
    let _ = writeln!(
        out,
        "{}  flags: {}  time: {}s",
        phase_label(game.phase()),
        game.remaining_flags(),
        game.elapsed_secs()
    );

    out.push_str("   ");
    for x in 0..width {
        let _ = write!(out, "{x:>3}");
    }
    out.push('\n');

    for y in 0..height {
        let _ = write!(out, "{y:>3}");
        for x in 0..width {
            let view = game.view_at((x, y)).unwrap_or_default();
            let _ = write!(out, "{:>3}", glyph(view));
        }
        out.push('\n');
    }
    out
}
