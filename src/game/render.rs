use super::direction::Direction;
use super::grid::Cell;
use super::{EndCause, Snapshot, State};
use crate::consts;
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

impl Widget for Snapshot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [status_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(self.status_line(), consts::SCORE_BAR_STYLE).render(status_area, buf);

        let block_size = Size {
            width: self.grid.width().saturating_add(2),
            height: self.grid.height().saturating_add(2),
        };
        let block_area = center_rect(block_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut level = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            bounds: block_area,
            buf,
        };
        for &c in self.body.iter().skip(1) {
            level.draw_cell(c, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        level.draw_cell(self.food, consts::FRUIT_SYMBOL, consts::FRUIT_STYLE);
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if let Some(&head) = self.body.front() {
            if let State::GameOver(EndCause::Collision(_)) = self.state {
                level.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            } else {
                level.draw_cell(head, head_symbol(self.heading), consts::SNAKE_STYLE);
            }
        }

        match self.state {
            State::Running => {
                key_help(&[
                    ("o", " autopilot — "),
                    ("space", " boost — "),
                    ("p", " pause — "),
                    ("q", " quit"),
                ])
                .render(msg2_area, buf);
            }
            State::Paused => {
                Span::from(" — PAUSED —").render(msg1_area, buf);
                key_help(&[("p", " resume — "), ("r", " restart — "), ("q", " quit")])
                    .render(msg2_area, buf);
            }
            State::GameOver(cause) => {
                let headline = match cause {
                    EndCause::Collision(_) => "GAME OVER!",
                    EndCause::BoardFilled => "YOU WIN!",
                };
                Span::from(format!(
                    " {headline} Your score is {} ({cause}).",
                    self.score
                ))
                .render(msg1_area, buf);
                key_help(&[("r", " restart — "), ("q", " quit")]).render(msg2_area, buf);
            }
        }
    }
}

impl Snapshot<'_> {
    fn status_line(&self) -> String {
        format!(
            " Score: {}   Speed: {} ms{}   Autopilot: {}",
            self.score,
            self.interval.as_millis(),
            if self.boosted { " (boost)" } else { "" },
            if self.autopilot { "on" } else { "off" },
        )
    }
}

/// Return the glyph to use for drawing the snake's head
fn head_symbol(heading: Direction) -> char {
    match heading {
        Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
        Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
        Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
        Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
    }
}

/// Build a line of `(key, description)` pairs with the keys highlighted
fn key_help(items: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for &(key, desc) in items {
        spans.push(Span::styled(key, consts::KEY_STYLE));
        spans.push(Span::raw(desc));
    }
    Line::from(spans)
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    /// Where cell (0, 0) of the board lives
    area: Rect,
    /// Cells outside this rectangle are not drawn.  This is wider than `area`
    /// by the border so that a head that ran into a wall shows up on it.
    bounds: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let Ok(x) = u16::try_from(i32::from(self.area.x) + cell.x) else {
            return;
        };
        let Ok(y) = u16::try_from(i32::from(self.area.y) + cell.y) else {
            return;
        };
        if !self.bounds.contains((x, y).into()) {
            return;
        }
        if let Some(c) = self.buf.cell_mut((x, y)) {
            c.set_char(symbol);
            c.set_style(Style::reset().patch(style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::collision::Collision;
    use crate::game::grid::Grid;
    use std::collections::VecDeque;
    use std::time::Duration;

    fn snapshot(body: &VecDeque<Cell>, state: State) -> Snapshot<'_> {
        Snapshot {
            grid: Grid::new(10, 5),
            body,
            heading: Direction::East,
            food: Cell::new(7, 1),
            score: 3,
            interval: Duration::from_millis(170),
            boosted: false,
            autopilot: true,
            state,
        }
    }

    fn render(snapshot: Snapshot<'_>) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        snapshot.render(area, &mut buffer);
        buffer
    }

    fn symbol(buffer: &Buffer, x: u16, y: u16) -> &str {
        buffer[(x, y)].symbol()
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        let line = (0..80).map(|x| symbol(buffer, x, y)).collect::<String>();
        line.trim_end().to_owned()
    }

    // A 10x5 board is drawn in a 12x7 box centered in the 80x21 space below
    // the status line, so board cell (0, 0) lands at (35, 9).

    #[test]
    fn running() {
        let body = VecDeque::from([Cell::new(2, 2), Cell::new(1, 2), Cell::new(0, 2)]);
        let buffer = render(snapshot(&body, State::Running));
        pretty_assertions::assert_eq!(
            row(&buffer, 0),
            " Score: 3   Speed: 170 ms   Autopilot: on"
        );
        assert_eq!(symbol(&buffer, 34, 8), "┌");
        assert_eq!(symbol(&buffer, 45, 14), "┘");
        assert_eq!(symbol(&buffer, 37, 11), "<");
        assert_eq!(symbol(&buffer, 36, 11), "⚬");
        assert_eq!(symbol(&buffer, 35, 11), "⚬");
        assert_eq!(symbol(&buffer, 42, 10), "●");
        assert_eq!(buffer[(37, 11)].style().fg, consts::SNAKE_STYLE.fg);
    }

    #[test]
    fn wall_collision_is_drawn_on_border() {
        let body = VecDeque::from([Cell::new(10, 2), Cell::new(9, 2)]);
        let buffer = render(snapshot(
            &body,
            State::GameOver(EndCause::Collision(Collision::Wall)),
        ));
        assert_eq!(symbol(&buffer, 45, 11), "×");
        assert_eq!(symbol(&buffer, 44, 11), "⚬");
        assert_eq!(
            row(&buffer, 22),
            " GAME OVER! Your score is 3 (the snake hit the wall)."
        );
    }

    #[test]
    fn paused() {
        let body = VecDeque::from([Cell::new(2, 2)]);
        let buffer = render(snapshot(&body, State::Paused));
        assert_eq!(row(&buffer, 22), " — PAUSED —");
        assert_eq!(row(&buffer, 23), " p resume — r restart — q quit");
    }
}
