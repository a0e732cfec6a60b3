//! Assorted constants & hard-coded configuration
use crate::game::Direction;
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Default board width, in cells
pub(crate) const DEFAULT_GRID_WIDTH: u16 = 40;

/// Default board height, in cells
pub(crate) const DEFAULT_GRID_HEIGHT: u16 = 19;

/// The largest board that fits in [`DISPLAY_SIZE`] along with its border,
/// the status line, and the two message lines
pub(crate) const MAX_GRID_SIZE: Size = Size {
    width: 76,
    height: 19,
};

/// Direction the snake faces at the start of a run
pub(crate) const START_HEADING: Direction = Direction::East;

/// Time between movements of the snake at the start of a run
pub(crate) const INITIAL_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// The time between movements never drops below this
pub(crate) const MINIMUM_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// How much faster the snake gets at each scoring milestone
pub(crate) const TICK_INTERVAL_STEP: Duration = Duration::from_millis(10);

/// Score needed between speed-ups
pub(crate) const POINTS_PER_SPEED_STEP: u32 = 1;

/// How many moves ahead the autopilot looks when it can't see a way to the
/// food
pub(crate) const DEFAULT_SEARCH_HORIZON: u32 = 10;

/// Upper limit on the configurable search horizon.  The fallback search
/// visits up to 3^horizon positions.
pub(crate) const MAX_SEARCH_HORIZON: u32 = 12;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FRUIT_SYMBOL: char = '●';

/// Glyph for the snake's head when it's collided with itself or a wall
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FRUIT_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the status bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
