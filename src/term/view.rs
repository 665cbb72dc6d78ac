//! BoardView: the crossterm-facing presentation surface.
//!
//! A small retained scene: grid, trays, markers, highlight, status line.
//! Rendering into a `Canvas` is pure and unit-testable; the only I/O happens
//! later in `Screen`. The scene has a fixed size anchored at the terminal's
//! top-left, so hit-testing is plain rectangle arithmetic.

use arrayvec::ArrayVec;

use crate::core::CellSet;
use crate::surface::{MarkerId, Surface};
use crate::term::canvas::{Canvas, Rgb, Style};
use crate::types::{Player, Point, GRID_SIZE};

/// Inner cell size in terminal characters.
const CELL_W: i32 = 7;
const CELL_H: i32 = 3;

/// Grid frame size including the shared borders.
const GRID_W: i32 = GRID_SIZE as i32 * (CELL_W + 1) + 1;
const GRID_H: i32 = GRID_SIZE as i32 * (CELL_H + 1) + 1;

/// Scene layout, anchored at the terminal's top-left.
const GRID_X: i32 = 14;
const GRID_Y: i32 = 2;
const TRAY_W: i32 = CELL_W + 2;
const TRAY_H: i32 = CELL_H + 2;
const TRAY_Y: i32 = 6;
const FIRST_TRAY_X: i32 = 2;
const SECOND_TRAY_X: i32 = GRID_X + GRID_W + 2;
const STATUS_Y: i32 = GRID_Y + GRID_H + 1;
const HINT_Y: i32 = STATUS_Y + 1;

/// Total scene size.
pub const SCENE_W: u16 = (SECOND_TRAY_X + TRAY_W + 2) as u16;
pub const SCENE_H: u16 = (HINT_Y + 1) as u16;

/// Backlight for a droppable cell under the avatar.
const HIGHLIGHT_BG: Rgb = Rgb::new(210, 202, 227);
const SCENE_BG: Rgb = Rgb::new(16, 16, 20);
const CELL_BG: Rgb = Rgb::new(30, 30, 40);
const TAKEN_BG: Rgb = Rgb::new(38, 38, 48);
const MARKER_BG: Rgb = Rgb::new(52, 52, 66);
const BORDER_FG: Rgb = Rgb::new(200, 200, 200);

/// Where a marker visual currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerPos {
    /// Waiting in its player's tray.
    Tray,
    /// Committed into a grid cell.
    Cell(usize),
    /// Detached and following the pointer; the point is its top-left.
    Floating(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MarkerVisual {
    id: MarkerId,
    player: Player,
    pos: MarkerPos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Rect {
    const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Retained scene state implementing the presentation contract.
#[derive(Debug, Clone)]
pub struct BoardView {
    /// At most 9 placed markers plus the one being dragged.
    markers: ArrayVec<MarkerVisual, 10>,
    /// The marker currently up for grabs, if any.
    draggable: Option<MarkerId>,
    /// Placement to restore when a drag is cancelled.
    drag_snapshot: Option<(MarkerId, MarkerPos)>,
    next_id: u32,
    highlights: CellSet,
    taken: CellSet,
    status: String,
    overlay: bool,
    tray_visible: [bool; 2],
}

impl BoardView {
    pub fn new() -> Self {
        Self {
            markers: ArrayVec::new(),
            draggable: None,
            drag_snapshot: None,
            next_id: 0,
            highlights: CellSet::EMPTY,
            taken: CellSet::EMPTY,
            status: String::new(),
            overlay: false,
            tray_visible: [true, false],
        }
    }

    /// The inner rectangle of a grid cell.
    fn cell_rect(cell: usize) -> Rect {
        let row = (cell / GRID_SIZE) as i32;
        let col = (cell % GRID_SIZE) as i32;
        Rect::new(
            GRID_X + 1 + col * (CELL_W + 1),
            GRID_Y + 1 + row * (CELL_H + 1),
            CELL_W,
            CELL_H,
        )
    }

    fn tray_box(player: Player) -> Rect {
        let x = match player {
            Player::First => FIRST_TRAY_X,
            Player::Second => SECOND_TRAY_X,
        };
        Rect::new(x, TRAY_Y, TRAY_W, TRAY_H)
    }

    /// The marker slot inside a tray.
    fn tray_slot(player: Player) -> Rect {
        let tray = Self::tray_box(player);
        Rect::new(tray.x + 1, tray.y + 1, CELL_W, CELL_H)
    }

    fn marker_rect(&self, visual: &MarkerVisual) -> Rect {
        match visual.pos {
            MarkerPos::Tray => Self::tray_slot(visual.player),
            MarkerPos::Cell(cell) => Self::cell_rect(cell),
            MarkerPos::Floating(p) => Rect::new(p.x, p.y, CELL_W, CELL_H),
        }
    }

    fn visual(&self, marker: MarkerId) -> Option<&MarkerVisual> {
        self.markers.iter().find(|v| v.id == marker)
    }

    fn visual_mut(&mut self, marker: MarkerId) -> Option<&mut MarkerVisual> {
        self.markers.iter_mut().find(|v| v.id == marker)
    }

    fn mark_color(player: Player) -> Rgb {
        match player {
            Player::First => Rgb::new(225, 105, 105),
            Player::Second => Rgb::new(105, 150, 230),
        }
    }

    /// Render the scene into a fresh canvas.
    pub fn render(&self) -> Canvas {
        let mut canvas = Canvas::new(SCENE_W, SCENE_H);
        let base = Style {
            fg: Rgb::new(220, 220, 220),
            bg: SCENE_BG,
            bold: false,
            dim: false,
        };

        canvas.fill_rect(0, 0, SCENE_W as i32, SCENE_H as i32, ' ', base);

        let title = "TIC-TAC-TOE";
        let title_x = (SCENE_W as i32 - title.chars().count() as i32) / 2;
        canvas.put_str(title_x, 0, title, Style { bold: true, ..base });

        self.draw_cells(&mut canvas);
        self.draw_grid_frame(&mut canvas);
        self.draw_tray(&mut canvas, Player::First);
        self.draw_tray(&mut canvas, Player::Second);

        // Placed markers sit inside their cells.
        for visual in &self.markers {
            if let MarkerPos::Cell(cell) = visual.pos {
                self.draw_marker(&mut canvas, Self::cell_rect(cell), visual.player, None);
            }
        }

        let status_x = (SCENE_W as i32 - self.status.chars().count() as i32) / 2;
        canvas.put_str(status_x, STATUS_Y, &self.status, Style { bold: true, ..base });

        let hint = "drag with the mouse | n: new game | q: quit";
        let hint_x = (SCENE_W as i32 - hint.chars().count() as i32) / 2;
        canvas.put_str(hint_x, HINT_Y, hint, Style { dim: true, ..base });

        if self.overlay {
            self.draw_overlay(&mut canvas);
        }

        // The avatar is drawn last so it floats above everything.
        for visual in &self.markers {
            if let MarkerPos::Floating(p) = visual.pos {
                self.draw_marker(
                    &mut canvas,
                    Rect::new(p.x, p.y, CELL_W, CELL_H),
                    visual.player,
                    Some(MARKER_BG),
                );
            }
        }

        canvas
    }

    fn draw_cells(&self, canvas: &mut Canvas) {
        for cell in 0..GRID_SIZE * GRID_SIZE {
            let rect = Self::cell_rect(cell);
            let bg = if self.highlights.contains(cell) {
                HIGHLIGHT_BG
            } else if self.taken.contains(cell) {
                TAKEN_BG
            } else {
                CELL_BG
            };
            let style = Style {
                fg: Rgb::new(90, 90, 100),
                bg,
                bold: false,
                dim: false,
            };
            canvas.fill_rect(rect.x, rect.y, rect.w, rect.h, ' ', style);
        }
    }

    fn draw_grid_frame(&self, canvas: &mut Canvas) {
        let style = Style {
            fg: BORDER_FG,
            bg: SCENE_BG,
            bold: false,
            dim: false,
        };
        let step_x = CELL_W + 1;
        let step_y = CELL_H + 1;

        for line in 0..=GRID_SIZE as i32 {
            let y = GRID_Y + line * step_y;
            for x in GRID_X..GRID_X + GRID_W {
                canvas.put_char(x, y, '─', style);
            }
            let x = GRID_X + line * step_x;
            for y in GRID_Y..GRID_Y + GRID_H {
                canvas.put_char(x, y, '│', style);
            }
        }

        // Junctions.
        for row in 0..=GRID_SIZE as i32 {
            for col in 0..=GRID_SIZE as i32 {
                let ch = match (row, col) {
                    (0, 0) => '┌',
                    (0, c) if c == GRID_SIZE as i32 => '┐',
                    (r, 0) if r == GRID_SIZE as i32 => '└',
                    (r, c) if r == GRID_SIZE as i32 && c == GRID_SIZE as i32 => '┘',
                    (0, _) => '┬',
                    (r, _) if r == GRID_SIZE as i32 => '┴',
                    (_, 0) => '├',
                    (_, c) if c == GRID_SIZE as i32 => '┤',
                    _ => '┼',
                };
                canvas.put_char(GRID_X + col * step_x, GRID_Y + row * step_y, ch, style);
            }
        }
    }

    fn draw_tray(&self, canvas: &mut Canvas, player: Player) {
        let visible = self.tray_visible[player.index()];
        let tray = Self::tray_box(player);
        let style = Style {
            fg: BORDER_FG,
            bg: SCENE_BG,
            bold: false,
            dim: !visible,
        };

        let label = match player {
            Player::First => "PLAYER 1",
            Player::Second => "PLAYER 2",
        };
        canvas.put_str(tray.x, tray.y - 1, label, style);

        canvas.put_char(tray.x, tray.y, '┌', style);
        canvas.put_char(tray.x + tray.w - 1, tray.y, '┐', style);
        canvas.put_char(tray.x, tray.y + tray.h - 1, '└', style);
        canvas.put_char(tray.x + tray.w - 1, tray.y + tray.h - 1, '┘', style);
        for dx in 1..tray.w - 1 {
            canvas.put_char(tray.x + dx, tray.y, '─', style);
            canvas.put_char(tray.x + dx, tray.y + tray.h - 1, '─', style);
        }
        for dy in 1..tray.h - 1 {
            canvas.put_char(tray.x, tray.y + dy, '│', style);
            canvas.put_char(tray.x + tray.w - 1, tray.y + dy, '│', style);
        }

        if !visible {
            return;
        }
        for visual in &self.markers {
            if visual.player == player && visual.pos == MarkerPos::Tray {
                self.draw_marker(canvas, Self::tray_slot(player), player, Some(MARKER_BG));
            }
        }
    }

    fn draw_marker(&self, canvas: &mut Canvas, rect: Rect, player: Player, bg: Option<Rgb>) {
        let style = Style {
            fg: Self::mark_color(player),
            bg: bg.unwrap_or(TAKEN_BG),
            bold: true,
            dim: false,
        };
        if bg.is_some() {
            canvas.fill_rect(rect.x, rect.y, rect.w, rect.h, ' ', style);
        }
        canvas.put_char(rect.x + rect.w / 2, rect.y + rect.h / 2, player.mark(), style);
    }

    fn draw_overlay(&self, canvas: &mut Canvas) {
        let scrim = Style {
            fg: Rgb::new(140, 140, 150),
            bg: Rgb::new(10, 10, 12),
            bold: false,
            dim: true,
        };
        canvas.fill_rect(GRID_X, GRID_Y, GRID_W, GRID_H, '░', scrim);

        let text_style = Style {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(10, 10, 12),
            bold: true,
            dim: false,
        };
        let mid_y = GRID_Y + GRID_H / 2;
        let text_x = GRID_X + (GRID_W - self.status.chars().count() as i32) / 2;
        canvas.put_str(text_x, mid_y - 1, &self.status, text_style);

        let hint = "press n for a new game";
        let hint_x = GRID_X + (GRID_W - hint.chars().count() as i32) / 2;
        canvas.put_str(hint_x, mid_y + 1, hint, Style { bold: false, ..text_style });
    }
}

impl Default for BoardView {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for BoardView {
    fn render_grid(&mut self) {
        self.markers.clear();
        self.draggable = None;
        self.drag_snapshot = None;
        self.highlights = CellSet::EMPTY;
        self.taken = CellSet::EMPTY;
    }

    fn hit_test(&self, at: Point) -> Option<usize> {
        (0..GRID_SIZE * GRID_SIZE).find(|&cell| Self::cell_rect(cell).contains(at))
    }

    fn marker_at(&self, at: Point) -> Option<MarkerId> {
        let id = self.draggable?;
        let visual = self.visual(id)?;
        if self.marker_rect(visual).contains(at) {
            Some(id)
        } else {
            None
        }
    }

    fn set_highlight(&mut self, cell: usize, on: bool) {
        if on {
            self.highlights.insert(cell);
        } else {
            self.highlights.remove(cell);
        }
    }

    fn mark_occupied(&mut self, cell: usize) {
        self.taken.insert(cell);
    }

    fn spawn_marker(&mut self, player: Player) -> MarkerId {
        let id = MarkerId::new(self.next_id);
        self.next_id += 1;
        let _ = self.markers.try_push(MarkerVisual {
            id,
            player,
            pos: MarkerPos::Tray,
        });
        self.draggable = Some(id);
        id
    }

    fn begin_drag(&mut self, marker: MarkerId) -> Point {
        let (rect, pos) = match self.visual(marker) {
            Some(visual) => (self.marker_rect(visual), visual.pos),
            None => return Point::new(0, 0),
        };
        self.drag_snapshot = Some((marker, pos));
        if let Some(visual) = self.visual_mut(marker) {
            visual.pos = MarkerPos::Floating(rect.top_left());
        }
        rect.top_left()
    }

    fn drag_to(&mut self, marker: MarkerId, top_left: Point) {
        if let Some(visual) = self.visual_mut(marker) {
            visual.pos = MarkerPos::Floating(top_left);
        }
    }

    fn cancel_drag(&mut self, marker: MarkerId) {
        if let Some((id, pos)) = self.drag_snapshot.take() {
            if id == marker {
                if let Some(visual) = self.visual_mut(marker) {
                    visual.pos = pos;
                }
            } else {
                self.drag_snapshot = Some((id, pos));
            }
        }
    }

    fn place_marker(&mut self, marker: MarkerId, cell: usize) {
        if let Some(visual) = self.visual_mut(marker) {
            visual.pos = MarkerPos::Cell(cell);
        }
        if self.draggable == Some(marker) {
            self.draggable = None;
        }
        self.drag_snapshot = None;
    }

    fn show_status(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn show_overlay(&mut self, visible: bool) {
        self.overlay = visible;
    }

    fn set_player_visible(&mut self, player: Player, visible: bool) {
        self.tray_visible[player.index()] = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_inner_cells_and_borders() {
        let view = BoardView::new();

        // Corners of cell 0's inner rectangle.
        let r0 = BoardView::cell_rect(0);
        assert_eq!(view.hit_test(Point::new(r0.x, r0.y)), Some(0));
        assert_eq!(view.hit_test(Point::new(r0.x + CELL_W - 1, r0.y + CELL_H - 1)), Some(0));

        // One step past the inner rectangle is the shared border.
        assert_eq!(view.hit_test(Point::new(r0.x + CELL_W, r0.y)), None);
        assert_eq!(view.hit_test(Point::new(r0.x - 1, r0.y)), None);

        // Center of every cell resolves to that cell.
        for cell in 0..9 {
            let r = BoardView::cell_rect(cell);
            let center = Point::new(r.x + r.w / 2, r.y + r.h / 2);
            assert_eq!(view.hit_test(center), Some(cell));
        }

        // Far outside.
        assert_eq!(view.hit_test(Point::new(0, 0)), None);
        assert_eq!(view.hit_test(Point::new(1000, 1000)), None);
    }

    #[test]
    fn test_spawned_marker_is_grabbable_in_tray() {
        let mut view = BoardView::new();
        let id = view.spawn_marker(Player::First);

        let slot = BoardView::tray_slot(Player::First);
        let inside = Point::new(slot.x + 1, slot.y + 1);
        assert_eq!(view.marker_at(inside), Some(id));
        assert_eq!(view.marker_at(Point::new(slot.x + slot.w, slot.y)), None);
    }

    #[test]
    fn test_begin_drag_reports_slot_and_cancel_restores() {
        let mut view = BoardView::new();
        let id = view.spawn_marker(Player::Second);

        let slot = BoardView::tray_slot(Player::Second);
        let top_left = view.begin_drag(id);
        assert_eq!(top_left, slot.top_left());

        view.drag_to(id, Point::new(20, 4));
        assert_eq!(view.marker_at(Point::new(21, 5)), Some(id));
        assert_eq!(view.marker_at(Point::new(slot.x + 1, slot.y + 1)), None);

        view.cancel_drag(id);
        assert_eq!(view.marker_at(Point::new(slot.x + 1, slot.y + 1)), Some(id));
    }

    #[test]
    fn test_place_marker_stops_being_draggable() {
        let mut view = BoardView::new();
        let id = view.spawn_marker(Player::First);
        view.begin_drag(id);
        view.place_marker(id, 4);

        let r4 = BoardView::cell_rect(4);
        assert_eq!(view.marker_at(Point::new(r4.x + 1, r4.y + 1)), None);

        // Cancelling afterwards must not resurrect the drag snapshot.
        view.cancel_drag(id);
        let canvas = view.render();
        let center = Point::new(r4.x + r4.w / 2, r4.y + r4.h / 2);
        assert_eq!(canvas.get(center.x, center.y).map(|g| g.ch), Some('X'));
    }

    #[test]
    fn test_render_grid_clears_scene_state() {
        let mut view = BoardView::new();
        let id = view.spawn_marker(Player::First);
        view.set_highlight(3, true);
        view.mark_occupied(5);

        view.render_grid();

        let slot = BoardView::tray_slot(Player::First);
        assert_eq!(view.marker_at(Point::new(slot.x + 1, slot.y + 1)), None);
        assert!(!view.highlights.contains(3));
        assert!(!view.taken.contains(5));
        assert!(view.visual(id).is_none());
    }

    #[test]
    fn test_highlight_changes_cell_background() {
        let mut view = BoardView::new();
        view.set_highlight(0, true);
        let canvas = view.render();

        let r0 = BoardView::cell_rect(0);
        let glyph = canvas.get(r0.x, r0.y).unwrap();
        assert_eq!(glyph.style.bg, HIGHLIGHT_BG);

        view.set_highlight(0, false);
        let canvas = view.render();
        let glyph = canvas.get(r0.x, r0.y).unwrap();
        assert_eq!(glyph.style.bg, CELL_BG);
    }

    #[test]
    fn test_hidden_tray_draws_no_marker() {
        let mut view = BoardView::new();
        view.spawn_marker(Player::First);
        view.set_player_visible(Player::First, false);

        let canvas = view.render();
        let slot = BoardView::tray_slot(Player::First);
        let center = Point::new(slot.x + slot.w / 2, slot.y + slot.h / 2);
        assert_eq!(canvas.get(center.x, center.y).map(|g| g.ch), Some(' '));
    }

    #[test]
    fn test_floating_marker_draws_on_top_of_highlight() {
        let mut view = BoardView::new();
        let id = view.spawn_marker(Player::First);
        view.begin_drag(id);

        let r4 = BoardView::cell_rect(4);
        view.set_highlight(4, true);
        view.drag_to(id, r4.top_left());

        let canvas = view.render();
        let center = Point::new(r4.x + r4.w / 2, r4.y + r4.h / 2);
        let glyph = canvas.get(center.x, center.y).unwrap();
        assert_eq!(glyph.ch, 'X');
        assert_eq!(glyph.style.bg, MARKER_BG);
    }

    #[test]
    fn test_overlay_covers_grid() {
        let mut view = BoardView::new();
        view.show_status("Draw!");
        view.show_overlay(true);

        let canvas = view.render();
        let glyph = canvas.get(GRID_X + 1, GRID_Y + 1).unwrap();
        assert_eq!(glyph.ch, '░');
    }

    #[test]
    fn test_scene_fits_canvas() {
        let view = BoardView::new();
        let canvas = view.render();
        assert_eq!(canvas.width(), SCENE_W);
        assert_eq!(canvas.height(), SCENE_H);

        // The second tray's right border is inside the canvas.
        let tray = BoardView::tray_box(Player::Second);
        assert!(tray.x + tray.w <= SCENE_W as i32);
    }
}
