//! Terminal tic-tac-toe runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! Mouse events from crossterm drive the interaction controller: press a
//! marker in your tray, drag it over an empty cell, let go.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use tui_tictactoe::input::GameController;
use tui_tictactoe::term::{BoardView, Screen};
use tui_tictactoe::types::{Point, PointerButton};

/// A terminal pointer is cell-quantized, so any movement is deliberate.
const TERMINAL_DRAG_THRESHOLD: i32 = 1;

fn main() -> Result<()> {
    let mut screen = Screen::new();
    screen.enter()?;

    let result = run(&mut screen);

    // Always try to restore terminal state.
    let _ = screen.exit();
    result
}

fn run(screen: &mut Screen) -> Result<()> {
    let mut controller =
        GameController::with_drag_threshold(BoardView::new(), TERMINAL_DRAG_THRESHOLD);
    controller.start_game();

    loop {
        let canvas = controller.surface().render();
        screen.draw(&canvas)?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                KeyCode::Char('n') => {
                    // A game in progress keeps going; n only restarts a finished one.
                    if controller.rules().is_over() {
                        controller.start_game();
                    }
                }
                _ => {}
            },
            Event::Mouse(mouse) => handle_mouse(&mut controller, mouse),
            // The scene repaints every frame anyway.
            Event::Resize(..) => {}
            _ => {}
        }
    }
}

fn handle_mouse(controller: &mut GameController<BoardView>, mouse: MouseEvent) {
    let at = Point::new(mouse.column as i32, mouse.row as i32);
    match mouse.kind {
        MouseEventKind::Down(button) => controller.on_pointer_down(pointer_button(button), at),
        MouseEventKind::Drag(_) | MouseEventKind::Moved => controller.on_pointer_move(at),
        MouseEventKind::Up(button) => controller.on_pointer_up(pointer_button(button), at),
        _ => {}
    }
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
    }
}
