//! Terminal simulator for the screen-ui toolkit.
//!
//! Renders a 16x4 character LCD into the terminal and reads encoder input
//! from stdin. Each line typed is split into keys; every key becomes one
//! frame.
//!
//! # Key bindings
//!
//! | Key   | Action             |
//! |-------|--------------------|
//! | j / k | Encoder down / up  |
//! | h / l | Encoder left/right |
//! | x     | Select             |
//! | c     | Cancel             |
//! | .     | Idle frame         |
//! | q     | Quit               |
//!
//! Set `RUST_LOG=debug` to watch focus and scroll decisions.

use std::io::{self, BufRead, Write};

use log::{info, warn};

use screen_ui::{
    Button, CharBuffer, Checkbox, ComponentId, Input, InputEvent, Label, List, Screen,
    ScreenConfig, ScriptedInput, ScrollContainer, UiResult,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const LCD_WIDTH: u8 = 16;
const LCD_HEIGHT: u8 = 4;

/// Printed in place of the checkmark glyph.
const CHECKMARK_CHAR: char = '\u{2713}';

type SimScreen = Screen<CharBuffer, ScriptedInput>;

// ---------------------------------------------------------------------------
// Demo page
// ---------------------------------------------------------------------------

/// Handles to the widgets the main loop reads back after each frame.
struct SettingsPage {
    units: ComponentId,
    alarm: ComponentId,
    name: ComponentId,
    save: ComponentId,
    reset: ComponentId,
}

impl SettingsPage {
    fn build(screen: &mut SimScreen) -> UiResult<Self> {
        screen.add(Label::new("Settings")?, 0, 0)?;
        let body = screen.add(ScrollContainer::new(LCD_WIDTH as u32, 3), 0, 1)?;

        screen.add_to(body, Label::new("Units")?, 0, 0)?;
        let units = screen.add_to(body, List::with_items(["C", "F", "K"])?, 8, 0)?;
        screen.add_to(body, Label::new("Alarm")?, 0, 1)?;
        let alarm = screen.add_to(body, Checkbox::new(), 8, 1)?;
        screen.add_to(body, Label::new("Name")?, 0, 2)?;
        let name = screen.add_to(body, Input::new("node01")?, 6, 2)?;
        let save = screen.add_to(body, Button::new("Save")?, 0, 3)?;
        let reset = screen.add_to(body, Button::new("Reset")?, 8, 3)?;

        Ok(Self {
            units,
            alarm,
            name,
            save,
            reset,
        })
    }

    fn poll(&self, screen: &mut SimScreen) -> UiResult<()> {
        if screen.widget::<Button>(self.save).is_some_and(Button::pressed) {
            let unit = screen
                .widget::<List>(self.units)
                .and_then(List::selected_item)
                .unwrap_or("?");
            let alarm = screen
                .widget::<Checkbox>(self.alarm)
                .is_some_and(Checkbox::checked);
            let name = screen.widget::<Input>(self.name).map_or("", Input::text);
            info!("Saved: unit={} alarm={} name={}", unit, alarm, name);
        }

        if screen.widget::<Button>(self.reset).is_some_and(Button::pressed) {
            info!("Resetting settings");
            screen.widget_mut::<List, _>(self.units, |list| list.set_selected_index(0));
            screen.widget_mut::<Checkbox, _>(self.alarm, |check| check.set_checked(false));
            if let Some(result) =
                screen.widget_mut::<Input, _>(self.name, |input| input.set_text("node01"))
            {
                result?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Terminal I/O
// ---------------------------------------------------------------------------

enum Key {
    Event(InputEvent),
    Quit,
}

fn parse_key(key: char) -> Option<Key> {
    let event = match key {
        'j' => InputEvent::scroll(1),
        'k' => InputEvent::scroll(-1),
        'h' => InputEvent::shift(-1),
        'l' => InputEvent::shift(1),
        'x' => InputEvent::select(),
        'c' => InputEvent::cancel(),
        '.' => InputEvent::IDLE,
        'q' => return Some(Key::Quit),
        _ => return None,
    };
    Some(Key::Event(event))
}

fn render(lcd: &CharBuffer, out: &mut impl Write, glyph_slot: u8) -> io::Result<()> {
    let border: String = "-".repeat(lcd.width() as usize);
    writeln!(out, "+{}+", border)?;
    for y in 0..lcd.height() {
        let row: String = lcd
            .row(y)
            .unwrap_or_default()
            .iter()
            .map(|&code| match code {
                code if code == glyph_slot => CHECKMARK_CHAR,
                0x20..=0x7e => code as char,
                _ => '?',
            })
            .collect();
        writeln!(out, "|{}|", row)?;
    }
    writeln!(out, "+{}+", border)?;

    let cursor = lcd.cursor();
    if cursor.visible || cursor.blink {
        writeln!(out, " cursor at ({}, {})", cursor.x, cursor.y)?;
    }
    out.flush()
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting screen-ui simulator");
    info!("Keys: j/k=down/up  h/l=left/right  x=select  c=cancel  .=idle  q=quit");

    let config = ScreenConfig::new(LCD_WIDTH, LCD_HEIGHT);
    let glyph_slot = config.glyph_slot();
    let lcd = CharBuffer::new(LCD_WIDTH, LCD_HEIGHT);
    let Ok(mut screen) = Screen::new(lcd, ScriptedInput::new(), config);

    let page = match SettingsPage::build(&mut screen) {
        Ok(page) => page,
        Err(e) => {
            warn!("Failed to build settings page: {}", e);
            return;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let Ok(()) = screen.update();
    if let Err(e) = render(screen.display(), &mut out, glyph_slot) {
        warn!("Failed to write frame: {}", e);
        return;
    }

    'running: for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        };

        for key in line.chars().filter_map(parse_key) {
            let event = match key {
                Key::Event(event) => event,
                Key::Quit => break 'running,
            };

            screen.input_mut().push(event);
            let Ok(()) = screen.update();
            if let Err(e) = page.poll(&mut screen) {
                warn!("Settings update rejected: {}", e);
            }
        }

        if let Err(e) = render(screen.display(), &mut out, glyph_slot) {
            warn!("Failed to write frame: {}", e);
            break;
        }
    }

    info!("Simulator exiting");
}
