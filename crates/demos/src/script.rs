use std::{io::Write, time::Duration};

use anyhow::{Context, Result, anyhow, bail};
use bramble::{
    NodeId, Screen,
    backend::record::Recorder,
    event::{Action, Modifiers, MouseButton},
};

use crate::gallery::Gallery;

/// The session replayed when no script is given.
pub const DEFAULT_SCRIPT: &str = "\
# Hover the second thumbnail and pick it.
move 114 70
draw
press left
release left
draw
# Drag the images window by its title bar.
move 60 25
press left
move 160 45
release left
# Rest over the panel until its tooltip shows.
move 200 120
draw 1000
";

/// One scripted input or command.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Move the pointer.
    Move(f64, f64),
    /// Press a button.
    Press(MouseButton),
    /// Release a button.
    Release(MouseButton),
    /// Resize the screen.
    Resize(i32, i32),
    /// Draw a frame after the pointer has rested for a while.
    Draw(Duration),
    /// Focus the widget with an id label.
    Focus(String),
    /// Center the window with an id label.
    Center(String),
    /// Dispose of the window with an id label.
    Dispose(String),
}

/// Parse a button name or index.
fn button(word: &str) -> Result<MouseButton> {
    Ok(match word {
        "left" => MouseButton::Left,
        "right" => MouseButton::Right,
        "middle" => MouseButton::Middle,
        other => MouseButton::from(
            other
                .parse::<u8>()
                .with_context(|| format!("unknown button {other:?}"))?,
        ),
    })
}

/// Parse a script: one step per line, `#` starts a comment.
pub fn parse(src: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (n, line) in src.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        let step = parse_step(&words).with_context(|| format!("line {}: {line}", n + 1))?;
        steps.push(step);
    }
    Ok(steps)
}

/// Parse the words of one line.
fn parse_step(words: &[&str]) -> Result<Step> {
    let arg = |i: usize| {
        words
            .get(i)
            .copied()
            .ok_or_else(|| anyhow!("missing argument {i}"))
    };
    let step = match words.first().copied().unwrap_or_default() {
        "move" => Step::Move(arg(1)?.parse()?, arg(2)?.parse()?),
        "press" => Step::Press(button(arg(1)?)?),
        "release" => Step::Release(button(arg(1)?)?),
        "resize" => Step::Resize(arg(1)?.parse()?, arg(2)?.parse()?),
        "draw" => Step::Draw(match words.get(1) {
            Some(ms) => Duration::from_millis(ms.parse()?),
            None => Duration::ZERO,
        }),
        "focus" => Step::Focus(arg(1)?.into()),
        "center" => Step::Center(arg(1)?.into()),
        "dispose" => Step::Dispose(arg(1)?.into()),
        other => bail!("unknown command {other:?}"),
    };
    Ok(step)
}

/// Replays steps against a gallery screen, writing each drawn frame.
pub struct Player<'a, W: Write> {
    /// Screen under test.
    screen: &'a mut Screen<Recorder>,
    /// Scene on the screen.
    gallery: &'a Gallery,
    /// Frame output.
    out: W,
    /// Frames drawn so far.
    frames: usize,
}

impl<'a, W: Write> Player<'a, W> {
    /// Construct a player.
    pub fn new(screen: &'a mut Screen<Recorder>, gallery: &'a Gallery, out: W) -> Self {
        Self {
            screen,
            gallery,
            out,
            frames: 0,
        }
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Run every step in order.
    pub fn run(&mut self, steps: &[Step]) -> Result<()> {
        for step in steps {
            self.step(step)?;
        }
        Ok(())
    }

    /// Run one step.
    pub fn step(&mut self, step: &Step) -> Result<()> {
        tracing::trace!("step {step:?}");
        let m = Modifiers::NONE;
        match step {
            Step::Move(x, y) => {
                self.screen.cursor_pos_callback_event(*x, *y)?;
            }
            Step::Press(b) => {
                self.screen.mouse_button_callback_event(*b, Action::Press, m)?;
            }
            Step::Release(b) => {
                self.screen
                    .mouse_button_callback_event(*b, Action::Release, m)?;
            }
            Step::Resize(w, h) => {
                self.screen.resize_callback_event(*w, *h)?;
                self.screen.perform_layout()?;
            }
            Step::Draw(idle) => self.draw(*idle)?,
            Step::Focus(label) => {
                let id = self.lookup(label)?;
                self.screen.update_focus(Some(id))?;
            }
            Step::Center(label) => {
                let id = self.lookup(label)?;
                self.screen.center_window(id)?;
            }
            Step::Dispose(label) => {
                let id = self.lookup(label)?;
                self.screen.dispose_window(id)?;
            }
        }
        self.gallery.sync(self.screen)?;
        Ok(())
    }

    /// Find a widget by id label.
    fn lookup(&self, label: &str) -> Result<NodeId> {
        self.screen
            .tree()
            .find_by_id(label)
            .ok_or_else(|| anyhow!("no widget labelled {label:?}"))
    }

    /// Draw a frame and write its operations.
    fn draw(&mut self, idle: Duration) -> Result<()> {
        let at = self.screen.last_interaction() + idle;
        self.screen.context_mut().clear();
        self.screen.draw_widgets_at(at)?;
        writeln!(self.out, "frame {}", self.frames)?;
        for op in self.screen.context().ops() {
            writeln!(self.out, "  {op:?}")?;
        }
        self.frames += 1;
        Ok(())
    }
}
