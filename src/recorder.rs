//! Recorder: headless playback of a driver for a fixed number of ticks.
//!
//! Produces the emitted primitive lists frame by frame, so a run can be
//! compared against an earlier one without looking at pixels.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::config::KeyBindings;
use crate::engine::{Action, Driver, Input};
use crate::types::Frame;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub tick: u32,
    /// 1-based number of the scene that drew this frame.
    pub scene: usize,
    pub frame: Frame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub program: String,
    pub tick_interval_ms: u64,
    pub frames: Vec<RecordedFrame>,
}

/// Inputs to feed at given ticks, in tick order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyScript {
    events: Vec<(u32, Input)>,
}

impl KeyScript {
    pub fn new(mut events: Vec<(u32, Input)>) -> Self {
        events.sort_by_key(|(tick, _)| *tick);
        KeyScript { events }
    }

    /// Parse `key@tick` pairs separated by commas, e.g. `"s@0,3@40,Esc@90"`.
    /// Keys are decoded through `bindings`.
    pub fn parse(script: &str, bindings: &KeyBindings) -> Result<Self> {
        let mut events = Vec::new();
        for entry in script.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let Some((key, tick)) = entry.rsplit_once('@') else {
                bail!("Key script entry '{entry}' is not key@tick");
            };
            let tick: u32 = tick
                .parse()
                .with_context(|| format!("Bad tick in key script entry '{entry}'"))?;
            let Some(input) = bindings.input_for_name(key) else {
                bail!("Key '{key}' is not bound to anything");
            };
            events.push((tick, input));
        }
        Ok(Self::new(events))
    }

    fn at(&self, tick: u32) -> impl Iterator<Item = Input> + '_ {
        self.events
            .iter()
            .filter(move |(t, _)| *t == tick)
            .map(|(_, input)| *input)
    }
}

/// Longest run the `record` command accepts: a bit over nine hours at the
/// fastest tick rate.
pub const MAX_TICKS: u32 = 1_000_000;

/// Parse a tick count for the `record` command, rejecting runs above
/// `MAX_TICKS`.
pub fn parse_ticks(text: &str) -> Result<u32> {
    let ticks: u32 = text
        .parse()
        .with_context(|| format!("Invalid tick count '{text}'"))?;
    if ticks > MAX_TICKS {
        bail!("Tick count {ticks} is above the limit of {MAX_TICKS}");
    }
    Ok(ticks)
}

pub struct Recorder;

impl Recorder {
    /// Run `driver` for `ticks` ticks and collect one frame per tick, plus
    /// the opening frame.
    ///
    /// Inputs scheduled at tick `n` are applied after the `n`th tick and
    /// before its frame is drawn; tick 0 inputs land before the opening
    /// frame. A quit input ends the recording after its frame.
    pub fn record(driver: &mut Driver, ticks: u32, script: &KeyScript) -> Vec<RecordedFrame> {
        let mut frames = Vec::new();
        for tick in 0..=ticks {
            if tick > 0 {
                driver.tick();
            }
            let mut quit = false;
            for input in script.at(tick) {
                if driver.on_input(input) == Action::Quit {
                    quit = true;
                }
            }
            frames.push(RecordedFrame {
                tick,
                scene: driver.selected().number(),
                frame: driver.render(),
            });
            if quit {
                break;
            }
        }
        frames
    }
}
