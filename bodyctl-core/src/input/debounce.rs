//! Ignition button debounce
//!
//! A four-state machine that filters contact bounce into one clean release
//! event per press/release cycle. Both modules use it; they differ only in
//! which pin level means "pressed" and in the hold threshold.
//!
//! ```text
//!            pressed                  held >= threshold
//!   ┌────┐ ─────────► ┌─────────┐ ───────────────────► ┌──────┐
//!   │ Up │            │ Falling │                      │ Down │
//!   └────┘ ◄───────── └─────────┘                      └──────┘
//!     ▲    bounced                                      │    ▲
//!     │                                        released │    │ bounced
//!     │  released >= threshold (release event)          ▼    │
//!     └────────────────────────────────────────── ┌─────────┐
//!                                                 │ Rising  │
//!                                                 └─────────┘
//! ```

use crate::config::DebounceConfig;

/// Debounce states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// Button released and stable
    Up,
    /// Press seen, waiting for it to hold
    Falling,
    /// Button pressed and stable
    Down,
    /// Release seen, waiting for it to hold
    Rising,
}

/// Debounced button input
#[derive(Debug, Clone)]
pub struct Debouncer {
    config: DebounceConfig,
    tick_ms: u32,
    /// `None` until seeded from a raw level
    state: Option<DebounceState>,
    /// Time spent in Falling/Rising (ms)
    elapsed_ms: u32,
}

impl Debouncer {
    /// Create an unseeded debouncer
    ///
    /// The first call to [`Debouncer::update`] seeds the state from the raw
    /// level and reports no event.
    pub fn new(config: DebounceConfig, tick_ms: u32) -> Self {
        Self {
            config,
            tick_ms,
            state: None,
            elapsed_ms: 0,
        }
    }

    /// Create a debouncer seeded from the power-on pin level
    pub fn seeded(config: DebounceConfig, tick_ms: u32, level_high: bool) -> Self {
        let mut debouncer = Self::new(config, tick_ms);
        debouncer.seed(level_high);
        debouncer
    }

    /// Derive the stable state from a raw pin level
    pub fn seed(&mut self, level_high: bool) {
        self.state = Some(if self.config.is_pressed(level_high) {
            DebounceState::Down
        } else {
            DebounceState::Up
        });
        self.elapsed_ms = 0;
    }

    /// Current state, `None` if not yet seeded
    pub fn state(&self) -> Option<DebounceState> {
        self.state
    }

    /// Time accumulated in the current Falling/Rising state (ms)
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Advance one tick with the sampled pin level
    ///
    /// Returns `true` exactly on the tick a debounced release commits.
    pub fn update(&mut self, level_high: bool) -> bool {
        let pressed = self.config.is_pressed(level_high);
        let threshold = self.config.threshold_ms;

        let Some(state) = self.state else {
            self.seed(level_high);
            return false;
        };

        let (next, released) = match state {
            DebounceState::Up => {
                if pressed {
                    self.elapsed_ms = 0;
                    (DebounceState::Falling, false)
                } else {
                    (DebounceState::Up, false)
                }
            }
            DebounceState::Falling => {
                self.elapsed_ms = self.elapsed_ms.saturating_add(self.tick_ms);
                if self.elapsed_ms >= threshold {
                    if pressed {
                        (DebounceState::Down, false)
                    } else {
                        (DebounceState::Up, false)
                    }
                } else {
                    (DebounceState::Falling, false)
                }
            }
            DebounceState::Down => {
                if pressed {
                    (DebounceState::Down, false)
                } else {
                    self.elapsed_ms = 0;
                    (DebounceState::Rising, false)
                }
            }
            DebounceState::Rising => {
                self.elapsed_ms = self.elapsed_ms.saturating_add(self.tick_ms);
                if self.elapsed_ms >= threshold {
                    if pressed {
                        (DebounceState::Down, false)
                    } else {
                        (DebounceState::Up, true)
                    }
                } else {
                    (DebounceState::Rising, false)
                }
            }
        };

        self.state = Some(next);
        released
    }
}
