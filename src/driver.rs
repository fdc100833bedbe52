use crate::prelude::DEFAULT_FRAME_TIME_MS;

/// What the driver advances and presents once enough time has passed.
pub trait Simulation {
    /// compute the next generation
    fn step(&mut self);
    /// draw the current generation
    fn render(&mut self);
}

// ——> ANIMATION DRIVER

/// Accumulates frame time and steps a [`Simulation`] whenever it exceeds the frame time.
///
/// The host loop owns the actual frames. A frame callback is single-shot: the driver arms it
/// with [`AnimationDriver::request_frame`] at the end of every tick while playing, and the
/// host consumes it with [`AnimationDriver::take_frame_request`] before calling
/// [`AnimationDriver::on_tick`]. Once stopped the driver stops re-arming, so the loop drains.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDriver {
    playing: bool,
    /// last timestamp seen, in ms
    time_stamp: f64,
    /// time accumulated since the last step, in ms
    elapsed: f64,
    /// step threshold, in ms
    frame_time: f64,
    frame_requested: bool,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_TIME_MS)
    }
}

impl AnimationDriver {
    pub fn new(frame_time_ms: u32) -> Self {
        Self {
            playing: false,
            time_stamp: 0.0,
            elapsed: 0.0,
            frame_time: frame_time_ms as f64,
            frame_requested: false,
        }
    }

    /// Starts or stops the loop.
    ///
    /// Going from stopped to playing runs the first tick right away, using the last
    /// timestamp seen (0 before any tick).
    pub fn set_playing<S: Simulation>(&mut self, playing: bool, sim: &mut S) {
        let was_playing = self.playing;
        self.playing = playing;
        if playing && !was_playing {
            self.on_tick(self.time_stamp, sim);
        }
    }

    /// New step threshold, picked up by the next tick.
    pub fn set_frame_time(&mut self, frame_time_ms: u32) {
        self.frame_time = frame_time_ms as f64;
    }

    /// Handles one frame. Returns `true` when the simulation was stepped.
    ///
    /// A tick that arrives after the driver was stopped is swallowed: nothing is stepped
    /// and no further frame is requested.
    pub fn on_tick<S: Simulation>(&mut self, timestamp: f64, sim: &mut S) -> bool {
        if !self.playing {
            return false;
        }

        // a clock going backwards must not drain the accumulator
        let delta = (timestamp - self.time_stamp).max(0.0);
        self.time_stamp = timestamp;
        self.elapsed += delta;

        let stepped = self.elapsed > self.frame_time;
        if stepped {
            sim.step();
            sim.render();
            self.elapsed = 0.0;
        }

        self.request_frame();
        stepped
    }

    #[inline]
    pub fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    /// Consumes the pending frame request, if any.
    #[inline]
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[inline]
    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[inline]
    pub fn time_stamp(&self) -> f64 {
        self.time_stamp
    }
}
