//! Counter animation.
//!
//! A counter counts from zero up to its target in steps of
//! `max(target / 100, 1)`, one step per [`TICK_INTERVAL`]. Whole targets show
//! the running total rounded up, fractional targets show one decimal. The
//! displayed value is clamped to the target, and the last frame always shows
//! the exact target.
//!
//! [`CounterFrames`] yields the frames lazily together with the time at which
//! each one is due, so the animation can be driven by any clock. [`animate`]
//! drives it on the tokio clock.

use std::{str::FromStr, time::Duration};

use tokio::time::{Instant, sleep_until};

use crate::{error::CounterError, view::TextRegion};

/// Delay between two frames.
pub const TICK_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterTarget {
    value: f64,
}

impl CounterTarget {
    pub fn new(value: f64) -> Result<Self, CounterError> {
        if !value.is_finite() {
            return Err(CounterError::InvalidTarget(value.to_string()));
        }

        Ok(Self { value })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whole targets are displayed as integers during the animation.
    pub fn is_whole(&self) -> bool {
        self.value.fract() == 0.0
    }

    pub fn increment(&self) -> f64 {
        (self.value / 100.0).max(1.0)
    }

    /// Text of the last frame.
    pub fn final_text(&self) -> String {
        format_number(self.value)
    }

    pub fn frames(self) -> CounterFrames {
        CounterFrames {
            target: self,
            increment: self.increment(),
            count: 0.0,
            tick: 0,
            done: false,
        }
    }

    fn intermediate_text(&self, count: f64) -> String {
        if self.is_whole() {
            format_number(count.ceil().min(self.value))
        } else {
            format_one_decimal(count.min(self.value))
        }
    }
}

impl FromStr for CounterTarget {
    type Err = CounterError;

    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let value: f64 = literal
            .trim()
            .parse()
            .map_err(|_| CounterError::InvalidTarget(literal.to_string()))?;

        Self::new(value).map_err(|_| CounterError::InvalidTarget(literal.to_string()))
    }
}

/// One decimal place, exact halves rounded away from zero like
/// JavaScript's `toFixed(1)`. `format!` would round them to even.
fn format_one_decimal(value: f64) -> String {
    // Only odd multiples of 0.25 sit exactly between two tenths.
    let quarters = value.abs() * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        let tenths = (value.abs() * 10.0 + 0.5).floor().copysign(value);
        return format!("{:.1}", tenths / 10.0);
    }
    format!("{value:.1}")
}

/// Formats like a JavaScript number: no trailing `.0` on whole values.
fn format_number(value: f64) -> String {
    if value == 0.0 {
        // also folds -0
        return "0".to_string();
    }
    value.to_string()
}

/// One display update of a counter.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterFrame {
    /// Zero-based frame index.
    pub tick: u32,
    /// Offset from the animation start at which the frame is shown.
    pub elapsed: Duration,
    pub text: String,
    /// The frame showing the exact target; nothing follows it.
    pub is_final: bool,
}

/// Lazy sequence of frames for one counter.
#[derive(Debug, Clone)]
pub struct CounterFrames {
    target: CounterTarget,
    increment: f64,
    count: f64,
    tick: u32,
    done: bool,
}

impl Iterator for CounterFrames {
    type Item = CounterFrame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (text, is_final) = if self.count < self.target.value {
            self.count += self.increment;
            (self.target.intermediate_text(self.count), false)
        } else {
            self.done = true;
            (self.target.final_text(), true)
        };

        let frame = CounterFrame {
            tick: self.tick,
            elapsed: TICK_INTERVAL * self.tick,
            text,
            is_final,
        };
        self.tick += 1;

        Some(frame)
    }
}

/// Plays the animation into `region`, each frame at its due time.
pub async fn animate(target: CounterTarget, region: &dyn TextRegion) {
    let start = Instant::now();

    for frame in target.frames() {
        sleep_until(start + frame.elapsed).await;
        region.set_text(&frame.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryText;

    fn texts(target: f64) -> Vec<String> {
        CounterTarget::new(target)
            .expect("finite target")
            .frames()
            .map(|f| f.text)
            .collect()
    }

    #[test]
    fn increment_is_at_least_one() {
        assert_eq!(CounterTarget::new(50.0).unwrap().increment(), 1.0);
        assert_eq!(CounterTarget::new(7.5).unwrap().increment(), 1.0);
        assert_eq!(CounterTarget::new(2500.0).unwrap().increment(), 25.0);
    }

    #[test]
    fn whole_target_counts_by_one() {
        let frames = texts(50.0);

        assert_eq!(frames.len(), 51);
        assert_eq!(frames[0], "1");
        assert_eq!(frames[48], "49");
        assert_eq!(frames[49], "50");
        assert_eq!(frames.last().unwrap(), "50");
    }

    #[test]
    fn fractional_target_shows_one_decimal_and_clamps() {
        let frames = texts(7.5);

        assert_eq!(
            frames,
            ["1.0", "2.0", "3.0", "4.0", "5.0", "6.0", "7.0", "7.5", "7.5"]
        );
    }

    #[test]
    fn large_target_takes_about_a_hundred_steps() {
        let frames: Vec<_> = CounterTarget::new(2500.0).unwrap().frames().collect();

        assert_eq!(frames.len(), 101);
        assert_eq!(frames[0].text, "25");
        assert_eq!(frames[99].text, "2500");
        assert!(frames[100].is_final);
    }

    #[test]
    fn whole_target_rounds_running_total_up() {
        // increment 2.5
        let frames = texts(250.0);
        assert_eq!(&frames[..3], ["3", "5", "8"]);
        assert_eq!(frames.last().unwrap(), "250");
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let frames: Vec<_> = CounterTarget::new(0.0).unwrap().frames().collect();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].text, "0");
        assert_eq!(frames[0].elapsed, Duration::ZERO);
        assert!(frames[0].is_final);
    }

    #[test]
    fn negative_target_shows_target_without_counting() {
        assert_eq!(texts(-3.0), ["-3"]);
    }

    #[test]
    fn displayed_value_never_exceeds_target() {
        for target in [1.0, 3.3, 99.0, 101.0, 333.0, 1234.5, 98_765.0] {
            let t = CounterTarget::new(target).unwrap();
            for frame in t.frames() {
                let shown: f64 = frame.text.parse().expect("numeric text");
                assert!(shown <= target, "{shown} > {target}");
            }
            assert_eq!(t.frames().last().unwrap().text, t.final_text());
        }
    }

    #[test]
    fn frames_are_spaced_by_tick_interval() {
        let frames: Vec<_> = CounterTarget::new(3.0).unwrap().frames().collect();
        let offsets: Vec<_> = frames.iter().map(|f| f.elapsed.as_millis()).collect();

        assert_eq!(offsets, [0, 20, 40, 60]);
    }

    #[test]
    fn fractional_ties_round_up() {
        // increment 1.125
        let frames = texts(112.5);
        assert_eq!(&frames[..4], ["1.1", "2.3", "3.4", "4.5"]);

        assert_eq!(format_one_decimal(0.25), "0.3");
        assert_eq!(format_one_decimal(0.75), "0.8");
        assert_eq!(format_one_decimal(-2.25), "-2.3");
        assert_eq!(format_one_decimal(0.15), "0.1");
        assert_eq!(format_one_decimal(7.0), "7.0");
    }

    #[test]
    fn parse_accepts_numeric_literals() {
        assert_eq!("50".parse::<CounterTarget>().unwrap().value(), 50.0);
        assert_eq!(" 7.5 ".parse::<CounterTarget>().unwrap().value(), 7.5);
        assert!("50.0".parse::<CounterTarget>().unwrap().is_whole());
    }

    #[test]
    fn parse_rejects_garbage_and_non_finite() {
        for literal in ["", "abc", "NaN", "inf"] {
            assert_eq!(
                literal.parse::<CounterTarget>(),
                Err(CounterError::InvalidTarget(literal.to_string()))
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn animate_ends_on_target_after_expected_time() {
        let region = MemoryText::default();
        let start = Instant::now();

        animate(CounterTarget::new(50.0).unwrap(), &region).await;

        assert_eq!(region.text(), "50");
        assert_eq!(region.history().len(), 51);
        assert_eq!(start.elapsed(), Duration::from_millis(1000));
    }
}
