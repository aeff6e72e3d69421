//! Player-facing settings: hints, hint deadline and playback speed.
use crate::error::BoardError;
use crate::solver::SolveOptions;
use std::fmt;
use std::time::Duration;

/// Fastest playback speed. Zero pauses playback.
pub const MAX_ANIMATE_SPEED: u32 = 40;

/// Pause before the first step of a played-back solution.
pub const ANIMATION_START_DELAY: Duration = Duration::from_millis(800);

/// The deadlines a player can choose for hint searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HintDeadline {
    One,
    #[default]
    Three,
    Five,
    Seven,
}

impl HintDeadline {
    pub const ALL: [HintDeadline; 4] = [
        HintDeadline::One,
        HintDeadline::Three,
        HintDeadline::Five,
        HintDeadline::Seven,
    ];

    pub fn seconds(&self) -> u64 {
        match self {
            HintDeadline::One => 1,
            HintDeadline::Three => 3,
            HintDeadline::Five => 5,
            HintDeadline::Seven => 7,
        }
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.seconds())
    }
}

impl TryFrom<u64> for HintDeadline {
    type Error = BoardError;

    fn try_from(seconds: u64) -> Result<Self, Self::Error> {
        HintDeadline::ALL
            .into_iter()
            .find(|d| d.seconds() == seconds)
            .ok_or_else(|| {
                BoardError::InvalidSetting(format!(
                    "hint deadline must be 1, 3, 5 or 7 seconds, got {}",
                    seconds
                ))
            })
    }
}

impl fmt::Display for HintDeadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds())
    }
}

/// Settings chosen by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Run the solver after every move and report solvability.
    pub hint: bool,
    pub deadline: HintDeadline,
    animate_speed: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            hint: false,
            deadline: HintDeadline::default(),
            animate_speed: 20,
        }
    }
}

impl Settings {
    pub fn new(hint: bool, deadline_seconds: u64, animate_speed: u32) -> Result<Self, BoardError> {
        let mut settings = Settings {
            hint,
            deadline: HintDeadline::try_from(deadline_seconds)?,
            ..Settings::default()
        };
        settings.set_animate_speed(animate_speed)?;
        Ok(settings)
    }

    pub fn animate_speed(&self) -> u32 {
        self.animate_speed
    }

    pub fn set_animate_speed(&mut self, speed: u32) -> Result<(), BoardError> {
        if speed > MAX_ANIMATE_SPEED {
            return Err(BoardError::InvalidSetting(format!(
                "animation speed must be between 0 and {}, got {}",
                MAX_ANIMATE_SPEED, speed
            )));
        }
        self.animate_speed = speed;
        Ok(())
    }

    /// Delay between playback steps, or `None` while playback is paused.
    ///
    /// Faster speeds shorten the delay quadratically: `(41 - speed)^2` ms.
    pub fn animation_delay(&self) -> Option<Duration> {
        if self.animate_speed == 0 {
            return None;
        }
        let slack = u64::from(MAX_ANIMATE_SPEED + 1 - self.animate_speed);
        Some(Duration::from_millis(slack * slack))
    }

    /// Solver options for hint checks under these settings.
    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions::with_deadline(self.deadline.as_duration())
    }

    /// Solver options for finding a solution to play back.
    pub fn playback_options(&self) -> SolveOptions {
        SolveOptions::for_playback(self.deadline.as_duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.hint);
        assert_eq!(settings.deadline, HintDeadline::Three);
        assert_eq!(settings.animate_speed(), 20);
        assert_eq!(settings.animation_delay(), Some(Duration::from_millis(441)));
    }

    #[test]
    fn test_hint_deadline_values() {
        for seconds in [1, 3, 5, 7] {
            assert_eq!(HintDeadline::try_from(seconds).unwrap().seconds(), seconds);
        }
        for seconds in [0, 2, 4, 8] {
            assert!(matches!(
                HintDeadline::try_from(seconds),
                Err(BoardError::InvalidSetting(_))
            ));
        }
    }

    #[test]
    fn test_animation_delay_range() {
        let mut settings = Settings::default();
        settings.set_animate_speed(0).unwrap();
        assert_eq!(settings.animation_delay(), None);
        settings.set_animate_speed(MAX_ANIMATE_SPEED).unwrap();
        assert_eq!(settings.animation_delay(), Some(Duration::from_millis(1)));
        settings.set_animate_speed(1).unwrap();
        assert_eq!(settings.animation_delay(), Some(Duration::from_millis(1600)));
        assert!(settings.set_animate_speed(41).is_err());
        assert_eq!(settings.animate_speed(), 1);
    }

    #[test]
    fn test_solve_options_follow_deadline() {
        let settings = Settings::new(true, 7, 10).unwrap();
        assert_eq!(settings.solve_options().deadline, Duration::from_secs(7));
        assert!(settings.solve_options().allow_shortcut);
        assert!(!settings.playback_options().allow_shortcut);
        assert!(Settings::new(true, 2, 10).is_err());
        assert!(Settings::new(true, 3, 99).is_err());
    }
}
