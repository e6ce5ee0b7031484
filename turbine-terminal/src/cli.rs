/// Command-line options for the terminal viewer
use clap::Parser;
use turbine_core::{Direction, InitialPose, ProjectionMode, SceneConfig};

use crate::error::{AppError, Result};
use crate::AppOptions;

#[derive(Parser, Debug)]
#[command(name = "turbine-terminal")]
#[command(about = "Articulated wind turbine rendered in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Rotor speed in degrees per frame (minimum 1)
    #[arg(long, default_value_t = 1.0, value_parser = finite_f32)]
    pub speed: f32,

    /// Spin the rotor in reverse
    #[arg(long)]
    pub reverse: bool,

    /// Start with the animation paused
    #[arg(long)]
    pub paused: bool,

    /// Uniform scale applied to the whole assembly
    #[arg(long, default_value_t = 1.0, value_parser = finite_f32)]
    pub scale: f32,

    /// Initial generator yaw in degrees
    #[arg(long, default_value_t = 45.0, allow_negative_numbers = true, value_parser = finite_f32)]
    pub shoulder: f32,

    /// Initial blade pitch in degrees
    #[arg(long, default_value_t = 45.0, allow_negative_numbers = true, value_parser = finite_f32)]
    pub arm: f32,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Use an orthographic instead of a perspective projection
    #[arg(long)]
    pub orthographic: bool,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            pose: InitialPose {
                shoulder: self.shoulder,
                arm: self.arm,
                ..InitialPose::zero()
            },
            speed: self.speed,
            direction: Direction::from_forward(!self.reverse),
            start_paused: self.paused,
            assembly_scale: self.scale,
            ..SceneConfig::default()
        }
    }

    pub fn app_options(&self) -> Result<AppOptions> {
        if self.fps == 0 || self.fps > 240 {
            return Err(AppError::InvalidOption(format!(
                "fps must be between 1 and 240, got {}",
                self.fps
            )));
        }
        let projection = if self.orthographic {
            ProjectionMode::Orthographic
        } else {
            ProjectionMode::Perspective
        };
        Ok(AppOptions {
            fps: self.fps,
            projection,
        })
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        if self.verbose > 0 {
            Some(match self.verbose {
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            })
        } else if self.quiet {
            Some(log::LevelFilter::Error)
        } else {
            None
        }
    }
}

/// Float argument that rejects `nan` and `inf`
fn finite_f32(value: &str) -> std::result::Result<f32, String> {
    let parsed: f32 = value
        .parse()
        .map_err(|e| format!("`{value}` is not a number: {e}"))?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(format!("`{value}` is not a finite number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_scene_defaults() {
        let cli = Cli::parse_from(["turbine-terminal"]);
        assert_eq!(cli.scene_config(), SceneConfig::default());
        assert_eq!(cli.log_level(), None);
        let options = cli.app_options().unwrap();
        assert_eq!(options.fps, 30);
        assert_eq!(options.projection, ProjectionMode::Perspective);
    }

    #[test]
    fn test_flags_reach_scene_config() {
        let cli = Cli::parse_from([
            "turbine-terminal",
            "--speed",
            "4",
            "--reverse",
            "--paused",
            "--arm",
            "-10",
            "-vv",
        ]);
        let config = cli.scene_config();
        assert_eq!(config.speed, 4.0);
        assert_eq!(config.direction, Direction::Reverse);
        assert!(config.start_paused);
        assert_eq!(config.pose.arm, -10.0);
        assert_eq!(cli.log_level(), Some(log::LevelFilter::Debug));
    }

    #[test]
    fn test_non_finite_floats_are_rejected() {
        for (flag, value) in [
            ("--speed", "inf"),
            ("--scale", "NaN"),
            ("--shoulder", "-inf"),
            ("--arm", "nan"),
        ] {
            assert!(
                Cli::try_parse_from(["turbine-terminal", flag, value]).is_err(),
                "{flag} {value} accepted"
            );
        }
        let cli = Cli::try_parse_from(["turbine-terminal", "--shoulder", "-30.5"]).unwrap();
        assert_eq!(cli.shoulder, -30.5);
    }

    #[test]
    fn test_zero_fps_is_rejected() {
        let cli = Cli::parse_from(["turbine-terminal", "--fps", "0"]);
        assert!(matches!(cli.app_options(), Err(AppError::InvalidOption(_))));
    }
}
