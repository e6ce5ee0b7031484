/// Terminal front end for the articulated turbine
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::{info, warn};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use turbine_core::{Camera, JointId, ProjectionMode, SceneState, SchedulerState};

pub mod cli;
pub mod error;
pub mod input;
pub mod renderer;

pub use error::{AppError, Result};
pub use input::{translate_key, Input};
pub use renderer::{AsciiRenderer, CELL_ASPECT};

/// Rows reserved for the status line
const HUD_ROWS: u16 = 1;

/// Frame loop settings
#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    pub fps: u32,
    pub projection: ProjectionMode,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            fps: 30,
            projection: ProjectionMode::Perspective,
        }
    }
}

/// Main application struct for terminal turbine rendering
pub struct TerminalApp {
    scene: SceneState,
    renderer: AsciiRenderer,
    options: AppOptions,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: SceneState, options: AppOptions) -> Result<Self> {
        let (width, height) = terminal::size()?;
        let height = height.saturating_sub(HUD_ROWS).max(1);
        let camera = Camera::new(width as u32, height as u32)
            .with_cell_aspect(CELL_ASPECT)
            .with_mode(options.projection);

        Ok(Self {
            scene,
            renderer: AsciiRenderer::new(width as usize, height as usize, camera),
            options,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        self.scene.stop();
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_secs(1) / self.options.fps.max(1);

        while self.running {
            let frame_start = Instant::now();

            // Input runs to completion before the frame observes the joints
            while self.running && event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }
            if !self.running {
                break;
            }

            self.renderer.clear();
            if let Err(e) = self.scene.tick(&mut self.renderer) {
                warn!("frame skipped: {e}");
            }
            self.present()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        info!(
            "exiting after {} animated ticks",
            self.scene.scheduler().advanced_ticks()
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => match translate_key(key) {
                Some(Input::Quit) => self.running = false,
                Some(Input::Command(command)) => {
                    if let Err(e) = self.scene.apply(command) {
                        warn!("ignored {command}: {e}");
                    }
                }
                None => {}
            },
            Event::Resize(width, height) => {
                let height = height.saturating_sub(HUD_ROWS).max(1);
                self.renderer.resize(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn present(&mut self) -> Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, HUD_ROWS))?;
        self.renderer.present(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn status_line(&self) -> String {
        let scheduler = self.scene.scheduler();
        let joints = self.scene.joints();
        let angle = |id: JointId| joints.angle(id).unwrap_or(f32::NAN);
        let state = match scheduler.state() {
            SchedulerState::Running => "running",
            SchedulerState::Paused => "paused",
            SchedulerState::Stopped => "stopped",
        };
        format!(
            "Turbine | FPS {:.1} | {} x{:.0} {:?} | yaw {:.0} gen {:.0} pitch {:.0} rotor {:.0} | scale {:.2} | \
             A/D W/S E/R joints, Space pause, +/- speed, F/B dir, 0 reset, [/] scale, Q quit",
            self.fps,
            state,
            scheduler.speed(),
            scheduler.direction(),
            angle(JointId::Turbine),
            angle(JointId::Shoulder),
            angle(JointId::Arm),
            angle(JointId::Rotor),
            self.scene.assembly_scale(),
        )
    }
}
