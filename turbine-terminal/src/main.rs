/// Turbine Terminal Demo - Articulated wind turbine
///
/// Renders the base, generator, rotor and blades with the rotor spinning.
/// Run with `--help` for startup options; press Q to quit.
use clap::Parser;
use turbine_core::SceneState;
use turbine_terminal::cli::Cli;
use turbine_terminal::{Result, TerminalApp};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse command line arguments
    let cli = Cli::parse();

    // Set verbosity
    if let Some(level) = cli.log_level() {
        log::set_max_level(level);
    }

    let options = cli.app_options()?;
    let scene = SceneState::new(&cli.scene_config())?;
    log::info!(
        "turbine ready: {} parts, {} fps target",
        scene.hierarchy().node_count(),
        options.fps
    );

    // Run the terminal app
    let mut app = TerminalApp::new(scene, options)?;
    app.run()
}
