/// Translation of raw key events into typed scene commands
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use turbine_core::{Command, JointId};

/// Degrees added per key press on a manual joint
pub const JOINT_STEP: f32 = 5.0;
/// Degrees-per-tick added or removed per speed key press
pub const SPEED_STEP: f32 = 1.0;
/// Assembly scale applied per zoom key press
pub const SCALE_STEP: f32 = 1.1;

/// What a key press asks the application to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Command(Command),
    Quit,
}

/// Map a key event to an input; unbound keys yield `None`
pub fn translate_key(event: KeyEvent) -> Option<Input> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }

    let command = match event.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Input::Quit),
        KeyCode::Char('a') | KeyCode::Left => joint(JointId::Turbine, -JOINT_STEP),
        KeyCode::Char('d') | KeyCode::Right => joint(JointId::Turbine, JOINT_STEP),
        KeyCode::Char('w') | KeyCode::Up => joint(JointId::Shoulder, JOINT_STEP),
        KeyCode::Char('s') | KeyCode::Down => joint(JointId::Shoulder, -JOINT_STEP),
        KeyCode::Char('e') => joint(JointId::Arm, JOINT_STEP),
        KeyCode::Char('r') => joint(JointId::Arm, -JOINT_STEP),
        KeyCode::Char(' ') => Command::ToggleAnimation,
        KeyCode::Char('+') | KeyCode::Char('=') => Command::AdjustSpeed(SPEED_STEP),
        KeyCode::Char('-') => Command::AdjustSpeed(-SPEED_STEP),
        KeyCode::Char('f') => Command::SetDirection(true),
        KeyCode::Char('b') => Command::SetDirection(false),
        KeyCode::Char('0') => Command::ResetSpeedAndDirection,
        KeyCode::Char(']') => Command::ScaleAssembly(SCALE_STEP),
        KeyCode::Char('[') => Command::ScaleAssembly(1.0 / SCALE_STEP),
        _ => return None,
    };
    Some(Input::Command(command))
}

fn joint(joint: JointId, delta: f32) -> Command {
    Command::AdjustJoint { joint, delta }
}
