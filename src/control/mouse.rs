use std::thread;
use std::time::Duration;

use crate::desktop::{Direction, InputDriver, MouseButton, Point};
use crate::error::{ControlError, Result};

/// Spacing of intermediate positions while gliding
const GLIDE_STEP: Duration = Duration::from_millis(10);

/// Convert a caller-supplied duration in seconds, treating negative or
/// NaN values as "instant". Values too large for a `Duration` are rejected.
pub fn seconds(value: f64) -> Result<Duration> {
    if value.is_nan() || value <= 0.0 {
        return Ok(Duration::ZERO);
    }
    Duration::try_from_secs_f64(value)
        .map_err(|_| ControlError::invalid(format!("Duration out of range: {}", value)))
}

/// Move the cursor from its current position to `target`, interpolating
/// linearly over `duration`. A zero duration jumps straight there.
pub fn glide(input: &dyn InputDriver, target: Point, duration: Duration) -> Result<()> {
    if duration.is_zero() {
        return input.move_to(target.x, target.y);
    }

    let start = input.position()?;
    let steps = (duration.as_millis() / GLIDE_STEP.as_millis()).max(1) as u32;
    let pause = duration / steps;

    for step in 1..=steps {
        let t = f64::from(step) / f64::from(steps);
        let x = f64::from(start.x) + (f64::from(target.x) - f64::from(start.x)) * t;
        let y = f64::from(start.y) + (f64::from(target.y) - f64::from(start.y)) * t;
        input.move_to(x.round() as i32, y.round() as i32)?;
        if step < steps {
            thread::sleep(pause);
        }
    }
    Ok(())
}

/// Absolute move; returns the requested target
pub fn move_to(input: &dyn InputDriver, x: i32, y: i32, duration: Duration) -> Result<Point> {
    let target = Point::new(x, y);
    glide(input, target, duration)?;
    Ok(target)
}

/// Relative move; returns the position actually reached
pub fn move_relative(input: &dyn InputDriver, dx: i32, dy: i32, duration: Duration) -> Result<Point> {
    let current = input.position()?;
    let target = match (current.x.checked_add(dx), current.y.checked_add(dy)) {
        (Some(x), Some(y)) => Point::new(x, y),
        _ => {
            return Err(ControlError::invalid(format!(
                "Relative move ({}, {}) leaves the coordinate range",
                dx, dy
            )))
        }
    };
    glide(input, target, duration)?;
    input.position()
}

/// Move to the given point first if either coordinate is present.
/// A missing coordinate keeps its current value.
fn move_if_given(input: &dyn InputDriver, x: Option<i32>, y: Option<i32>) -> Result<()> {
    if x.is_none() && y.is_none() {
        return Ok(());
    }
    let current = input.position()?;
    input.move_to(x.unwrap_or(current.x), y.unwrap_or(current.y))
}

/// Click `clicks` times with `button`, at (x, y) or at the current position.
pub fn click(
    input: &dyn InputDriver,
    x: Option<i32>,
    y: Option<i32>,
    button: MouseButton,
    clicks: u32,
) -> Result<()> {
    move_if_given(input, x, y)?;
    for _ in 0..clicks {
        input.button(button, Direction::Click)?;
    }
    Ok(())
}

pub fn double_click(input: &dyn InputDriver, x: Option<i32>, y: Option<i32>) -> Result<()> {
    click(input, x, y, MouseButton::Left, 2)
}

pub fn right_click(input: &dyn InputDriver, x: Option<i32>, y: Option<i32>) -> Result<()> {
    click(input, x, y, MouseButton::Right, 1)
}

/// Jump to `from`, hold `button`, glide to `to`, release.
/// The button is released even when the glide fails.
pub fn drag(
    input: &dyn InputDriver,
    from: Point,
    to: Point,
    duration: Duration,
    button: MouseButton,
) -> Result<()> {
    input.move_to(from.x, from.y)?;
    input.button(button, Direction::Press)?;
    let moved = glide(input, to, duration);
    let released = input.button(button, Direction::Release);
    moved.and(released)
}

/// Wheel scroll, optionally after moving to (x, y). Positive scrolls up.
pub fn scroll(input: &dyn InputDriver, clicks: i32, x: Option<i32>, y: Option<i32>) -> Result<()> {
    move_if_given(input, x, y)?;
    input.scroll(clicks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desktop::{InputEvent, VirtualDesktop};

    #[test]
    fn test_seconds_rejects_nonsense() {
        assert_eq!(seconds(-1.0), Ok(Duration::ZERO));
        assert_eq!(seconds(f64::NAN), Ok(Duration::ZERO));
        assert_eq!(seconds(0.25), Ok(Duration::from_millis(250)));
    }

    #[test]
    fn test_seconds_out_of_range_is_invalid_input() {
        assert!(matches!(seconds(1e20), Err(ControlError::InvalidInput(_))));
        assert!(matches!(seconds(f64::INFINITY), Err(ControlError::InvalidInput(_))));
    }

    #[test]
    fn test_move_relative_overflow_is_invalid_input() {
        let desktop = VirtualDesktop::new();
        desktop.move_to(960, 540).unwrap();
        let result = move_relative(&desktop, i32::MAX, 0, Duration::ZERO);
        assert!(matches!(result, Err(ControlError::InvalidInput(_))));
        assert_eq!(desktop.cursor(), Point::new(960, 540));
    }

    #[test]
    fn test_glide_across_full_coordinate_range() {
        let desktop = VirtualDesktop::new();
        desktop.move_to(0, 0).unwrap();
        glide(&desktop, Point::new(i32::MIN, i32::MAX), Duration::from_millis(20)).unwrap();
        assert_eq!(desktop.cursor(), Point::new(0, 1079));
    }

    #[test]
    fn test_instant_move_is_single_event() {
        let desktop = VirtualDesktop::new();
        move_to(&desktop, 10, 20, Duration::ZERO).unwrap();
        assert_eq!(desktop.events(), vec![InputEvent::Move(Point::new(10, 20))]);
    }

    #[test]
    fn test_glide_ends_on_target() {
        let desktop = VirtualDesktop::new();
        desktop.move_to(0, 0).unwrap();
        glide(&desktop, Point::new(100, 50), Duration::from_millis(50)).unwrap();

        let moves = desktop
            .events()
            .into_iter()
            .filter(|e| matches!(e, InputEvent::Move(_)))
            .count();
        assert!(moves > 2, "expected intermediate moves, got {}", moves);
        assert_eq!(desktop.cursor(), Point::new(100, 50));
    }

    #[test]
    fn test_click_without_coordinates_stays_put() {
        let desktop = VirtualDesktop::new();
        desktop.move_to(5, 5).unwrap();
        click(&desktop, None, None, MouseButton::Left, 2).unwrap();
        assert_eq!(desktop.cursor(), Point::new(5, 5));
        assert_eq!(
            desktop.events()[1..],
            [
                InputEvent::Button(MouseButton::Left, Direction::Click),
                InputEvent::Button(MouseButton::Left, Direction::Click),
            ]
        );
    }

    #[test]
    fn test_click_with_one_coordinate_keeps_the_other() {
        let desktop = VirtualDesktop::new();
        desktop.move_to(5, 7).unwrap();
        click(&desktop, Some(40), None, MouseButton::Left, 1).unwrap();
        assert_eq!(desktop.cursor(), Point::new(40, 7));
    }

    #[test]
    fn test_drag_presses_and_releases() {
        let desktop = VirtualDesktop::new();
        drag(&desktop, Point::new(1, 1), Point::new(30, 40), Duration::ZERO, MouseButton::Left).unwrap();
        let events = desktop.events();
        assert_eq!(events.first(), Some(&InputEvent::Move(Point::new(1, 1))));
        assert_eq!(events[1], InputEvent::Button(MouseButton::Left, Direction::Press));
        assert_eq!(events.last(), Some(&InputEvent::Button(MouseButton::Left, Direction::Release)));
        assert_eq!(desktop.cursor(), Point::new(30, 40));
    }

    #[test]
    fn test_move_relative_reports_new_position() {
        let desktop = VirtualDesktop::new();
        desktop.move_to(100, 100).unwrap();
        let pos = move_relative(&desktop, -10, 25, Duration::ZERO).unwrap();
        assert_eq!(pos, Point::new(90, 125));
    }
}
