//! Command application across all axes

use pressdrive_protocol::{AxisId, Command, Response, AXIS_COUNT};

use crate::axis::{Axis, AxisEvent};
use crate::config::{AxisConfig, ControlPolicy};
use crate::sensor::SensorReadings;

/// The six axes and the rules for mutating them
#[derive(Debug, Clone)]
pub struct AxisController {
    axes: [Axis; AXIS_COUNT],
    steps_per_tick: u32,
}

impl AxisController {
    /// Create a controller with every axis idle
    pub fn new(
        wiring: &[AxisConfig; AXIS_COUNT],
        policy: ControlPolicy,
        steps_per_tick: u32,
    ) -> Self {
        Self {
            axes: core::array::from_fn(|i| Axis::new(AxisId::ALL[i], wiring[i], policy)),
            steps_per_tick,
        }
    }

    /// Get one axis
    pub fn axis(&self, id: AxisId) -> &Axis {
        &self.axes[id.index()]
    }

    /// Get all axes in index order
    pub fn axes(&self) -> &[Axis; AXIS_COUNT] {
        &self.axes
    }

    /// Wiring of every axis in index order
    pub fn wiring(&self) -> [AxisConfig; AXIS_COUNT] {
        core::array::from_fn(|i| *self.axes[i].config())
    }

    /// Step budget per axis per tick
    pub fn steps_per_tick(&self) -> u32 {
        self.steps_per_tick
    }

    /// Check if every axis is idle
    pub fn all_idle(&self) -> bool {
        self.axes.iter().all(Axis::is_idle)
    }

    /// Apply a parsed command and produce its acknowledgment
    ///
    /// A rejected command leaves every axis unchanged.
    pub fn apply(&mut self, command: Command) -> Response {
        match command {
            Command::StopAll => {
                self.stop_all();
                Response::Stopped
            }
            Command::ManualMove { axis, steps } => {
                match self.axes[axis.index()].set_manual_move(steps) {
                    Ok(()) => Response::MoveAccepted { axis, steps },
                    Err(e) => Response::Rejected(e),
                }
            }
            Command::SetPressure { axis, target_psi } => {
                match self.axes[axis.index()].set_pressure_target(target_psi) {
                    Ok(()) => Response::TargetSet { axis, target_psi },
                    Err(e) => Response::Rejected(e),
                }
            }
        }
    }

    /// Put every axis in idle
    pub fn stop_all(&mut self) {
        for axis in self.axes.iter_mut() {
            axis.stop();
        }
    }

    /// Advance one axis using its latest reading
    pub fn advance_axis(&mut self, id: AxisId, readings: &SensorReadings) -> AxisEvent {
        let budget = self.steps_per_tick;
        self.axes[id.index()].advance(readings.get(id), budget)
    }

    /// Advance every axis in index order
    pub fn advance_all(&mut self, readings: &SensorReadings) -> [AxisEvent; AXIS_COUNT] {
        let mut events = [AxisEvent::NoOp; AXIS_COUNT];
        for id in AxisId::ALL {
            events[id.index()] = self.advance_axis(id, readings);
        }
        events
    }

    /// Operator line announcing a completion, if the event is one
    pub fn completion_response(id: AxisId, event: &AxisEvent) -> Option<Response> {
        match event {
            AxisEvent::ReachedTarget(psi) => Some(Response::TargetReached { axis: id, psi: *psi }),
            AxisEvent::ManualComplete(_) => Some(Response::ManualComplete { axis: id }),
            AxisEvent::NoOp | AxisEvent::Step(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisMode;
    use crate::config::BOARD_AXES;
    use crate::traits::{Direction, StepBurst};
    use pressdrive_protocol::{parse_command, CommandError};

    fn controller() -> AxisController {
        AxisController::new(&BOARD_AXES, ControlPolicy::default(), 10)
    }

    fn apply_line(controller: &mut AxisController, line: &str) -> Response {
        let range = ControlPolicy::default().target_range;
        match parse_command(line, &range) {
            Ok(command) => controller.apply(command),
            Err(e) => Response::Rejected(e),
        }
    }

    fn id(label: u8) -> AxisId {
        AxisId::from_label(label).unwrap()
    }

    #[test]
    fn test_apply_set_pressure() {
        let mut ctl = controller();
        let response = apply_line(&mut ctl, "P3-5.00");
        assert_eq!(
            response,
            Response::TargetSet {
                axis: id(3),
                target_psi: 5.0
            }
        );
        assert_eq!(
            ctl.axis(id(3)).mode(),
            AxisMode::PressureSeeking { target_psi: 5.0 }
        );
        assert!(ctl.axis(id(1)).is_idle());
    }

    #[test]
    fn test_apply_manual_move() {
        let mut ctl = controller();
        let response = apply_line(&mut ctl, "M2+25");
        assert_eq!(response.to_line().as_str(), "MOV: M2 +25 steps");
        assert_eq!(
            ctl.axis(id(2)).mode(),
            AxisMode::ManualStepping { remaining: 25 }
        );
    }

    #[test]
    fn test_stop_all_from_any_mode() {
        let mut ctl = controller();
        apply_line(&mut ctl, "P1-5");
        apply_line(&mut ctl, "M2-30");
        apply_line(&mut ctl, "M6+1");

        assert_eq!(apply_line(&mut ctl, "stop"), Response::Stopped);
        assert!(ctl.all_idle());
        assert_eq!(apply_line(&mut ctl, "STOP"), Response::Stopped);
        assert!(ctl.all_idle());
    }

    #[test]
    fn test_rejected_commands_change_nothing() {
        let mut ctl = controller();
        apply_line(&mut ctl, "P4-7.25");
        apply_line(&mut ctl, "M5-40");
        let before = ctl.clone();

        for (line, error) in [
            ("P4-99", CommandError::OutOfRange),
            ("M5+0", CommandError::InvalidStepCount),
            ("M8+10", CommandError::InvalidAxis),
            ("hello", CommandError::MalformedCommand),
        ] {
            assert_eq!(apply_line(&mut ctl, line), Response::Rejected(error));
        }

        for id in AxisId::ALL {
            assert_eq!(ctl.axis(id).mode(), before.axis(id).mode());
        }
    }

    #[test]
    fn test_advance_all_uses_own_reading() {
        let mut ctl = controller();
        apply_line(&mut ctl, "P1-5");
        apply_line(&mut ctl, "P2-5");

        let readings = SensorReadings::new([3.0, 8.0, 0.0, 0.0, 0.0, 0.0]);
        let events = ctl.advance_all(&readings);

        assert_eq!(
            events[0],
            AxisEvent::Step(StepBurst::new(Direction::Forward, 10))
        );
        assert_eq!(
            events[1],
            AxisEvent::Step(StepBurst::new(Direction::Reverse, 10))
        );
        for event in &events[2..] {
            assert_eq!(*event, AxisEvent::NoOp);
        }
    }

    #[test]
    fn test_wiring_comes_from_axes() {
        let ctl = controller();
        assert_eq!(ctl.wiring(), BOARD_AXES);
        for id in AxisId::ALL {
            assert_eq!(ctl.wiring()[id.index()], *ctl.axis(id).config());
        }
    }

    #[test]
    fn test_completion_responses() {
        let reached = AxisController::completion_response(id(1), &AxisEvent::ReachedTarget(5.02));
        assert_eq!(
            reached,
            Some(Response::TargetReached {
                axis: id(1),
                psi: 5.02
            })
        );

        let burst = StepBurst::new(Direction::Forward, 5);
        let manual = AxisController::completion_response(id(2), &AxisEvent::ManualComplete(burst));
        assert_eq!(manual, Some(Response::ManualComplete { axis: id(2) }));

        assert_eq!(
            AxisController::completion_response(id(2), &AxisEvent::Step(burst)),
            None
        );
    }
}
