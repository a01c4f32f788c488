//! Control loop executor
//!
//! One call to [`Scheduler::poll`] is one pass of the main loop:
//!
//! 1. Drain console bytes until a line completes (at most one command)
//! 2. If a full tick period has elapsed since the last tick:
//!    - sample all six pressure channels
//!    - emit the reading line
//!    - advance every axis in index order and pulse its stepper
//!
//! Step pulses block, so a tick takes as long as its bursts take.

use pressdrive_protocol::{
    format_readings, parse_command, AxisId, CommandError, LineBuffer, Response, AXIS_COUNT,
    HEADER_LINES,
};

use super::controller::AxisController;
use crate::config::{AxisConfig, ConfigError, ControlConfig};
use crate::sensor::{SensorBank, SensorReadings};
use crate::traits::{
    AnalogFrontEnd, CommandInput, MonotonicClock, StepperOutput, TelemetryOutput,
};

/// What happened during one [`Scheduler::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollOutcome {
    /// Acknowledgment of the command handled this pass, if any
    pub command: Option<Response>,
    /// Whether a control tick ran
    pub ticked: bool,
}

/// Single-threaded cooperative control loop
///
/// Generic over the two analog front ends `A`/`B`, the stepper outputs `S`,
/// the console `C` and the clock `K`.
pub struct Scheduler<A, B, S, C, K> {
    config: ControlConfig,
    controller: AxisController,
    sensors: SensorBank<A, B>,
    outputs: [S; AXIS_COUNT],
    console: C,
    clock: K,
    line: LineBuffer,
    readings: SensorReadings,
    last_tick_us: u64,
    ticks: u32,
}

impl<A, B, S, C, K> Scheduler<A, B, S, C, K>
where
    A: AnalogFrontEnd,
    B: AnalogFrontEnd,
    S: StepperOutput,
    C: CommandInput + TelemetryOutput,
    K: MonotonicClock,
{
    /// Create a scheduler with every axis idle
    ///
    /// `outputs[i]` drives the axis wired by `wiring[i]`. Fails if the
    /// configuration is invalid or if any output's pulse period would let
    /// one burst outlast a tick.
    pub fn new(
        config: ControlConfig,
        wiring: [AxisConfig; AXIS_COUNT],
        sensors: SensorBank<A, B>,
        outputs: [S; AXIS_COUNT],
        console: C,
        clock: K,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        for output in outputs.iter() {
            config.check_pulse_period(output.pulse_period_us())?;
        }

        Ok(Self {
            config,
            controller: AxisController::new(&wiring, config.policy, config.steps_per_tick),
            sensors,
            outputs,
            console,
            clock,
            line: LineBuffer::new(),
            readings: SensorReadings::default(),
            last_tick_us: 0,
            ticks: 0,
        })
    }

    /// Print the banner, drive all outputs low and start the tick clock
    pub fn start(&mut self) {
        for header in HEADER_LINES {
            self.console.write_line(header);
        }
        for output in self.outputs.iter_mut() {
            output.release();
        }
        self.last_tick_us = self.clock.now_us();

        info!(
            "Control loop started: {} steps/tick, {} us period",
            self.config.steps_per_tick,
            self.config.tick_period_us
        );
    }

    /// Run one pass of the main loop
    pub fn poll(&mut self) -> PollOutcome {
        let command = self.service_console();

        let now = self.clock.now_us();
        let elapsed = now.saturating_sub(self.last_tick_us);
        let period = self.config.tick_period_us as u64;

        let ticked = elapsed >= period;
        if ticked {
            if elapsed >= 2 * period {
                warn!("Tick overrun: {} us since last tick", elapsed);
            }
            // Missed ticks are dropped rather than replayed
            self.last_tick_us = now;
            self.tick();
        }

        PollOutcome { command, ticked }
    }

    /// Start and loop forever
    pub fn run(mut self) -> ! {
        self.start();
        loop {
            self.poll();
        }
    }

    /// Run one control tick immediately
    pub fn tick(&mut self) {
        self.sensors
            .sample(&self.controller.wiring(), &mut self.readings);

        let line = format_readings(self.readings.as_array());
        self.console.write_line(&line);

        for id in AxisId::ALL {
            let event = self.controller.advance_axis(id, &self.readings);
            if let Some(burst) = event.burst() {
                trace!("Axis {}: {} steps", id.label(), burst.signed_steps());
                self.outputs[id.index()].emit_burst(burst);
            }
            if let Some(response) = AxisController::completion_response(id, &event) {
                info!("Axis {} finished", id.label());
                self.console.write_line(&response.to_line());
            }
        }

        self.ticks = self.ticks.wrapping_add(1);
    }

    /// Handle a single command line as if it had arrived on the console
    pub fn execute_line(&mut self, line: &str) -> Response {
        let response = match parse_command(line, &self.config.policy.target_range) {
            Ok(command) => {
                let response = self.controller.apply(command);
                if response == Response::Stopped {
                    for output in self.outputs.iter_mut() {
                        output.release();
                    }
                }
                response
            }
            Err(e) => Response::Rejected(e),
        };

        match response {
            Response::Rejected(e) => warn!("Command rejected: {}", e),
            _ => debug!("Command applied"),
        }
        self.console.write_line(&response.to_line());
        response
    }

    fn service_console(&mut self) -> Option<Response> {
        while let Some(byte) = self.console.read_byte() {
            match self.line.feed(byte) {
                Ok(Some(line)) => return Some(self.execute_line(&line)),
                Ok(None) => {}
                Err(e) => {
                    warn!("Discarded command line: {}", e);
                    let response = Response::Rejected(CommandError::MalformedCommand);
                    self.console.write_line(&response.to_line());
                    return Some(response);
                }
            }
        }
        None
    }

    /// Get the configuration
    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    /// Get the most recent readings
    pub fn readings(&self) -> &SensorReadings {
        &self.readings
    }

    /// Get the axis controller
    pub fn controller(&self) -> &AxisController {
        &self.controller
    }

    /// Number of ticks run since creation
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Get the console
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Get mutable access to the console
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Get mutable access to the clock
    pub fn clock_mut(&mut self) -> &mut K {
        &mut self.clock
    }

    /// Get the stepper outputs
    pub fn outputs(&self) -> &[S; AXIS_COUNT] {
        &self.outputs
    }

    /// Get mutable access to the sensor bank
    pub fn sensors_mut(&mut self) -> &mut SensorBank<A, B> {
        &mut self.sensors
    }
}
