//! Host-side fakes for driving the scheduler

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use pressdrive_core::config::{ControlConfig, BOARD_AXES, DEFAULT_PULSE_US};
use pressdrive_core::scheduler::Scheduler;
use pressdrive_core::sensor::{SensorBank, ABP_015PG_5V};
use pressdrive_core::traits::{
    AnalogFrontEnd, CommandInput, Direction, MonotonicClock, StepperOutput, TelemetryOutput,
};

pub const FULL_SCALE_VOLTS: f32 = 6.144;

/// ADC code a healthy 0-15 psi transducer produces at `psi`
pub fn code_for_psi(psi: f32) -> i16 {
    let volts = 0.45 + psi / 15.0 * 4.3;
    (volts / FULL_SCALE_VOLTS * 32768.0).round() as i16
}

/// Order of channel reads across both front ends
pub type ReadLog = Rc<RefCell<Vec<(char, u8)>>>;

/// Front end whose channel codes the test can change between ticks
#[derive(Clone)]
pub struct SharedFrontEnd {
    pub tag: char,
    pub codes: Rc<RefCell<[i16; 3]>>,
    pub log: ReadLog,
}

impl SharedFrontEnd {
    pub fn new(tag: char, log: ReadLog) -> Self {
        Self {
            tag,
            codes: Rc::new(RefCell::new([code_for_psi(0.0); 3])),
            log,
        }
    }

    pub fn set_psi(&self, channel: usize, psi: f32) {
        self.codes.borrow_mut()[channel] = code_for_psi(psi);
    }
}

impl AnalogFrontEnd for SharedFrontEnd {
    fn read_raw(&mut self, channel: u8) -> i16 {
        self.log.borrow_mut().push((self.tag, channel));
        self.codes.borrow()[channel as usize]
    }

    fn full_scale_volts(&self) -> f32 {
        FULL_SCALE_VOLTS
    }
}

/// Stepper that records net position and every direction change
#[derive(Clone, Default)]
pub struct TrackingStepper {
    pub position: Rc<Cell<i64>>,
    pub pulses: Rc<Cell<u64>>,
    pub direction: Rc<Cell<Option<Direction>>>,
    pub released: Rc<Cell<u32>>,
}

impl StepperOutput for TrackingStepper {
    fn set_direction(&mut self, direction: Direction) {
        self.direction.set(Some(direction));
    }

    fn pulse(&mut self) {
        let sign = self.direction.get().map_or(0, |d| d.sign() as i64);
        self.position.set(self.position.get() + sign);
        self.pulses.set(self.pulses.get() + 1);
    }

    fn release(&mut self) {
        self.released.set(self.released.get() + 1);
    }

    fn pulse_period_us(&self) -> u64 {
        2 * DEFAULT_PULSE_US as u64
    }
}

/// Console fed from a byte queue, capturing every written line
#[derive(Clone, Default)]
pub struct LoopbackConsole {
    pub input: Rc<RefCell<VecDeque<u8>>>,
    pub lines: Rc<RefCell<Vec<String>>>,
}

impl LoopbackConsole {
    pub fn send(&self, text: &str) {
        self.input.borrow_mut().extend(text.bytes());
    }

    pub fn take_lines(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.borrow_mut())
    }
}

impl CommandInput for LoopbackConsole {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.borrow_mut().pop_front()
    }
}

impl TelemetryOutput for LoopbackConsole {
    fn write_line(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

/// Clock the test advances by hand
#[derive(Clone, Default)]
pub struct FakeClock(pub Rc<Cell<u64>>);

impl FakeClock {
    pub fn advance(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }
}

impl MonotonicClock for FakeClock {
    fn now_us(&mut self) -> u64 {
        self.0.get()
    }
}

pub type TestScheduler =
    Scheduler<SharedFrontEnd, SharedFrontEnd, TrackingStepper, LoopbackConsole, FakeClock>;

/// A scheduler on the standard board plus handles into its fakes
pub struct Rig {
    pub scheduler: TestScheduler,
    pub front_end_a: SharedFrontEnd,
    pub front_end_b: SharedFrontEnd,
    pub reads: ReadLog,
    pub steppers: [TrackingStepper; 6],
    pub console: LoopbackConsole,
    pub clock: FakeClock,
}

impl Rig {
    pub fn new() -> Self {
        Self::with_config(ControlConfig::default())
    }

    pub fn with_config(config: ControlConfig) -> Self {
        let log = ReadLog::default();
        let front_end_a = SharedFrontEnd::new('A', log.clone());
        let front_end_b = SharedFrontEnd::new('B', log.clone());
        let steppers: [TrackingStepper; 6] = Default::default();
        let console = LoopbackConsole::default();
        let clock = FakeClock::default();

        let scheduler = Scheduler::new(
            config,
            BOARD_AXES,
            SensorBank::new(front_end_a.clone(), front_end_b.clone(), ABP_015PG_5V),
            steppers.clone(),
            console.clone(),
            clock.clone(),
        )
        .expect("valid config");

        Self {
            scheduler,
            front_end_a,
            front_end_b,
            reads: log,
            steppers,
            console,
            clock,
        }
    }

    /// Set the pressure seen by axis `label` (1-6) through the board wiring
    pub fn set_axis_psi(&self, label: u8, psi: f32) {
        let sensor = BOARD_AXES[label as usize - 1].sensor;
        let front_end = match sensor.front_end {
            pressdrive_core::config::FrontEnd::A => &self.front_end_a,
            pressdrive_core::config::FrontEnd::B => &self.front_end_b,
        };
        front_end.set_psi(sensor.channel as usize, psi);
    }

    /// Let one tick period pass and poll once
    pub fn step_tick(&mut self) {
        self.clock
            .advance(self.scheduler.config().tick_period_us as u64);
        self.scheduler.poll();
    }

    pub fn position(&self, label: u8) -> i64 {
        self.steppers[label as usize - 1].position.get()
    }
}
