//! Runtime: the [`SchedulerDelegate`] that owns every collaborator.
//!
//! `main` builds one of these, then loops
//! `scheduler.tick(clock.now_ms(), &mut runtime)`.

use log::debug;

use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, DisplayPort, EventSink, SchedulerDelegate, SensorPort};
use crate::app::service::ChargeController;
use crate::net::board::StatusBoard;
use crate::scheduler::TaskId;

pub struct Runtime<H, D, S>
where
    H: SensorPort + ActuatorPort,
    D: DisplayPort,
    S: EventSink,
{
    controller: ChargeController,
    hw: H,
    display: D,
    board: Option<StatusBoard>,
    sink: S,
}

impl<H, D, S> Runtime<H, D, S>
where
    H: SensorPort + ActuatorPort,
    D: DisplayPort,
    S: EventSink,
{
    pub fn new(controller: ChargeController, hw: H, display: D, sink: S) -> Self {
        Self {
            controller,
            hw,
            display,
            board: None,
            sink,
        }
    }

    /// Put the outputs into their boot state.
    pub fn start(&mut self) {
        self.controller.start(&mut self.hw, &mut self.sink);
    }

    /// Start publishing to `board` once the status server on `port` is up.
    /// Stays unset when the device runs without network.
    pub fn attach_status_board(&mut self, board: StatusBoard, port: u16) {
        board.publish(self.controller.status());
        self.sink.emit(&AppEvent::ServerStarted { port });
        self.board = Some(board);
    }

    pub fn controller(&self) -> &ChargeController {
        &self.controller
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn status_board(&self) -> Option<&StatusBoard> {
        self.board.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<H, D, S> SchedulerDelegate for Runtime<H, D, S>
where
    H: SensorPort + ActuatorPort,
    D: DisplayPort,
    S: EventSink,
{
    /// Report requests the server answered since the last tick.
    fn service_network(&mut self, _now_ms: u32) {
        let Some(board) = &self.board else {
            return;
        };
        let sink = &mut self.sink;
        board.drain_served(|served| {
            sink.emit(&AppEvent::RequestServed {
                status: served.status,
                path: served.path,
            });
        });
    }

    fn on_task_due(&mut self, task: TaskId, now_ms: u32) {
        match task {
            TaskId::SensorPipeline => {
                let state = self.controller.run_sensor_pipeline(&mut self.hw, &mut self.sink);
                if let Some(board) = &self.board {
                    board.publish(self.controller.status());
                }
                debug!(
                    "tick {}ms: mode={:?} fan={}",
                    now_ms, state.mode, state.fan_on
                );
            }
            TaskId::DisplayRefresh => self.controller.refresh_display(&mut self.display),
        }
    }
}
