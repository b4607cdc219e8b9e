use std::sync::Arc;

use iced::window::Id;
use iced::{Element, Task};

use crate::core::models::{AppConfig, SessionMode};
use crate::core::orchestrators::{CaptureWorkflow, WorkflowMessage};
use crate::global_constants::LOG_TAG_APP;
use crate::ports::{
    ArboardClipboard, ScrotCaptureTool, SlopRegionSelector, SystemTray, XcapDisplayCapturer,
};
use crate::utils;

pub struct SnipApp {
    workflow: CaptureWorkflow,
    _tray: Option<SystemTray>,
}

impl SnipApp {
    pub fn build() -> (Self, Task<WorkflowMessage>) {
        log::info!("{} initializing application", LOG_TAG_APP);

        let mode = SessionMode::from_args(std::env::args());
        log::info!("{} session mode: {:?}", LOG_TAG_APP, mode);

        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("{} failed to load config: {}, using defaults", LOG_TAG_APP, e);
            AppConfig::default()
        });

        if let Err(e) = config.ensure_directories() {
            log::error!("{} cannot create required directories: {}", LOG_TAG_APP, e);
            std::process::exit(1);
        }

        if mode == SessionMode::TrayResident && !utils::ensure_single_instance() {
            log::error!("{} failed to claim single-instance lock", LOG_TAG_APP);
        }

        let tray = if mode == SessionMode::TrayResident && config.show_in_systray {
            match SystemTray::build() {
                Ok(tray) => {
                    log::info!("{} system tray initialized", LOG_TAG_APP);
                    Some(tray)
                }
                Err(e) => {
                    log::error!("{} failed to initialize system tray: {}", LOG_TAG_APP, e);
                    None
                }
            }
        } else {
            None
        };

        let workflow = CaptureWorkflow::build(
            Arc::new(SlopRegionSelector::initialize()),
            Arc::new(ScrotCaptureTool::initialize()),
            Arc::new(XcapDisplayCapturer::initialize()),
            Arc::new(ArboardClipboard::initialize()),
            config,
            mode,
        );

        let startup = match mode {
            SessionMode::OneShot => {
                log::info!("{} one-shot mode, starting capture immediately", LOG_TAG_APP);
                Task::done(WorkflowMessage::StartCapture)
            }
            SessionMode::TrayResident => Task::done(WorkflowMessage::CreateHiddenWindow),
        };

        (
            Self {
                workflow,
                _tray: tray,
            },
            startup,
        )
    }

    pub fn handle_update(&mut self, message: WorkflowMessage) -> Task<WorkflowMessage> {
        self.workflow.update(message)
    }

    pub fn render_view(&self, window_id: Id) -> Element<'_, WorkflowMessage> {
        self.workflow.render_view(window_id)
    }

    pub fn handle_subscription(&self) -> iced::Subscription<WorkflowMessage> {
        use iced::window;

        iced::Subscription::batch([
            iced::event::listen_with(|event, _status, id| {
                if let iced::Event::Window(window::Event::Closed) = event {
                    return Some(WorkflowMessage::WindowClosed(id));
                }
                None
            }),
            iced::Subscription::run(|| {
                iced::stream::channel(
                    10,
                    |mut output: futures::channel::mpsc::Sender<WorkflowMessage>| async move {
                        loop {
                            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                            if let Some(event) = SystemTray::poll_events() {
                                let _ = output.try_send(WorkflowMessage::TrayEvent(event));
                            }
                        }
                    },
                )
            }),
        ])
    }
}
