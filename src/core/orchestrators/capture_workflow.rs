use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::{container, text, Space};
use iced::window::{self, Id};
use iced::{Element, Point, Size, Task};

use crate::core::interfaces::ports::{CaptureTool, ClipboardPort, DisplayCapturer, RegionSelector};
use crate::core::models::{AppConfig, Bitmap, CaptureResult, Region, SessionMode};
use crate::errors::{AcquireError, CaptureError};
use crate::global_constants::{LOG_TAG_WORKFLOW, NOTICE_NO_PREVIOUS_REGION};
use crate::ports::TrayEvent;
use crate::presentation::{ReviewAction, ReviewOverlay, ReviewOverlayMessage};
use crate::utils;

/// Everything a finished capture hands to the review overlay.
#[derive(Clone)]
pub struct ReviewPayload {
    pub capture: CaptureResult,
    pub background: Option<Bitmap>,
}

impl std::fmt::Debug for ReviewPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewPayload")
            .field("capture", &self.capture)
            .field("has_background", &self.background.is_some())
            .finish()
    }
}

/// Exactly one capture session exists at any time. `Reviewing` owns the
/// overlay, so a second overlay cannot appear while one is up.
pub enum WorkflowState {
    Idle,
    AcquiringRegion,
    Capturing,
    Reviewing {
        window_id: Id,
        overlay: ReviewOverlay,
    },
}

impl WorkflowState {
    fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "Idle",
            WorkflowState::AcquiringRegion => "AcquiringRegion",
            WorkflowState::Capturing => "Capturing",
            WorkflowState::Reviewing { .. } => "Reviewing",
        }
    }
}

#[derive(Clone)]
pub enum WorkflowMessage {
    CreateHiddenWindow,
    StartCapture,
    StartCaptureWithPreviousRegion,
    RegionAcquired(Result<Region, AcquireError>),
    CaptureFinished(Result<ReviewPayload, CaptureError>),
    OverlayAction(Id, ReviewAction),
    WindowClosed(Id),
    TrayEvent(TrayEvent),
    Quit,
}

impl std::fmt::Debug for WorkflowMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowMessage::CreateHiddenWindow => write!(f, "CreateHiddenWindow"),
            WorkflowMessage::StartCapture => write!(f, "StartCapture"),
            WorkflowMessage::StartCaptureWithPreviousRegion => {
                write!(f, "StartCaptureWithPreviousRegion")
            }
            WorkflowMessage::RegionAcquired(result) => write!(f, "RegionAcquired({:?})", result),
            WorkflowMessage::CaptureFinished(result) => {
                write!(f, "CaptureFinished(ok: {})", result.is_ok())
            }
            WorkflowMessage::OverlayAction(id, action) => {
                write!(f, "OverlayAction({:?}, {:?})", id, action)
            }
            WorkflowMessage::WindowClosed(id) => write!(f, "WindowClosed({:?})", id),
            WorkflowMessage::TrayEvent(event) => write!(f, "TrayEvent({:?})", event),
            WorkflowMessage::Quit => write!(f, "Quit"),
        }
    }
}

pub struct CaptureWorkflow {
    region_selector: Arc<dyn RegionSelector>,
    capture_tool: Arc<dyn CaptureTool>,
    display_capturer: Arc<dyn DisplayCapturer>,
    clipboard: Arc<dyn ClipboardPort>,
    config: AppConfig,
    mode: SessionMode,
    state: WorkflowState,
    hidden_window_id: Option<Id>,
    status: String,
}

impl CaptureWorkflow {
    pub fn build(
        region_selector: Arc<dyn RegionSelector>,
        capture_tool: Arc<dyn CaptureTool>,
        display_capturer: Arc<dyn DisplayCapturer>,
        clipboard: Arc<dyn ClipboardPort>,
        config: AppConfig,
        mode: SessionMode,
    ) -> Self {
        Self {
            region_selector,
            capture_tool,
            display_capturer,
            clipboard,
            config,
            mode,
            state: WorkflowState::Idle,
            hidden_window_id: None,
            status: "Ready".to_string(),
        }
    }

    pub fn update(&mut self, message: WorkflowMessage) -> Task<WorkflowMessage> {
        log::info!("{} received message: {:?}", LOG_TAG_WORKFLOW, message);

        match message {
            WorkflowMessage::CreateHiddenWindow => self.create_hidden_window(),
            WorkflowMessage::StartCapture => self.handle_start_capture(),
            WorkflowMessage::StartCaptureWithPreviousRegion => {
                self.handle_start_capture_with_previous_region()
            }
            WorkflowMessage::RegionAcquired(result) => self.handle_region_acquired(result),
            WorkflowMessage::CaptureFinished(result) => self.handle_capture_finished(result),
            WorkflowMessage::OverlayAction(window_id, action) => {
                self.handle_overlay_action(window_id, action)
            }
            WorkflowMessage::WindowClosed(id) => self.handle_window_closed(id),
            WorkflowMessage::TrayEvent(event) => self.handle_tray_event(event),
            WorkflowMessage::Quit => {
                log::info!("{} quit requested", LOG_TAG_WORKFLOW);
                iced::exit()
            }
        }
    }

    pub fn render_view(&self, window_id: Id) -> Element<'_, WorkflowMessage> {
        if let WorkflowState::Reviewing {
            window_id: overlay_id,
            overlay,
        } = &self.state
        {
            if *overlay_id == window_id {
                return overlay
                    .render_ui()
                    .map(move |ReviewOverlayMessage::ActionRequested(action)| {
                        WorkflowMessage::OverlayAction(window_id, action)
                    });
            }
        }

        if Some(window_id) == self.hidden_window_id {
            return container(Space::new()).into();
        }

        text(self.status.as_str()).into()
    }

    fn create_hidden_window(&mut self) -> Task<WorkflowMessage> {
        if self.hidden_window_id.is_some() {
            return Task::none();
        }

        log::info!(
            "{} creating hidden background window to keep the daemon alive",
            LOG_TAG_WORKFLOW
        );

        let (id, task) = window::open(window::Settings {
            size: Size::new(1.0, 1.0),
            position: window::Position::Specific(Point::new(-10000.0, -10000.0)),
            visible: false,
            resizable: false,
            decorations: false,
            ..Default::default()
        });

        self.hidden_window_id = Some(id);
        task.discard()
    }

    fn handle_start_capture(&mut self) -> Task<WorkflowMessage> {
        if !matches!(self.state, WorkflowState::Idle) {
            log::warn!(
                "{} capture trigger ignored, session already in state {}",
                LOG_TAG_WORKFLOW,
                self.state.name()
            );
            return Task::none();
        }

        log::info!("{} starting region selection", LOG_TAG_WORKFLOW);
        self.state = WorkflowState::AcquiringRegion;
        self.status = "Select a region...".to_string();

        let region_selector = Arc::clone(&self.region_selector);
        Task::future(async move {
            WorkflowMessage::RegionAcquired(region_selector.select_region())
        })
    }

    fn handle_start_capture_with_previous_region(&mut self) -> Task<WorkflowMessage> {
        if !matches!(self.state, WorkflowState::Idle) {
            log::warn!(
                "{} capture trigger ignored, session already in state {}",
                LOG_TAG_WORKFLOW,
                self.state.name()
            );
            return Task::none();
        }

        // Skips the interactive selector entirely; the saved geometry is
        // reused whether or not anything on screen still matches it.
        self.state = WorkflowState::AcquiringRegion;
        Task::done(WorkflowMessage::RegionAcquired(
            self.config.load_last_region(),
        ))
    }

    fn handle_region_acquired(
        &mut self,
        result: Result<Region, AcquireError>,
    ) -> Task<WorkflowMessage> {
        if !matches!(self.state, WorkflowState::AcquiringRegion) {
            log::warn!(
                "{} stray region result in state {}, dropping it",
                LOG_TAG_WORKFLOW,
                self.state.name()
            );
            return Task::none();
        }

        match result {
            Ok(region) => {
                log::info!("{} region acquired: {}", LOG_TAG_WORKFLOW, region);
                if let Err(e) = self.config.save_region(&region) {
                    log::warn!(
                        "{} failed to persist selected region: {}",
                        LOG_TAG_WORKFLOW,
                        e
                    );
                }
                self.begin_capture(region)
            }
            Err(AcquireError::Cancelled) => {
                log::info!("{} region selection cancelled", LOG_TAG_WORKFLOW);
                self.abort_session(None)
            }
            Err(AcquireError::NoSavedRegion) => {
                self.abort_session(Some(NOTICE_NO_PREVIOUS_REGION.to_string()))
            }
            Err(e) => self.abort_session(Some(format!("region selection failed: {}", e))),
        }
    }

    fn begin_capture(&mut self, region: Region) -> Task<WorkflowMessage> {
        self.state = WorkflowState::Capturing;
        self.status = "Capturing...".to_string();

        let capture_tool = Arc::clone(&self.capture_tool);
        let display_capturer = Arc::clone(&self.display_capturer);
        let want_background = self.config.no_compositor_mode;
        let dest = utils::timestamped_screenshot_path(&self.config.screenshot_folder);

        Task::future(async move {
            WorkflowMessage::CaptureFinished(perform_capture(
                capture_tool.as_ref(),
                display_capturer.as_ref(),
                &region,
                dest,
                want_background,
            ))
        })
    }

    fn handle_capture_finished(
        &mut self,
        result: Result<ReviewPayload, CaptureError>,
    ) -> Task<WorkflowMessage> {
        if !matches!(self.state, WorkflowState::Capturing) {
            log::warn!(
                "{} stray capture result in state {}, dropping it",
                LOG_TAG_WORKFLOW,
                self.state.name()
            );
            return Task::none();
        }

        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                return self.abort_session(Some(format!("capture failed: {}", e)));
            }
        };

        log::info!(
            "{} capture complete: {} ({}x{})",
            LOG_TAG_WORKFLOW,
            payload.capture.file_path.display(),
            payload.capture.bitmap.width,
            payload.capture.bitmap.height
        );

        let (position, size) = self.review_window_geometry();
        let (id, task) = window::open(window::Settings {
            position,
            size,
            transparent: true,
            decorations: false,
            level: window::Level::AlwaysOnTop,
            ..Default::default()
        });

        let overlay = ReviewOverlay::build(
            payload.capture,
            payload.background,
            self.config.screenshot_folder.clone(),
            self.config.custom_string.clone(),
        );
        self.state = WorkflowState::Reviewing {
            window_id: id,
            overlay,
        };
        self.status = "Reviewing capture".to_string();
        log::info!("{} review window created with ID: {:?}", LOG_TAG_WORKFLOW, id);

        task.discard().chain(window::gain_focus(id))
    }

    fn review_window_geometry(&self) -> (window::Position, Size) {
        match self.display_capturer.primary_display_geometry() {
            Ok((x, y, width, height)) => (
                window::Position::Specific(Point::new(x as f32, y as f32)),
                Size::new(width as f32, height as f32),
            ),
            Err(e) => {
                log::warn!(
                    "{} failed to read display geometry, using defaults: {}",
                    LOG_TAG_WORKFLOW,
                    e
                );
                (
                    window::Position::Specific(Point::new(0.0, 0.0)),
                    Size::new(1920.0, 1080.0),
                )
            }
        }
    }

    fn handle_overlay_action(&mut self, window_id: Id, action: ReviewAction) -> Task<WorkflowMessage> {
        let previous = std::mem::replace(&mut self.state, WorkflowState::Idle);
        let (overlay_id, mut overlay) = match previous {
            WorkflowState::Reviewing {
                window_id: overlay_id,
                overlay,
            } if overlay_id == window_id => (overlay_id, overlay),
            other => {
                log::warn!(
                    "{} overlay action {:?} for unknown window {:?} in state {}",
                    LOG_TAG_WORKFLOW,
                    action,
                    window_id,
                    other.name()
                );
                self.state = other;
                return Task::none();
            }
        };

        if let Some(aftermath) = overlay.execute(action, self.clipboard.as_ref()) {
            if let Some(warning) = aftermath.warning {
                self.status = warning;
            } else {
                self.status = "Ready".to_string();
            }
        }

        let close_task = window::close(overlay_id);
        if self.mode.exits_after_action() {
            log::info!("{} one-shot session done, exiting", LOG_TAG_WORKFLOW);
            return close_task.chain(iced::exit());
        }
        close_task
    }

    fn handle_window_closed(&mut self, id: Id) -> Task<WorkflowMessage> {
        log::info!("{} window closed: {:?}", LOG_TAG_WORKFLOW, id);

        if Some(id) == self.hidden_window_id {
            log::warn!(
                "{} hidden window closed unexpectedly, recreating",
                LOG_TAG_WORKFLOW
            );
            self.hidden_window_id = None;
            return self.create_hidden_window();
        }

        // A review window killed by the window manager counts as a cancel.
        if let WorkflowState::Reviewing { window_id, .. } = &self.state {
            if *window_id == id {
                let previous = std::mem::replace(&mut self.state, WorkflowState::Idle);
                if let WorkflowState::Reviewing { mut overlay, .. } = previous {
                    overlay.execute(ReviewAction::Cancel, self.clipboard.as_ref());
                }
                self.status = "Ready".to_string();
                if self.mode.exits_after_action() {
                    return iced::exit();
                }
            }
        }
        Task::none()
    }

    fn handle_tray_event(&mut self, event: TrayEvent) -> Task<WorkflowMessage> {
        log::info!("{} tray event: {:?}", LOG_TAG_WORKFLOW, event);
        match event {
            TrayEvent::Capture => self.update(WorkflowMessage::StartCapture),
            TrayEvent::CaptureWithPreviousRegion => {
                self.update(WorkflowMessage::StartCaptureWithPreviousRegion)
            }
            TrayEvent::Quit => self.update(WorkflowMessage::Quit),
        }
    }

    fn abort_session(&mut self, notice: Option<String>) -> Task<WorkflowMessage> {
        self.state = WorkflowState::Idle;
        if let Some(notice) = notice {
            log::warn!("{} session aborted: {}", LOG_TAG_WORKFLOW, notice);
            self.status = notice;
        } else {
            self.status = "Ready".to_string();
        }

        if self.mode.exits_after_action() {
            log::info!("{} one-shot session aborted, exiting", LOG_TAG_WORKFLOW);
            return iced::exit();
        }
        Task::none()
    }

    #[cfg(test)]
    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    #[cfg(test)]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[cfg(test)]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Runs the external capture tool, then loads the result back. In
/// no-compositor mode the primary display is also grabbed so the overlay
/// can fake transparency; a failure there degrades to no background.
fn perform_capture(
    capture_tool: &dyn CaptureTool,
    display_capturer: &dyn DisplayCapturer,
    region: &Region,
    dest: PathBuf,
    want_background: bool,
) -> Result<ReviewPayload, CaptureError> {
    capture_tool.capture_region(region, &dest)?;

    let background = if want_background {
        match display_capturer.capture_primary_display() {
            Ok(bitmap) => Some(bitmap),
            Err(e) => {
                log::warn!(
                    "{} display grab for overlay background failed: {}",
                    LOG_TAG_WORKFLOW,
                    e
                );
                None
            }
        }
    } else {
        None
    };

    let capture = CaptureResult::from_capture_file(&dest)
        .map_err(|e| CaptureError::ToolFailed(format!("{:#}", e)))?;

    Ok(ReviewPayload {
        capture,
        background,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct MockRegionSelector {
        result: Result<Region, AcquireError>,
    }

    impl MockRegionSelector {
        fn returning(result: Result<Region, AcquireError>) -> Self {
            Self { result }
        }
    }

    impl RegionSelector for MockRegionSelector {
        fn select_region(&self) -> Result<Region, AcquireError> {
            self.result.clone()
        }
    }

    struct MockCaptureTool {
        succeed: bool,
    }

    impl CaptureTool for MockCaptureTool {
        fn capture_region(&self, _region: &Region, dest: &Path) -> Result<(), CaptureError> {
            if !self.succeed {
                return Err(CaptureError::ToolFailed("mock failure".to_string()));
            }
            crate::core::models::Bitmap::from_rgba(2, 2, vec![0u8; 16])
                .save_png(dest)
                .map_err(|e| CaptureError::ToolFailed(e.to_string()))
        }
    }

    struct NoOutputCaptureTool;

    impl CaptureTool for NoOutputCaptureTool {
        fn capture_region(&self, _region: &Region, _dest: &Path) -> Result<(), CaptureError> {
            // Reports success without producing the destination file.
            Ok(())
        }
    }

    struct MockDisplayCapturer;

    impl DisplayCapturer for MockDisplayCapturer {
        fn capture_primary_display(&self) -> Result<Bitmap, CaptureError> {
            Ok(Bitmap::from_rgba(8, 4, vec![0u8; 8 * 4 * 4]))
        }

        fn primary_display_geometry(&self) -> Result<(i32, i32, u32, u32), CaptureError> {
            Ok((0, 0, 800, 600))
        }
    }

    struct MockClipboard;

    impl ClipboardPort for MockClipboard {
        fn place_text(&self, _text: &str) -> anyhow::Result<()> {
            Ok(())
        }

        fn place_image(&self, _bitmap: &Bitmap) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn workflow_with(
        selector: MockRegionSelector,
        config: AppConfig,
        mode: SessionMode,
    ) -> CaptureWorkflow {
        CaptureWorkflow::build(
            Arc::new(selector),
            Arc::new(MockCaptureTool { succeed: true }),
            Arc::new(MockDisplayCapturer),
            Arc::new(MockClipboard),
            config,
            mode,
        )
    }

    fn test_config(dir: &Path) -> AppConfig {
        let mut config = AppConfig::default().with_storage_path(dir.join("config.json"));
        config.screenshot_folder = dir.to_path_buf();
        config
    }

    #[test]
    fn test_starts_idle() {
        let dir = tempfile::tempdir().unwrap();
        let workflow = workflow_with(
            MockRegionSelector::returning(Ok(Region::new(0, 0, 10, 10).unwrap())),
            test_config(dir.path()),
            SessionMode::TrayResident,
        );

        assert_eq!(workflow.state_name(), "Idle");
    }

    #[test]
    fn test_start_capture_enters_acquiring_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut workflow = workflow_with(
            MockRegionSelector::returning(Ok(Region::new(0, 0, 10, 10).unwrap())),
            test_config(dir.path()),
            SessionMode::TrayResident,
        );

        let _ = workflow.update(WorkflowMessage::StartCapture);

        assert_eq!(workflow.state_name(), "AcquiringRegion");
    }

    #[test]
    fn test_second_trigger_is_ignored_while_acquiring() {
        let dir = tempfile::tempdir().unwrap();
        let mut workflow = workflow_with(
            MockRegionSelector::returning(Ok(Region::new(0, 0, 10, 10).unwrap())),
            test_config(dir.path()),
            SessionMode::TrayResident,
        );

        let _ = workflow.update(WorkflowMessage::StartCapture);
        let _ = workflow.update(WorkflowMessage::StartCapture);

        assert_eq!(workflow.state_name(), "AcquiringRegion");
    }

    fn drive_to_reviewing(workflow: &mut CaptureWorkflow, capture_path: &Path) {
        let _ = workflow.update(WorkflowMessage::StartCapture);
        let _ = workflow.update(WorkflowMessage::RegionAcquired(Ok(Region::new(
            0, 0, 10, 10,
        )
        .unwrap())));

        Bitmap::from_rgba(2, 2, vec![0u8; 16])
            .save_png(capture_path)
            .unwrap();
        let payload = ReviewPayload {
            capture: CaptureResult::from_capture_file(capture_path).unwrap(),
            background: None,
        };
        let _ = workflow.update(WorkflowMessage::CaptureFinished(Ok(payload)));
    }

    #[test]
    fn test_triggers_while_reviewing_keep_the_single_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut workflow = workflow_with(
            MockRegionSelector::returning(Ok(Region::new(0, 0, 10, 10).unwrap())),
            test_config(dir.path()),
            SessionMode::TrayResident,
        );
        let capture_path = dir.path().join("pending.png");

        drive_to_reviewing(&mut workflow, &capture_path);
        assert_eq!(workflow.state_name(), "Reviewing");

        let _ = workflow.update(WorkflowMessage::StartCapture);
        let _ = workflow.update(WorkflowMessage::StartCaptureWithPreviousRegion);

        // The running review and its backing file are untouched.
        assert_eq!(workflow.state_name(), "Reviewing");
        assert!(capture_path.exists());
    }

    #[test]
    fn test_cancelled_selection_returns_to_idle_silently() {
        let dir = tempfile::tempdir().unwrap();
        let mut workflow = workflow_with(
            MockRegionSelector::returning(Err(AcquireError::Cancelled)),
            test_config(dir.path()),
            SessionMode::TrayResident,
        );

        let _ = workflow.update(WorkflowMessage::StartCapture);
        let _ = workflow.update(WorkflowMessage::RegionAcquired(Err(
            AcquireError::Cancelled,
        )));

        assert_eq!(workflow.state_name(), "Idle");
        assert_eq!(workflow.status(), "Ready");
    }

    #[test]
    fn test_selector_failure_surfaces_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut workflow = workflow_with(
            MockRegionSelector::returning(Ok(Region::new(0, 0, 10, 10).unwrap())),
            test_config(dir.path()),
            SessionMode::TrayResident,
        );

        let _ = workflow.update(WorkflowMessage::StartCapture);
        let _ = workflow.update(WorkflowMessage::RegionAcquired(Err(
            AcquireError::ToolFailed("slop exploded".to_string()),
        )));

        assert_eq!(workflow.state_name(), "Idle");
        assert!(workflow.status().contains("slop exploded"));
    }

    #[test]
    fn test_acquired_region_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut workflow = workflow_with(
            MockRegionSelector::returning(Ok(Region::new(5, 6, 70, 80).unwrap())),
            test_config(dir.path()),
            SessionMode::TrayResident,
        );

        let _ = workflow.update(WorkflowMessage::StartCapture);
        let _ = workflow.update(WorkflowMessage::RegionAcquired(Ok(Region::new(
            5, 6, 70, 80,
        )
        .unwrap())));

        assert_eq!(workflow.state_name(), "Capturing");
        assert_eq!(workflow.config().last_region, "5,6,70,80");
    }

    #[test]
    fn test_previous_region_trigger_without_saved_region_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let mut workflow = workflow_with(
            MockRegionSelector::returning(Ok(Region::new(0, 0, 10, 10).unwrap())),
            test_config(dir.path()),
            SessionMode::TrayResident,
        );

        let _ = workflow.update(WorkflowMessage::StartCaptureWithPreviousRegion);
        let _ = workflow.update(WorkflowMessage::RegionAcquired(Err(
            AcquireError::NoSavedRegion,
        )));

        assert_eq!(workflow.state_name(), "Idle");
        assert_eq!(workflow.status(), NOTICE_NO_PREVIOUS_REGION);
    }

    #[test]
    fn test_capture_failure_returns_to_idle() {
        let dir = tempfile::tempdir().unwrap();
        let mut workflow = workflow_with(
            MockRegionSelector::returning(Ok(Region::new(0, 0, 10, 10).unwrap())),
            test_config(dir.path()),
            SessionMode::TrayResident,
        );

        let _ = workflow.update(WorkflowMessage::StartCapture);
        let _ = workflow.update(WorkflowMessage::RegionAcquired(Ok(Region::new(
            0, 0, 10, 10,
        )
        .unwrap())));
        let _ = workflow.update(WorkflowMessage::CaptureFinished(Err(
            CaptureError::ToolFailed("scrot missing".to_string()),
        )));

        assert_eq!(workflow.state_name(), "Idle");
        assert!(workflow.status().contains("scrot missing"));
    }

    #[test]
    fn test_stray_region_result_in_idle_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut workflow = workflow_with(
            MockRegionSelector::returning(Ok(Region::new(0, 0, 10, 10).unwrap())),
            test_config(dir.path()),
            SessionMode::TrayResident,
        );

        let _ = workflow.update(WorkflowMessage::RegionAcquired(Ok(Region::new(
            1, 1, 2, 2,
        )
        .unwrap())));

        assert_eq!(workflow.state_name(), "Idle");
        assert_eq!(workflow.config().last_region, "");
    }

    #[test]
    fn test_perform_capture_produces_payload_with_background() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("shot.png");
        let region = Region::new(0, 0, 10, 10).unwrap();

        let payload = perform_capture(
            &MockCaptureTool { succeed: true },
            &MockDisplayCapturer,
            &region,
            dest.clone(),
            true,
        )
        .unwrap();

        assert_eq!(payload.capture.file_path, dest);
        assert!(payload.background.is_some());
    }

    #[test]
    fn test_perform_capture_without_compositor_skip_has_no_background() {
        let dir = tempfile::tempdir().unwrap();
        let region = Region::new(0, 0, 10, 10).unwrap();

        let payload = perform_capture(
            &MockCaptureTool { succeed: true },
            &MockDisplayCapturer,
            &region,
            dir.path().join("shot.png"),
            false,
        )
        .unwrap();

        assert!(payload.background.is_none());
    }

    #[test]
    fn test_perform_capture_rejects_success_without_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let region = Region::new(0, 0, 10, 10).unwrap();

        let result = perform_capture(
            &NoOutputCaptureTool,
            &MockDisplayCapturer,
            &region,
            dir.path().join("shot.png"),
            false,
        );

        assert!(matches!(result, Err(CaptureError::ToolFailed(_))));
    }

    #[test]
    fn test_perform_capture_propagates_tool_failure() {
        let dir = tempfile::tempdir().unwrap();
        let region = Region::new(0, 0, 10, 10).unwrap();

        let result = perform_capture(
            &MockCaptureTool { succeed: false },
            &MockDisplayCapturer,
            &region,
            dir.path().join("shot.png"),
            false,
        );

        assert_eq!(
            result.err(),
            Some(CaptureError::ToolFailed("mock failure".to_string()))
        );
    }
}
