//! Window hosting the channel web view.

use std::sync::Arc;
use std::time::{Duration, Instant};

use channel_common::ChannelError;
use channel_config::ChannelConfig;
use channel_webview::{Bundle, ChannelWebView, ControllerState};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::listener::LoggingListener;
use crate::settings;

/// How often queued sentinel navigations are drained.
const PUMP_INTERVAL: Duration = Duration::from_millis(16);

pub struct ChannelApp {
    config: ChannelConfig,
    token: String,
    bundle: Bundle,
    listener: Arc<LoggingListener>,
    // Dropped before the window it is a child of.
    webview: Option<ChannelWebView>,
    window: Option<Window>,
}

impl ChannelApp {
    pub fn new(config: ChannelConfig, token: String, bundle: Bundle) -> Self {
        Self {
            config,
            token,
            bundle,
            listener: Arc::new(LoggingListener::default()),
            webview: None,
            window: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ChannelError> {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ));
        let window = event_loop
            .create_window(attrs)
            .map_err(|e| ChannelError::Other(format!("failed to create window: {e}")))?;

        let mut webview = ChannelWebView::create(
            &window,
            full_bounds(&window),
            settings::webview_config(&self.config),
            settings::bridge_settings(&self.config),
        )?;
        webview.register_listener(&self.listener);

        match webview.start(&self.token, &self.bundle)? {
            ControllerState::Active => tracing::info!("channel page requested"),
            ControllerState::Uninitialized => tracing::warn!("no token, channel stays idle"),
        }

        self.webview = Some(webview);
        self.window = Some(window);
        Ok(())
    }

    fn shutdown(&mut self) {
        let counts = self.listener.counts();
        tracing::info!(
            delivered = counts.delivered(),
            failed = counts.failures,
            "channel session ended"
        );
        self.webview = None;
        self.window = None;
    }
}

impl ApplicationHandler for ChannelApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.initialize(event_loop) {
            tracing::error!("Failed to start channel: {e}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let (Some(window), Some(webview)) = (&self.window, &self.webview) {
                    if let Err(e) = webview.set_bounds(full_bounds(window)) {
                        tracing::warn!("Failed to resize webview: {e}");
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(webview) = &self.webview {
            let popped = webview.pump();
            if popped > 0 {
                tracing::trace!(popped, "drained sentinel navigations");
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + PUMP_INTERVAL));
    }
}

/// Bounds covering the whole client area.
fn full_bounds(window: &Window) -> wry::Rect {
    let size = window.inner_size();
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(size.width, size.height)),
    }
}
