//! Application shell
//!
//! Owns the winit event loop, window, render engine, UI manager, and the
//! interaction state (camera controls, pointer tracking, drag controller).
//! Input routing order per event: UI capture first, then pointer and drag
//! handling, then camera controls.

use std::sync::Arc;

use anyhow::Context as _;
use cgmath::Vector3;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::{
    gfx::{
        camera::{
            camera_controller::CameraController, camera_utils::CameraManager,
            orbit_camera::OrbitCamera,
        },
        picking::NodePicker,
        rendering::RenderEngine,
        scene::Scene,
    },
    interaction::{DragController, PointerTracker},
    options::SceneOptions,
    ui::UiManager,
};

/// UI callback type: builds the overlay each frame
pub type UiCallback = Box<dyn Fn(&imgui::Ui, &mut SceneOptions)>;

/// Per-frame update callback: receives the scene, the current options, and
/// the elapsed time since startup in milliseconds
pub type UpdateCallback = Box<dyn FnMut(&mut Scene, &SceneOptions, f32)>;

/// Top-level application
///
/// Construct with [`App::new`], configure the scene through
/// [`App::scene_mut`], attach callbacks, then call [`App::run`].
pub struct App {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
    ui_callback: Option<UiCallback>,
    update_callback: Option<UpdateCallback>,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    options: SceneOptions,
    pointer: PointerTracker,
    picker: NodePicker,
    drag: DragController,
    last_cursor_position: Option<(f32, f32)>,
    start_time: std::time::Instant,
    ui_callback: Option<UiCallback>,
    update_callback: Option<UpdateCallback>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new application with a default orbit camera
    pub fn new() -> Self {
        let camera = OrbitCamera::from_position(
            Vector3::new(1.0, 2.0, 6.0),
            Vector3::new(0.0, 0.0, 0.0),
            1.5,
        );
        let controller = CameraController::new(0.005, 0.1);

        let camera_manager = CameraManager::new(camera, controller);
        let scene = Scene::new(camera_manager);

        Self {
            event_loop: None,
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                options: SceneOptions::default(),
                pointer: PointerTracker::new(),
                picker: NodePicker::new(),
                drag: DragController::new(),
                last_cursor_position: None,
                start_time: std::time::Instant::now(),
                ui_callback: None,
                update_callback: None,
            },
            ui_callback: None,
            update_callback: None,
        }
    }

    /// Access the scene for setup before `run`
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app_state.scene
    }

    /// Access the scene options for setup before `run`
    pub fn options_mut(&mut self) -> &mut SceneOptions {
        &mut self.app_state.options
    }

    /// Sets the UI callback, invoked once per frame to build the overlay
    pub fn set_ui<F>(&mut self, ui_fn: F)
    where
        F: Fn(&imgui::Ui, &mut SceneOptions) + 'static,
    {
        self.ui_callback = Some(Box::new(ui_fn));
    }

    /// Sets the per-frame update callback
    ///
    /// Runs before picking and rendering each frame with the elapsed time
    /// since startup in milliseconds.
    pub fn set_update<F>(&mut self, update_fn: F)
    where
        F: FnMut(&mut Scene, &SceneOptions, f32) + 'static,
    {
        self.update_callback = Some(Box::new(update_fn));
    }

    /// Runs the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        self.app_state.ui_callback = self.ui_callback.take();
        self.app_state.update_callback = self.update_callback.take();
        self.app_state.start_time = std::time::Instant::now();

        let event_loop = EventLoop::new().context("failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("event loop error")?;

        Ok(())
    }
}

impl AppState {
    fn viewport(&self) -> Option<(f32, f32)> {
        let engine = self.render_engine.as_ref()?;
        let (width, height) = engine.get_surface_size();
        if width == 0 || height == 0 {
            return None;
        }
        Some((width as f32, height as f32))
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            WindowAttributes::default().with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        self.scene
            .camera_manager
            .camera
            .resize_projection(width, height);

        let window_clone = window.clone();
        let renderer = match pollster::block_on(async move {
            RenderEngine::new(window_clone, width, height).await
        }) {
            Ok(renderer) => renderer,
            Err(err) => {
                log::error!("failed to initialise renderer: {err}");
                event_loop.exit();
                return;
            }
        };

        self.scene
            .init_gpu_resources(renderer.device(), renderer.queue());

        let mut ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );
        ui_manager.update_display_size(width, height);

        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // UI gets first claim on every input event
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if matches!(
                    key_event.physical_key,
                    winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape)
                ) {
                    event_loop.exit();
                    return;
                }
                self.scene.camera_manager.process_keyboard_event(&key_event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(viewport) = self.viewport() {
                    self.pointer
                        .record_move((position.x as f32, position.y as f32), viewport);
                    self.last_cursor_position = Some((position.x as f32, position.y as f32));
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let (Some(viewport), Some(cursor)) = (self.viewport(), self.last_cursor_position)
                {
                    self.drag.handle_press(
                        cursor,
                        viewport,
                        &mut self.pointer,
                        &mut self.picker,
                        &self.scene,
                    );
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let Some(render_engine) = self.render_engine.as_mut() else {
                    return;
                };

                let elapsed_ms = self.start_time.elapsed().as_secs_f32() * 1000.0;
                if let Some(update) = self.update_callback.as_mut() {
                    update(&mut self.scene, &self.options, elapsed_ms);
                }

                self.drag.tick(&self.pointer, &mut self.picker, &self.scene);

                self.scene.update();
                self.scene.update_all_transforms(render_engine.queue());
                self.scene
                    .update_materials(render_engine.device(), render_engine.queue());
                render_engine.update(self.scene.camera_manager.camera.uniform, &self.scene.lighting);

                let render_result = if let (Some(ui_manager), Some(ui_callback)) =
                    (self.ui_manager.as_mut(), &self.ui_callback)
                {
                    let options = &mut self.options;
                    let scene = &self.scene;
                    render_engine.render_frame(
                        scene,
                        Some(|device: &wgpu::Device,
                              queue: &wgpu::Queue,
                              encoder: &mut wgpu::CommandEncoder,
                              color_attachment: &wgpu::TextureView| {
                            ui_manager.draw(
                                device,
                                queue,
                                encoder,
                                &window,
                                color_attachment,
                                |ui| {
                                    ui_callback(ui, options);
                                },
                            );
                        }),
                    )
                } else {
                    render_engine.render_frame(
                        &self.scene,
                        None::<
                            fn(
                                &wgpu::Device,
                                &wgpu::Queue,
                                &mut wgpu::CommandEncoder,
                                &wgpu::TextureView,
                            ),
                        >,
                    )
                };

                if let Err(err) = render_result {
                    log::error!("render error: {err}");
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        if let Some(ui_manager) = self.ui_manager.as_ref() {
            let io = ui_manager.context.io();
            if io.want_capture_mouse || io.want_capture_keyboard {
                return;
            }
        }

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
