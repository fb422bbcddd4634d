use softbuffer::{Context, Surface};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    platform::wayland::WindowAttributesExtWayland,
    window::{Theme, Window, WindowId},
};

use std::num::NonZeroU32;

use crate::{
    alert,
    animator::FrameAnimater,
    data::{Program, MAX_HEIGHT, MAX_WIDTH},
    error, field, info,
};

type WindowSurface = Surface<&'static Window, &'static Window>;

struct WindowState {
    prog: Program,
    animator: FrameAnimater,
    window: Option<&'static Window>,
    surface: Option<WindowSurface>,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.prog.print_startup_info();

        let win_size = PhysicalSize::<u32>::new(
            self.prog.window_props.width as u32,
            self.prog.window_props.height as u32,
        );

        let window_attributes = Window::default_attributes()
            .with_title("bubblevis")
            .with_inner_size(win_size)
            .with_transparent(false)
            .with_resizable(true)
            .with_name("bubblevis", "bubblevis")
            .with_theme(Some(Theme::Dark));

        // Since we are leaking the window into a static
        // reference, resumed() is not allowed to be
        // called again as it would cause the build up
        // of leaked windows and potentially flood RAM.
        match self.window {
            None => {
                self.window = Some(Box::leak(Box::new(
                    event_loop.create_window(window_attributes).unwrap(),
                )))
            }

            Some(_) => panic!("Resume being called the 2nd time!"),
        }

        let window = self
            .window
            .expect("Window unwraps to none. This error should never happen!");

        let size = window.inner_size();

        self.surface = {
            let context = Context::new(window).unwrap();
            let mut surface = Surface::new(&context, window).unwrap();

            Self::resize_surface(&mut surface, size.width, size.height);

            Some(surface)
        };

        self.prog
            .update_size((size.width, size.height), window.scale_factor());
        self.prog.regenerate_field();

        self.animator.start();
        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Rendered {} frames.", self.animator.frames_fired());
                event_loop.exit();
            }

            WindowEvent::Focused(_) => {
                if let Some(w) = self.window {
                    w.request_redraw()
                }
            }

            WindowEvent::Occluded(occluded) => {
                if occluded {
                    self.animator.stop();
                } else {
                    self.animator.start();

                    if let Some(w) = self.window {
                        w.request_redraw()
                    }
                }
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                let Some(surface) = self.surface.as_mut() else {
                    error!("Bubblevis is unable to resize the buffer!");
                    return;
                };

                if width == 0 || height == 0 {
                    return;
                }

                if width > MAX_WIDTH || height > MAX_HEIGHT {
                    alert!("You are hitting the resolution limit of Bubblevis!");
                }

                let w = u32::min(MAX_WIDTH, width);
                let h = u32::min(MAX_HEIGHT, height);

                Self::resize_surface(surface, w, h);

                if let Ok(mut buffer) = surface.buffer_mut() {
                    buffer.fill(0x0);
                }

                let scale_factor = self.window.map(|win| win.scale_factor()).unwrap_or(1.0);

                self.prog.update_size((w, h), scale_factor);

                // prior positions are lost on purpose
                self.prog.regenerate_field();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let Some(window) = self.window else {
                    return;
                };

                let size = window.inner_size();

                if size.width == 0 || size.height == 0 {
                    return;
                }

                self.prog.update_size(
                    (
                        u32::min(MAX_WIDTH, size.width),
                        u32::min(MAX_HEIGHT, size.height),
                    ),
                    scale_factor,
                );
                self.prog.regenerate_field();
            }

            WindowEvent::RedrawRequested => {
                let Some(window) = self.window else {
                    return;
                };

                if !self.animator.is_running() {
                    return;
                }

                // Keep the signal chain alive before pacing, so a
                // skipped frame still schedules the next one.
                window.request_redraw();

                if !self.animator.frame(&mut self.prog) {
                    return;
                }

                if let Some(Ok(mut buffer)) = self.surface.as_mut().map(|s| s.buffer_mut()) {
                    let pix = self.prog.pix.as_slice();

                    if buffer.len() == pix.len() {
                        buffer.copy_from_slice(pix);

                        window.pre_present_notify();
                        if let Err(e) = buffer.present() {
                            error!("Bubblevis is failing to present buffers to the window: {e}.");
                        }
                    }
                }
            }

            _ => {}
        }
    }
}

impl WindowState {
    fn resize_surface(surface: &mut WindowSurface, w: u32, h: u32) {
        surface
            .resize(
                NonZeroU32::new(w).expect("Surface width is zero"),
                NonZeroU32::new(h).expect("Surface height is zero"),
            )
            .expect("Failed to resize surface buffer");
    }
}

pub fn winit_main(prog: Program) {
    let event_loop = EventLoop::new().unwrap();

    let mut animator = FrameAnimater::new();
    animator.set_callback(field::render);
    animator.set_frame_rate(prog.milli_hz as f64 / 1000.0);

    let mut state = WindowState {
        prog,
        animator,
        window: None,
        surface: None,
    };

    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut state).unwrap();
}
